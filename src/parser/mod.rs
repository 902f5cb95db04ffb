pub mod markdown;

pub use markdown::{MarkdownConverter, PulldownMarkdown};
