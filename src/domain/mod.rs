pub mod page;

pub use page::{page_path, Page, PageData, PageLookup, PageSummary};
