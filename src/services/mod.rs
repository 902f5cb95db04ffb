pub mod gist;

pub use gist::{BackupPayload, GistPublisher, GistResponse, GithubGistPublisher};
