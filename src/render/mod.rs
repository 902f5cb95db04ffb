use crate::domain::PageSummary;
use serde::Serialize;
use thiserror::Error;

pub mod templates;

pub use templates::AskamaRenderer;

pub const INDEX_TEMPLATE: &str = "index";
pub const PAGE_TEMPLATE: &str = "page";

/// Values handed to a template for one response. Built fresh for every request and never
/// shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub title: String,
    pub pages: Vec<PageSummary>,
    pub id: i64,
    pub new_page: String,
    pub raw_content: String,
    pub content: String,
    pub timestamp: String,
    pub backup_gist_url: Option<String>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backup_gist_url(url: impl Into<String>) -> Self {
        Self {
            backup_gist_url: Some(url.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error(transparent)]
    Template(#[from] askama::Error),
}

pub trait Renderer: Send + Sync {
    fn render(&self, model: &ViewModel, template: &str) -> Result<String, RenderError>;
}
