use crate::domain::{PageData, PageLookup, PageSummary};
use anyhow::Result;
use async_trait::async_trait;

pub mod model;
pub mod sqlite;

// the wiki's only way into page storage. one instance is built at startup and shared by every
// request, so implementations must be safe to call concurrently
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn fetch_all_pages(&self) -> Result<Vec<PageSummary>>;
    async fn fetch_page(&self, name: &str) -> Result<PageLookup>;
    async fn fetch_all_pages_data(&self) -> Result<Vec<PageData>>;

    // write operations
    async fn create_page(&self, name: &str, markdown: &str) -> Result<()>;
    async fn save_page(&self, id: i64, markdown: &str) -> Result<()>;
    async fn delete_page(&self, id: i64) -> Result<()>;
}
