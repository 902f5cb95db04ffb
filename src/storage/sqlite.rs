use crate::domain::{Page, PageData, PageLookup, PageSummary};
use crate::storage::model::DbPage;
use crate::storage::StorageClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqliteStorageClient {
    pool: Pool<Sqlite>,
}

impl SqliteStorageClient {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the store named by `endpoint` and brings its schema up to date.
    /// Endpoints starting with `sqlite:` are connection urls, anything else is a file path.
    pub async fn connect(endpoint: &str, max_connections: u32) -> Result<Self> {
        let options = if endpoint.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(endpoint)
                .with_context(|| format!("Invalid sqlite url {}", endpoint))?
        } else {
            SqliteConnectOptions::new().filename(endpoint)
        };
        let options = options.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open page storage at {}", endpoint))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        info!(endpoint, "page storage ready");
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn all_pages(&self) -> Result<Vec<Page>> {
        let db_pages =
            sqlx::query_as::<_, DbPage>("SELECT id, name, content FROM pages ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(db_pages.into_iter().map(Page::from).collect())
    }
}

#[async_trait]
impl StorageClient for SqliteStorageClient {
    async fn fetch_all_pages(&self) -> Result<Vec<PageSummary>> {
        let pages = self.all_pages().await.context("Failed to list pages")?;
        Ok(pages.iter().map(PageSummary::from).collect())
    }

    async fn fetch_page(&self, name: &str) -> Result<PageLookup> {
        let db_page_opt =
            sqlx::query_as::<_, DbPage>("SELECT id, name, content FROM pages WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Failed to fetch page {}", name))?;

        match db_page_opt {
            Some(db_page) => {
                debug!(page = %db_page, "page found");
                Ok(Page::from(db_page).into())
            }
            None => Ok(PageLookup::missing()),
        }
    }

    async fn fetch_all_pages_data(&self) -> Result<Vec<PageData>> {
        let pages = self
            .all_pages()
            .await
            .context("Failed to export page contents")?;
        Ok(pages.into_iter().map(PageData::from).collect())
    }

    async fn create_page(&self, name: &str, markdown: &str) -> Result<()> {
        sqlx::query("INSERT INTO pages (name, content) VALUES (?, ?)")
            .bind(name)
            .bind(markdown)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create page {}", name))?;

        Ok(())
    }

    async fn save_page(&self, id: i64, markdown: &str) -> Result<()> {
        sqlx::query("UPDATE pages SET content = ? WHERE id = ?")
            .bind(markdown)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to save page #{}", id))?;

        Ok(())
    }

    async fn delete_page(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete page #{}", id))?;

        Ok(())
    }
}
