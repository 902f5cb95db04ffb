use anyhow::{Context, Result};
use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const GIST_API_URL: &str = "https://api.github.com:443/gists";
pub const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";
pub const BACKUP_DESCRIPTION: &str = "A wiki backup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// Gist creation request: one file per page, keyed by page name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupPayload {
    pub files: BTreeMap<String, GistFile>,
    pub description: String,
    pub public: bool,
}

impl BackupPayload {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            description: BACKUP_DESCRIPTION.to_string(),
            public: true,
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(
            name.into(),
            GistFile {
                content: content.into(),
            },
        );
    }
}

impl Default for BackupPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// Whatever the gist API answered, successful or not. `body` is `None` when the
/// response carried no content.
#[derive(Debug, Clone)]
pub struct GistResponse {
    pub status: StatusCode,
    pub body: Option<serde_json::Value>,
}

impl GistResponse {
    pub fn html_url(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| body.get("html_url"))
            .and_then(|url| url.as_str())
    }
}

// an Err here means no response was obtained at all; API rejections come back as Ok
#[async_trait]
pub trait GistPublisher: Send + Sync {
    async fn publish(&self, payload: &BackupPayload) -> Result<GistResponse>;
}

pub struct GithubGistPublisher {
    pub client: Client,
    pub url: String,
}

impl GithubGistPublisher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build the gist HTTP client")?;

        Ok(Self {
            client,
            url: GIST_API_URL.to_string(),
        })
    }
}

#[async_trait]
impl GistPublisher for GithubGistPublisher {
    async fn publish(&self, payload: &BackupPayload) -> Result<GistResponse> {
        debug!(files = payload.files.len(), url = %self.url, "sending backup gist");

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, GITHUB_V3_JSON)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .context("Failed to read the gist API response")?;

        let body = if bytes.is_empty() {
            None
        } else {
            // keep non-JSON bodies around as text so they still show up in diagnostics
            Some(
                serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }),
            )
        };

        Ok(GistResponse { status, body })
    }
}
