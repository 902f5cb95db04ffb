use crate::AppState;
use crate::domain::PageData;
use crate::error::WikiError;
use crate::features::wiki::view::render_home;
use crate::render::ViewModel;
use crate::services::{BackupPayload, GistResponse};
use axum::{extract::State, response::Response};
use http::StatusCode;
use tracing::{error, info};

pub async fn backup_handler(State(state): State<AppState>) -> Result<Response, WikiError> {
    backup_wiki(&state).await
}

/// Exports every page into a new public gist, then shows the home page with a link to it.
///
/// Steps run strictly in order: fetch page contents, build the payload, send it once, then
/// branch on the answer. Only a `201 Created` leads to a rendered page; any other status
/// becomes a 502 and a transport failure a 500.
pub async fn backup_wiki(state: &AppState) -> Result<Response, WikiError> {
    let pages = state
        .storage
        .fetch_all_pages_data()
        .await
        .map_err(WikiError::Backend)?;

    let payload = build_payload(pages);

    let response = match state.gists.publish(&payload).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %format!("{:#}", e), "HTTP client error");
            return Err(WikiError::BackupTransport(e));
        }
    };

    if response.status != StatusCode::CREATED {
        let message = describe_rejection(&response);
        error!("{}", message);
        return Err(WikiError::BackupApi {
            status: response.status.as_u16(),
            message,
        });
    }

    let Some(url) = response.html_url() else {
        let message = "Could not backup the wiki: gist created without an html_url".to_string();
        error!("{}", message);
        return Err(WikiError::BackupApi {
            status: response.status.as_u16(),
            message,
        });
    };

    info!(url, files = payload.files.len(), "wiki backed up");
    render_home(state, ViewModel::with_backup_gist_url(url)).await
}

pub fn build_payload(pages: Vec<PageData>) -> BackupPayload {
    let mut payload = BackupPayload::new();
    for page in pages {
        payload.add_file(page.name, page.content);
    }
    payload
}

// status text, then the pretty-printed body when there is one
pub fn describe_rejection(response: &GistResponse) -> String {
    let status_text = response
        .status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| response.status.as_str().to_string());

    let mut message = format!("Could not backup the wiki: {}", status_text);

    if let Some(body) = &response.body {
        let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        message.push('\n');
        message.push_str(&pretty);
    }

    message
}
