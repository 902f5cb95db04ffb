use crate::render::RenderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Everything that can end a wiki request early. Each variant is terminal for
/// the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("storage backend failed: {0:#}")]
    Backend(anyhow::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("backup request could not be sent: {0:#}")]
    BackupTransport(anyhow::Error),

    #[error("gist API answered {status}: {message}")]
    BackupApi { status: u16, message: String },
}

impl WikiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Backend(_) | Self::Render(_) | Self::BackupTransport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            // upstream status is only reported in the logs
            Self::BackupApi { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::BackupApi { status: upstream, .. } = &self {
            // the backup flow already logged the full diagnostic
            debug!(%status, upstream, "backup rejected by gist API");
        } else if status.is_server_error() {
            error!(%status, "request failed: {}", self);
        } else {
            warn!(%status, "request rejected: {}", self);
        }

        let body = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();

        (status, body).into_response()
    }
}
