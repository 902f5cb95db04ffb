pub mod backup;
pub mod mutation;
pub mod view;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};

// POST handlers take their fields through axum's `Form` extractor, which decodes the
// url-encoded body into a `FormFields` map before the handler body runs
pub fn wiki_router() -> Router<AppState> {
    Router::new()
        .route("/", get(view::index_handler))
        .route("/wiki/{page}", get(view::page_handler))
        .route("/save", post(mutation::save_handler))
        .route("/create", post(mutation::create_handler))
        .route("/delete", post(mutation::delete_handler))
        .route("/backup", get(backup::backup_handler))
}
