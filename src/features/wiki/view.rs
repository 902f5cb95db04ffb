use crate::AppState;
use crate::error::WikiError;
use crate::render::{INDEX_TEMPLATE, PAGE_TEMPLATE, ViewModel};
use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use chrono::Local;

pub const HOME_TITLE: &str = "Wiki home";
pub const EMPTY_PAGE_MARKDOWN: &str = "# A new page\n\nFeel-free to write in Markdown!\n";
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

pub async fn index_handler(State(state): State<AppState>) -> Result<Response, WikiError> {
    render_home(&state, ViewModel::new()).await
}

pub async fn page_handler(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Response, WikiError> {
    render_page(&state, &page).await
}

/// Renders the home listing on top of `model`. Whatever the caller already put in the model
/// (a backup url, for instance) is kept; title and page list are always overwritten.
pub async fn render_home(state: &AppState, mut model: ViewModel) -> Result<Response, WikiError> {
    let pages = state
        .storage
        .fetch_all_pages()
        .await
        .map_err(WikiError::Backend)?;

    model.title = HOME_TITLE.to_string();
    model.pages = pages;

    html_response(state, &model, INDEX_TEMPLATE)
}

pub async fn render_page(state: &AppState, page_name: &str) -> Result<Response, WikiError> {
    let lookup = state
        .storage
        .fetch_page(page_name)
        .await
        .map_err(WikiError::Backend)?;

    let raw_content = lookup
        .raw_content
        .unwrap_or_else(|| EMPTY_PAGE_MARKDOWN.to_string());

    let model = ViewModel {
        title: page_name.to_string(),
        id: lookup.id.unwrap_or(-1),
        new_page: (if lookup.found { "no" } else { "yes" }).to_string(),
        content: state.markdown.to_html(&raw_content),
        raw_content,
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        ..ViewModel::default()
    };

    html_response(state, &model, PAGE_TEMPLATE)
}

fn html_response(state: &AppState, model: &ViewModel, template: &str) -> Result<Response, WikiError> {
    let body = state.renderer.render(model, template)?;
    Ok(([(CONTENT_TYPE, "text/html")], body).into_response())
}
