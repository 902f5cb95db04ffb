use crate::AppState;
use crate::domain::page_path;
use crate::error::WikiError;
use axum::{
    Form,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use tracing::debug;

/// Decoded `application/x-www-form-urlencoded` request body.
pub type FormFields = HashMap<String, String>;

pub async fn save_handler(
    State(state): State<AppState>,
    Form(form): Form<FormFields>,
) -> Result<Response, WikiError> {
    update_page(&state, &form).await
}

// /create has no failure mode: query parameters count as fields, body fields win over them,
// and a body that isn't a form is read as empty
pub async fn create_handler(
    query: Result<Query<FormFields>, QueryRejection>,
    form: Result<Form<FormFields>, FormRejection>,
) -> Response {
    let mut fields = query.map(|Query(query)| query).unwrap_or_default();
    if let Ok(Form(form)) = form {
        fields.extend(form);
    }
    create_page(&fields)
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Form(form): Form<FormFields>,
) -> Result<Response, WikiError> {
    delete_page(&state, &form).await
}

// creates or updates a page depending on the `newPage` flag the page view put in the form
pub async fn update_page(state: &AppState, form: &FormFields) -> Result<Response, WikiError> {
    let title = field(form, "title").unwrap_or_default();
    if title.is_empty() {
        return Err(WikiError::validation("a page needs a non-empty title"));
    }
    let markdown = field(form, "markdown").unwrap_or_default();

    if field(form, "newPage") == Some("yes") {
        debug!(title, "creating page");
        state
            .storage
            .create_page(title, markdown)
            .await
            .map_err(WikiError::Backend)?;
    } else {
        // validate before touching storage
        let id = parse_id(form)?;
        debug!(title, id, "saving page");
        state
            .storage
            .save_page(id, markdown)
            .await
            .map_err(WikiError::Backend)?;
    }

    Ok(Redirect::to(&page_path(title)).into_response())
}

// no storage call: the page only gets persisted by the view -> save round trip that follows
pub fn create_page(form: &FormFields) -> Response {
    let location = match field(form, "name") {
        Some(name) if !name.is_empty() => page_path(name),
        _ => "/".to_string(),
    };

    Redirect::to(&location).into_response()
}

pub async fn delete_page(state: &AppState, form: &FormFields) -> Result<Response, WikiError> {
    let id = parse_id(form)?;

    // unknown ids are not an error, the client ends up on the home page either way
    state
        .storage
        .delete_page(id)
        .await
        .map_err(WikiError::Backend)?;

    Ok(Redirect::to("/").into_response())
}

fn field<'a>(form: &'a FormFields, key: &str) -> Option<&'a str> {
    form.get(key).map(String::as_str)
}

pub fn parse_id(form: &FormFields) -> Result<i64, WikiError> {
    let raw = field(form, "id").ok_or_else(|| WikiError::validation("missing page id"))?;

    raw.trim()
        .parse::<i64>()
        .map_err(|_| WikiError::validation(format!("page id '{}' is not an integer", raw)))
}
