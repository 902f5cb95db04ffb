use crate::features::wiki::view::{EMPTY_PAGE_MARKDOWN, HOME_TITLE};
use crate::parser::{MarkdownConverter, PulldownMarkdown};
use crate::tests::mocks::{
    MockGistPublisher, MockStorage, RecordingRenderer, get, location, post_form, send,
    test_state,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::atomic::Ordering;

fn setup() -> (MockStorage, RecordingRenderer, crate::AppState) {
    let storage = MockStorage::new();
    let renderer = RecordingRenderer::new();
    let gists = MockGistPublisher::responding(StatusCode::CREATED, None);
    let state = test_state(&storage, &renderer, &gists);
    (storage, renderer, state)
}

// the home page lists whatever the backend holds, in the backend's order
#[tokio::test]
async fn test_home_lists_pages() {
    let (storage, renderer, state) = setup();
    storage.add_page("Alpha", "# A");
    storage.add_page("Beta", "# B");

    let response = send(&state, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html");

    let (template, model) = renderer.last();
    assert_eq!(template, "index");
    assert_eq!(model.title, HOME_TITLE);
    let names: Vec<&str> = model.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert!(model.backup_gist_url.is_none());
}

// a page nobody wrote yet still renders, as an invitation to write it
#[tokio::test]
async fn test_unknown_page_renders_as_new() {
    let (_storage, renderer, state) = setup();

    let response = send(&state, get("/wiki/Nowhere")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let (template, model) = renderer.last();
    assert_eq!(template, "page");
    assert_eq!(model.title, "Nowhere");
    assert_eq!(model.new_page, "yes");
    assert_eq!(model.id, -1);
    assert_eq!(model.raw_content, EMPTY_PAGE_MARKDOWN);
    assert_eq!(model.content, PulldownMarkdown.to_html(EMPTY_PAGE_MARKDOWN));
    assert!(!model.timestamp.is_empty());
}

// create a page through /save, then read it back through /wiki/:page
#[tokio::test]
async fn test_save_new_page_then_view() {
    let (storage, renderer, state) = setup();
    let markdown = "# Title\n\nSome *text* here.";

    let response = send(
        &state,
        post_form(
            "/save",
            &[("title", "T"), ("markdown", markdown), ("newPage", "yes"), ("id", "-1")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/wiki/T");
    assert_eq!(storage.page_names(), vec!["T"]);

    let response = send(&state, get("/wiki/T")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, model) = renderer.last();
    assert_eq!(model.new_page, "no");
    assert_eq!(model.raw_content, markdown);
    assert_eq!(model.content, PulldownMarkdown.to_html(markdown));
    assert!(model.id > 0);
}

// saving an existing page goes through save_page with the parsed id
#[tokio::test]
async fn test_save_existing_page() {
    let (storage, _renderer, state) = setup();
    let id = storage.add_page("Notes", "old").to_string();

    let response = send(
        &state,
        post_form(
            "/save",
            &[
                ("title", "Notes"),
                ("markdown", "new"),
                ("newPage", "no"),
                ("id", id.as_str()),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/wiki/Notes");
    assert!(storage.calls().contains(&"save_page".to_string()));
    assert_eq!(storage.pages.lock().unwrap()[0].raw_content, "new");
}

// a non-numeric id must be rejected before anything reaches the backend
#[tokio::test]
async fn test_save_rejects_non_numeric_id() {
    let (storage, _renderer, state) = setup();

    let response = send(
        &state,
        post_form(
            "/save",
            &[("title", "T"), ("markdown", "x"), ("newPage", "no"), ("id", "abc")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(storage.calls().is_empty());
}

#[tokio::test]
async fn test_save_rejects_missing_id_and_title() {
    let (storage, _renderer, state) = setup();

    let missing_id = send(
        &state,
        post_form("/save", &[("title", "T"), ("markdown", "x"), ("newPage", "no")]),
    )
    .await;
    assert_eq!(missing_id.status(), StatusCode::BAD_REQUEST);

    let missing_title = send(
        &state,
        post_form("/save", &[("markdown", "x"), ("newPage", "yes")]),
    )
    .await;
    assert_eq!(missing_title.status(), StatusCode::BAD_REQUEST);

    assert!(storage.calls().is_empty());
}

// names with spaces or non-ascii characters still give a usable redirect
#[tokio::test]
async fn test_save_redirect_is_percent_encoded() {
    let (_storage, _renderer, state) = setup();

    let response = send(
        &state,
        post_form(
            "/save",
            &[("title", "Café notes"), ("markdown", "x"), ("newPage", "yes")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/wiki/Caf%C3%A9%20notes");
}

// /create only redirects, it never touches the backend
#[tokio::test]
async fn test_create_redirects() {
    let (storage, _renderer, state) = setup();

    let empty = send(&state, post_form("/create", &[("name", "")])).await;
    assert_eq!(empty.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&empty), "/");

    let missing = send(&state, post_form("/create", &[])).await;
    assert_eq!(missing.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&missing), "/");

    let named = send(&state, post_form("/create", &[("name", "Foo")])).await;
    assert_eq!(named.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&named), "/wiki/Foo");

    assert!(storage.calls().is_empty());
}

// deleting is idempotent from the client's point of view
#[tokio::test]
async fn test_delete_existing_and_unknown_ids() {
    let (storage, _renderer, state) = setup();
    let id = storage.add_page("Doomed", "bye").to_string();

    let existing = send(&state, post_form("/delete", &[("id", id.as_str())])).await;
    assert_eq!(existing.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&existing), "/");
    assert!(storage.page_names().is_empty());

    let unknown = send(&state, post_form("/delete", &[("id", "4242")])).await;
    assert_eq!(unknown.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&unknown), "/");
}

#[tokio::test]
async fn test_delete_rejects_bad_id() {
    let (storage, _renderer, state) = setup();
    storage.add_page("Safe", "still here");

    let response = send(&state, post_form("/delete", &[("id", "one")])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!storage.calls().contains(&"delete_page".to_string()));
    assert_eq!(storage.page_names(), vec!["Safe"]);
}

// backend failures surface as a plain 500
#[tokio::test]
async fn test_backend_failure_is_server_error() {
    let (storage, renderer, state) = setup();
    storage.fail_all();

    let home = send(&state, get("/")).await;
    assert_eq!(home.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let page = send(&state, get("/wiki/Anything")).await;
    assert_eq!(page.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let delete = send(&state, post_form("/delete", &[("id", "1")])).await;
    assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(renderer.rendered().is_empty());
}

#[tokio::test]
async fn test_render_failure_is_server_error() {
    let (_storage, renderer, state) = setup();
    renderer.failing.store(true, Ordering::SeqCst);

    let response = send(&state, get("/")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// only the six wiki routes exist
#[tokio::test]
async fn test_unknown_routes_not_found() {
    let (_storage, _renderer, state) = setup();

    let response = send(&state, get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&state, get("/save")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// /create redirects even when the request carries no form body at all
#[tokio::test]
async fn test_create_without_form_body() {
    let (storage, _renderer, state) = setup();

    let bare = send(
        &state,
        Request::builder()
            .method("POST")
            .uri("/create")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(bare.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&bare), "/");

    // the name can also come in as a query parameter
    let from_query = send(
        &state,
        Request::builder()
            .method("POST")
            .uri("/create?name=Foo")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(from_query.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&from_query), "/wiki/Foo");

    // a form field takes precedence over the query string
    let both = send(&state, post_form("/create?name=Foo", &[("name", "Bar")])).await;
    assert_eq!(both.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&both), "/wiki/Bar");

    assert!(storage.calls().is_empty());
}
