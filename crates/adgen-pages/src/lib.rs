//! Static tool pages, embedded into the binary at compile time.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;
use tracing::error;

#[derive(Embed)]
#[folder = "pages"]
struct Pages;

/// Route path and embedded file for every page.
pub const PAGES: [(&str, &str); 5] = [
    ("/", "home.html"),
    ("/tool1", "tool1.html"),
    ("/tool2", "tool2.html"),
    ("/tool3", "tool3.html"),
    ("/tool4", "tool4.html"),
];

const NOT_FOUND_PAGE: &str = "404.html";

/// Router serving every page. Generic over state so it merges into any app.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    PAGES.iter().fold(Router::new(), |router, &(path, file)| {
        router.route(path, get(move || async move { render(file, StatusCode::OK) }))
    })
}

/// Fallback handler: the not-found page with a 404 status.
pub async fn not_found() -> Response {
    render(NOT_FOUND_PAGE, StatusCode::NOT_FOUND)
}

fn render(file: &str, status: StatusCode) -> Response {
    let Some(content) = Pages::get(file) else {
        error!("Page not embedded: {}", file);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    };

    let mime = mime_guess::from_path(file).first_or_octet_stream();

    (
        status,
        [(header::CONTENT_TYPE, mime.as_ref())],
        content.data.into_owned(),
    )
        .into_response()
}
