use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::state::AppState;

/// Fallback handler serving the built client from the public directory.
/// `/` maps to `index.html`; anything unknown is a 404.
pub async fn serve_static(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let relative = if path == "/" {
        "index.html"
    } else {
        path.trim_start_matches('/')
    };

    // Keep requests inside the public dir.
    if relative.split('/').any(|part| part == "..") {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    let full_path = state.public_dir.join(relative);
    match tokio::fs::read(&full_path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type_for(relative))],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("app.js"), "text/javascript");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
    }
}
