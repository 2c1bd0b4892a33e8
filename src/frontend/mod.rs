//! Browser front-ends. Both pages are static and talk to `/api/users`.

use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

const FULL_UI: &str = include_str!("../../assets/index.html");
const SIMPLE_UI: &str = include_str!("../../assets/simple.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(full_ui))
        .route("/simple", get(simple_ui))
}

/// Table with add/edit dialog, delete confirmation and toasts.
async fn full_ui() -> Html<&'static str> {
    Html(FULL_UI)
}

/// List plus a single add form.
async fn simple_ui() -> Html<&'static str> {
    Html(SIMPLE_UI)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    async fn fetch(uri: &str) -> (StatusCode, String, String) {
        let app = router().with_state(AppState::fake());
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let ct = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, ct, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn serves_full_ui() {
        let (status, ct, body) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ct.starts_with("text/html"));
        assert!(body.contains("/api/users"));
        assert!(body.contains("<dialog"));
    }

    #[tokio::test]
    async fn serves_simple_ui() {
        let (status, ct, body) = fetch("/simple").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ct.starts_with("text/html"));
        assert!(body.contains("/api/users"));
        assert!(body.contains("<form"));
    }
}
