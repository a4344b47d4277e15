//! Static file serving for the single page (web/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web/"]
struct PageAssets;

/// Serve the page for bare `/` requests.
pub async fn page_index() -> Response {
    serve_embedded::<PageAssets>("index.html")
}

/// Fallback handler: page assets for unmatched paths, JSON 404 under `/api`.
pub async fn page_fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<PageAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    path == "/api"
        || path
            .strip_prefix("/api")
            .is_some_and(|rest| rest.starts_with('/'))
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    let (path, asset) = match E::get(path) {
        Some(asset) => (path, Some(asset)),
        None => ("index.html", E::get("index.html")),
    };

    match asset {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::{is_api_path, page_fallback, page_index};
    use axum::body::to_bytes;
    use axum::http::{StatusCode, Uri, header};

    #[test]
    fn should_detect_api_paths_by_root_segment() {
        for path in ["/api", "/api/qr", "/api/nonexistent/deep"] {
            assert!(is_api_path(path), "{path} should be API");
        }
        for path in ["/", "/apiary", "/index.html", "/static/api"] {
            assert!(!is_api_path(path), "{path} should not be API");
        }
    }

    #[tokio::test]
    async fn page_index_serves_html_form() {
        let response = page_index().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("id=\"qrForm\""));
    }

    #[tokio::test]
    async fn unknown_page_paths_fall_back_to_index() {
        let response = page_fallback(Uri::from_static("/whatever")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[tokio::test]
    async fn unknown_api_paths_return_json_404() {
        let response = page_fallback(Uri::from_static("/api/nonexistent")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/api/nonexistent");
    }
}
