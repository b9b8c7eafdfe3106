//! Integration tests for the web front end

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use listwright_catalog::MockSource;
use listwright_domain::traits::LlmProvider;
use listwright_domain::{GenerationError, ListingRecord};
use listwright_llm::MockProvider;
use listwright_optimizer::{Optimizer, Persona};
use listwright_web::handlers::{create_router, AppState, HealthCheckResponse};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

/// Helper to create test application state
fn create_test_state(llm: MockProvider, export_dir: &Path) -> AppState {
    let mut source = MockSource::new();
    source.add_listing(
        ListingRecord::new("B0DJ33ZFJH".parse().unwrap())
            .with_title("YÜCE Kataifi Filo Dough")
            .with_bullets(vec!["Authentic kataifi".to_string()]),
    );

    let llm: Arc<dyn LlmProvider> = Arc::new(llm);
    AppState {
        optimizer: Arc::new(Optimizer::new(llm, Persona::Commander)),
        source: Arc::new(source),
        export_dir: export_dir.to_path_buf(),
    }
}

fn mock_llm() -> MockProvider {
    let mut llm = MockProvider::default();
    llm.add_response("You are auditing", "AUDIT TEXT");
    llm.add_response("AUDIT SUMMARY", "REWRITE TEXT");
    llm
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.source, "Mock");
    assert_eq!(health.persona, "commander");
    assert_eq!(health.model, "mock");
}

#[tokio::test]
async fn test_form_pages() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("action=\"/optimize/manual\""));
    assert!(page.contains("href=\"/batch\""));

    let response = app
        .oneshot(Request::builder().uri("/batch").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/optimize/batch\""));
}

#[tokio::test]
async fn test_optimize_manual() {
    let dir = TempDir::new().unwrap();
    let llm = mock_llm();
    let app = create_router(create_test_state(llm.clone(), dir.path()));

    let response = app
        .oneshot(form_post(
            "/optimize/manual",
            "title=Kataifi+Dough&bullets=-+500g&description=Shredded+filo&keywords=kataifi&category=Baking&audience=Bakers",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("AUDIT TEXT"));
    assert!(page.contains("REWRITE TEXT"));
    assert!(page.contains("name=\"audit\" value=\"AUDIT TEXT\""));
    assert!(page.contains("value=\"Kataifi Dough\""));

    assert_eq!(llm.call_count(), 2);
    assert!(llm.calls()[0].user.contains("TITLE:\nKataifi Dough"));
}

#[tokio::test]
async fn test_optimize_manual_generation_error_is_readable() {
    let dir = TempDir::new().unwrap();
    let mut llm = MockProvider::default();
    llm.add_error(
        "You are auditing",
        GenerationError::Unauthorized("<invalid key>".to_string()),
    );
    let app = create_router(create_test_state(llm, dir.path()));

    let response = app
        .oneshot(form_post("/optimize/manual", "title=x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let page = body_text(response).await;
    assert!(page.contains("Generation failed"));
    assert!(page.contains("&lt;invalid key&gt;"));
}

#[tokio::test]
async fn test_optimize_batch_renders_every_line() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .oneshot(form_post(
            "/optimize/batch",
            "identifiers=B0DJ33ZFJH%0Anot-an-asin&keywords=kataifi&category=&audience=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("YÜCE Kataifi Filo Dough"));
    assert!(page.contains("AUDIT TEXT"));
    assert!(page.contains("❌ Could not read identifier"));
    assert!(page.contains("Could not extract ASIN from: not-an-asin"));
    assert!(page.contains("action=\"/export/batch\""));
}

#[tokio::test]
async fn test_optimize_batch_escapes_markup() {
    let dir = TempDir::new().unwrap();
    let mut llm = MockProvider::default();
    llm.add_response("You are auditing", "<img src=x onerror=alert(2)>");
    llm.add_response("AUDIT SUMMARY", "REWRITE TEXT");
    let app = create_router(create_test_state(llm, dir.path()));

    // "<script>alert(1)</script>" then a good ASIN
    let response = app
        .oneshot(form_post(
            "/optimize/batch",
            "identifiers=%3Cscript%3Ealert(1)%3C%2Fscript%3E%0AB0DJ33ZFJH&keywords=x",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(!page.contains("<img src=x"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(page.contains("&lt;img src=x onerror=alert(2)&gt;"));
}

#[tokio::test]
async fn test_optimize_batch_without_identifiers() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .oneshot(form_post("/optimize/batch", "identifiers=%0A++%0A&keywords=x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("No ASINs or URLs provided. Please add one per line."));
}

#[tokio::test]
async fn test_export_manual_without_result() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .oneshot(form_post("/export/manual", "audit=&rewrite="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("No results to export. Run an optimization first."));
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn test_export_manual_returns_attachment() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .oneshot(form_post("/export/manual", "audit=weak+title&rewrite=STRONG+TITLE"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"listing_manual_"));
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let content = body_text(response).await;
    assert_eq!(
        content,
        "=== AUDIT ===\n\nweak title\n\n=== OPTIMIZED LISTING ===\n\nSTRONG TITLE\n"
    );
    assert_eq!(file_count(dir.path()), 1);
}

#[tokio::test]
async fn test_export_batch() {
    let dir = TempDir::new().unwrap();
    let app = create_router(create_test_state(mock_llm(), dir.path()));

    let response = app
        .clone()
        .oneshot(form_post("/export/batch", "report="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(file_count(dir.path()), 0);

    let response = app
        .oneshot(form_post("/export/batch", "report=%23%23+B0DJ33ZFJH"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "## B0DJ33ZFJH");
    assert_eq!(file_count(dir.path()), 1);
}
