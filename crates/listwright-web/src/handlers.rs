//! HTTP request handlers for the web front end.
//!
//! Form pages for the manual and batch flows, the two export actions and a
//! health check, using axum.

use crate::pages::{self, BatchForm, ManualForm, ManualOutput};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router as AxumRouter,
};
use listwright_domain::traits::{ListingSource, LlmProvider};
use listwright_optimizer::{
    export_batch, export_manual, ExportError, ListingFields, Optimizer, OptimizerError, Targeting,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared application state, read-only after startup
#[derive(Clone)]
pub struct AppState {
    /// Audit/rewrite pipeline
    pub optimizer: Arc<Optimizer<Arc<dyn LlmProvider>>>,
    /// Where batch listings are fetched from
    pub source: Arc<dyn ListingSource>,
    /// Directory export files are written to
    pub export_dir: PathBuf,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Listing source name
    pub source: String,
    /// Rewrite persona
    pub persona: String,
    /// Chat model identifier
    pub model: String,
}

/// Manual export form: the raw texts shown on the result page
#[derive(Debug, Default, Deserialize)]
pub struct ManualExportForm {
    /// Audit Markdown
    #[serde(default)]
    pub audit: String,
    /// Rewrite Markdown
    #[serde(default)]
    pub rewrite: String,
}

/// Batch export form: the rendered report shown on the result page
#[derive(Debug, Default, Deserialize)]
pub struct BatchExportForm {
    /// Report Markdown
    #[serde(default)]
    pub report: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The audit or rewrite call failed
    Generation(OptimizerError),
    /// Export failed
    Export {
        /// Underlying error
        error: ExportError,
        /// Page to go back to
        back: &'static str,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, heading, message, back) = match self {
            AppError::Generation(e) => {
                (StatusCode::BAD_GATEWAY, "Generation failed", e.to_string(), "/")
            }
            AppError::Export { error, back } => {
                let status = match error {
                    ExportError::NothingToExport(_) => StatusCode::BAD_REQUEST,
                    ExportError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "Export failed", error.to_string(), back)
            }
        };

        if status.is_server_error() {
            error!("{}: {}", heading, message);
        } else {
            warn!("{}: {}", heading, message);
        }

        (status, Html(pages::error_page(heading, &message, back))).into_response()
    }
}

impl From<OptimizerError> for AppError {
    fn from(e: OptimizerError) -> Self {
        AppError::Generation(e)
    }
}

/// GET / - Manual form
async fn manual_form() -> Html<String> {
    Html(pages::manual_page(&ManualForm::default(), None))
}

/// GET /batch - Batch form
async fn batch_form() -> Html<String> {
    Html(pages::batch_page(&BatchForm::default(), None))
}

/// POST /optimize/manual - Audit and rewrite pasted listing text
async fn optimize_manual(
    State(state): State<AppState>,
    Form(form): Form<ManualForm>,
) -> Result<Html<String>, AppError> {
    let listing = ListingFields {
        title: form.title.clone(),
        bullets: form.bullets.clone(),
        description: form.description.clone(),
        reviews: form.reviews.clone(),
    };
    let targeting = Targeting {
        keywords: form.keywords.clone(),
        category: form.category.clone(),
        audience: form.audience.clone(),
    };

    let result = state.optimizer.optimize(&listing, &targeting).await?;
    let output = ManualOutput {
        audit: result.audit.into_inner(),
        rewrite: result.rewrite.into_inner(),
    };

    Ok(Html(pages::manual_page(&form, Some(&output))))
}

/// POST /optimize/batch - Resolve, fetch and optimize every line
async fn optimize_batch(
    State(state): State<AppState>,
    Form(form): Form<BatchForm>,
) -> Html<String> {
    let targeting = Targeting {
        keywords: form.keywords.clone(),
        category: form.category.clone(),
        audience: form.audience.clone(),
    };

    let report = state
        .optimizer
        .run_batch(state.source.as_ref(), &form.identifiers, &targeting)
        .await;

    Html(pages::batch_page(&form, Some(&report.render())))
}

/// POST /export/manual - Download the manual result as a text file
async fn export_manual_result(
    State(state): State<AppState>,
    Form(form): Form<ManualExportForm>,
) -> Result<Response, AppError> {
    let path = export_manual(&state.export_dir, &form.audit, &form.rewrite)
        .map_err(|error| AppError::Export { error, back: "/" })?;
    attachment(&path, "/")
}

/// POST /export/batch - Download the batch report as a text file
async fn export_batch_result(
    State(state): State<AppState>,
    Form(form): Form<BatchExportForm>,
) -> Result<Response, AppError> {
    let path = export_batch(&state.export_dir, &form.report)
        .map_err(|error| AppError::Export { error, back: "/batch" })?;
    attachment(&path, "/batch")
}

fn attachment(path: &Path, back: &'static str) -> Result<Response, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Export {
        error: ExportError::Io {
            path: path.to_path_buf(),
            source,
        },
        back,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!("Serving export {}", filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    )
        .into_response())
}

/// GET /health - Service status and active configuration
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        source: state.source.name().to_string(),
        persona: state.optimizer.persona().to_string(),
        model: state.optimizer.model().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(manual_form))
        .route("/batch", get(batch_form))
        .route("/optimize/manual", post(optimize_manual))
        .route("/optimize/batch", post(optimize_batch))
        .route("/export/manual", post(export_manual_result))
        .route("/export/batch", post(export_batch_result))
        .route("/health", get(health_check))
        .with_state(state)
}
