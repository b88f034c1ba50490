//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::pipeline::{NearbyReport, PipelineError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page).post(search))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/nearby", get(nearby_api))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the empty search form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&IndexTemplate::empty(&state.map_token))
}

/// About page.
async fn about_page() -> Result<Html<String>, AppError> {
    render(&AboutTemplate)
}

/// Fallback for unknown paths.
async fn not_found_page() -> Response {
    let page = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There's nothing at this address.".to_string(),
    };
    match render(&page) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Handle a form submission.
///
/// Renders the page for browsers; other clients get the JSON report.
async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let result = state.nearby.lookup(&form.place).await;

    if !accepts_html(&headers) {
        return result
            .map(|report| Json(report).into_response())
            .map_err(AppError::from);
    }

    let (status, page) = match result {
        Ok(report) => (
            StatusCode::OK,
            IndexTemplate {
                place: report.place.clone(),
                map_token: state.map_token.to_string(),
                report: Some(ReportView::from_report(&report)),
                error: None,
            },
        ),
        Err(e) => {
            warn!(place = %form.place, error = %e, "search failed");
            (
                status_for(&e),
                IndexTemplate {
                    place: form.place.trim().to_string(),
                    map_token: state.map_token.to_string(),
                    report: None,
                    error: Some(e.user_message().to_string()),
                },
            )
        }
    };

    Ok((status, render(&page)?).into_response())
}

/// JSON lookup endpoint.
async fn nearby_api(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyReport>, AppError> {
    let report = state.nearby.lookup(&query.place).await?;
    Ok(Json(report))
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// HTTP status for a pipeline failure.
fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::InvalidPlace(_) => StatusCode::BAD_REQUEST,
        PipelineError::PlaceNotFound { .. } => StatusCode::NOT_FOUND,
        PipelineError::Geocoding(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        let message = e.user_message().to_string();
        match status_for(&e) {
            StatusCode::BAD_REQUEST => AppError::BadRequest { message },
            StatusCode::NOT_FOUND => AppError::NotFound { message },
            _ => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
