//! HTTP surface of the gateway.

pub mod report_html;

use crate::application::gateway::PaymentGateway;
use crate::application::report::OutcomeReporter;
use crate::domain::outcome::Outcome;
use crate::error::GatewayError;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, OriginalUri, Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::error;

/// Largest payment request body accepted.
pub const MAX_BODY_BYTES: usize = 1_048_576;

pub struct AppState {
    pub gateway: PaymentGateway,
    pub reporter: OutcomeReporter,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/ping", get(ping))
        .route("/api/v1/payments", post(authorize))
        .route("/api/v1/payments/{transaction_id}", get(query_payment))
        .route("/report/payments/{transaction_id}", get(payment_report))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Pipeline error mapped to a bare 500. Logged with the path that was requested.
pub struct ApiError {
    path: String,
    source: GatewayError,
}

impl ApiError {
    pub fn new(path: impl Into<String>, source: GatewayError) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    fn on(uri: &Uri) -> impl FnOnce(GatewayError) -> Self {
        let path = uri.path().to_string();
        move |source| Self::new(path, source)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(path = %self.path, error = %self.source, "Error serving request");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, "no-cache")],
        )
            .into_response()
    }
}

async fn ping(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Outcome>, ApiError> {
    let outcome = state.gateway.ping().await.map_err(ApiError::on(&uri))?;
    Ok(Json(outcome))
}

async fn authorize(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Json<Outcome>, ApiError> {
    let outcome = state
        .gateway
        .authorize(&body)
        .await
        .map_err(ApiError::on(&uri))?;
    Ok(Json(outcome))
}

async fn query_payment(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(transaction_id): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let outcome = state
        .gateway
        .query(&transaction_id)
        .await
        .map_err(ApiError::on(&uri))?;
    Ok(Json(outcome))
}

async fn payment_report(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    let page = match state.reporter.report(&transaction_id).await {
        Ok(rsp) => report_html::render_transaction(&rsp),
        Err(e) => report_html::render_error(&e),
    };

    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONTENT_TYPE, "text/html; charset=UTF-8"),
        ],
        Html(page),
    )
}
