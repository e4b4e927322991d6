//! HTTP API for the sales report.
//!
//! This module exposes a minimal REST API around the report engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! post the sellers, products and purchase records as JSON and receive
//! the ranked report back.  The server uses the reference revenue and
//! bonus strategies unless it is built with other ones.  Strategies
//! shared by the server must be `Send + Sync`; the engine itself does
//! not require it.

use crate::engine::analyze_json;
use crate::error::AnalysisError;
use crate::models::ReportRow;
use crate::strategy::{
    AnalysisOptions, BonusCalculator, ProfitRankBonus, RevenueCalculator, SimpleRevenue,
};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across requests.
#[derive(Clone, Default)]
pub struct AppState {
    pub calculate_revenue: Option<Arc<dyn RevenueCalculator + Send + Sync>>,
    pub calculate_bonus: Option<Arc<dyn BonusCalculator + Send + Sync>>,
}

impl AppState {
    /// State using [`SimpleRevenue`] and [`ProfitRankBonus`].
    pub fn reference() -> Self {
        Self {
            calculate_revenue: Some(Arc::new(SimpleRevenue)),
            calculate_bonus: Some(Arc::new(ProfitRankBonus)),
        }
    }

    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            calculate_revenue: self
                .calculate_revenue
                .clone()
                .map(|calculator| calculator as Arc<dyn RevenueCalculator>),
            calculate_bonus: self
                .calculate_bonus
                .clone()
                .map(|calculator| calculator as Arc<dyn BonusCalculator>),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: Vec<ReportRow>,
}

/// Build the API router around the given strategies.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Handler for POST /api/analyze
async fn analyze_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected report request body");
            return error_response(rejection.status(), "invalid_json", rejection.body_text());
        }
    };
    match analyze_json(&input, &app_state.options()) {
        Ok(report) => (StatusCode::OK, Json(ReportResponse { report })).into_response(),
        Err(err) => {
            warn!(error = %err, "rejected report request");
            let status = match err {
                AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AnalysisError::MissingStrategy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, err.code(), err.to_string())
        }
    }
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = Json(json!({"error": code, "message": message}));
    (status, body).into_response()
}

/// Launch the API server on `addr` with the reference strategies.  It
/// blocks until the server terminates (e.g. when interrupted).
pub async fn serve(addr: &str) -> Result<()> {
    let router = build_router(AppState::reference());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, router).await?;
    Ok(())
}
