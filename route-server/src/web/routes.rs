//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::DomainError;
use crate::planner::{Planner, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/nodes/search", get(search_nodes))
        .route("/routes/plan", post(plan_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search locations by ID.
async fn search_nodes(
    State(state): State<AppState>,
    Query(req): Query<NodeSearchRequest>,
) -> Json<NodeSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let nodes = state
        .graph
        .search_nodes(&req.q, limit)
        .into_iter()
        .map(NodeResult::from_location)
        .collect();

    Json(NodeSearchResponse { nodes })
}

/// Plan up to `top_n` routes between two locations.
async fn plan_routes(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so the body can be logged on failure
    let req: PlanRoutesRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let query = req.to_query(state.config.default_top_n)?;

    if let Some(cached) = state.cache.get(&query).await {
        debug!(start = %query.start, goal = %query.goal, "route cache hit");
        return Ok(Json(PlanRoutesResponse::from_result(&cached)).into_response());
    }

    // The search is CPU-bound; keep it off the async workers
    let worker_state = state.clone();
    let worker_query = query.clone();
    let result = tokio::task::spawn_blocking(move || {
        let planner = Planner::new(
            &worker_state.graph,
            &worker_state.tables,
            &worker_state.config,
        );
        planner.find_routes(&worker_query)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })??;

    let result = Arc::new(result);
    if !result.truncated {
        state.cache.insert(&query, result.clone()).await;
    }

    Ok(Json(PlanRoutesResponse::from_result(&result)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::InvalidRequest(_) => AppError::BadRequest { message },
            SearchError::NodeNotFound(_) => AppError::NotFound { message },
            SearchError::ExcludedEndpoint { .. } | SearchError::NoRouteFound { .. } => {
                AppError::Unprocessable { message }
            }
            SearchError::SearchLimitReached { .. } => AppError::Unavailable { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
