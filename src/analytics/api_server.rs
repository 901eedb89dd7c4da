//! REST API server for ticket and statistics endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use super::{
    cache::SummaryCache,
    models::{SearchResult, SolutionGuide, TicketStatsSummary},
    playbook::solution_guides,
    search::search,
};
use crate::error::{DeskError, ErrorCode, Result};
use crate::tickets::{Priority, Status, Ticket, TicketStore};

/// Results returned by `/api/search` when no limit is given
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// API server exposing a ticket store and its statistics
pub struct TicketApiServer {
    state: ApiState,
    host: String,
    port: u16,
}

impl TicketApiServer {
    pub fn new(store: Arc<TicketStore>, cache: Arc<SummaryCache>, host: &str, port: u16) -> Self {
        Self {
            state: ApiState { store, cache },
            host: host.to_string(),
            port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr = self.address();
        let app = build_router(self.state);

        info!("Starting ticket API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            DeskError::server_with_code(
                ErrorCode::SERVER_BIND_FAILED,
                "Failed to bind listener",
                Some(addr.clone()),
            )
            .with_source(e)
        })?;
        axum::serve(listener, app).await.map_err(|e| {
            DeskError::server_with_code(
                ErrorCode::SERVER_SHUTDOWN,
                "Server stopped unexpectedly",
                Some(addr.clone()),
            )
            .with_source(e)
        })?;

        Ok(())
    }
}

/// Build the API router over shared state
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/tickets", get(list_tickets))
        .route("/api/tickets/active", get(active_tickets))
        .route("/api/tickets/history", get(ticket_history))
        .route("/api/tickets/{id}", get(get_ticket))
        .route("/api/stats", get(get_stats))
        .route("/api/solutions", get(get_solutions))
        .route("/api/search", get(search_tickets))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Shared API state
#[derive(Clone)]
pub struct ApiState {
    store: Arc<TicketStore>,
    cache: Arc<SummaryCache>,
}

impl ApiState {
    pub fn new(store: Arc<TicketStore>, cache: Arc<SummaryCache>) -> Self {
        Self { store, cache }
    }
}

/// Ticket list filters
#[derive(Debug, Default, Deserialize)]
struct TicketQuery {
    status: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<usize>,
}

/// API response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    tickets: usize,
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, StatusCode>;

// API Handlers

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<HealthReport>> {
    Json(ApiResponse::success(HealthReport {
        status: "ok",
        tickets: state.store.len(),
    }))
}

async fn list_tickets(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<TicketQuery>,
) -> ApiResult<Vec<Ticket>> {
    let status = match params.status.as_deref().map(str::parse::<Status>).transpose() {
        Ok(status) => status,
        Err(e) => return Ok(Json(ApiResponse::error(e))),
    };
    let priority = match params
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()
    {
        Ok(priority) => priority,
        Err(e) => return Ok(Json(ApiResponse::error(e))),
    };

    let tickets = state.store.filter(status, priority);
    debug!("Listing {} tickets", tickets.len());
    Ok(Json(ApiResponse::success(
        tickets.into_iter().cloned().collect(),
    )))
}

async fn active_tickets(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Ticket>> {
    Ok(Json(ApiResponse::success(
        state.store.active_queue().into_iter().cloned().collect(),
    )))
}

async fn ticket_history(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Ticket>> {
    Ok(Json(ApiResponse::success(
        state.store.history().into_iter().cloned().collect(),
    )))
}

async fn get_ticket(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Ticket> {
    match state.store.require(&id) {
        Ok(ticket) => Ok(Json(ApiResponse::success(ticket.clone()))),
        Err(e) => Ok(Json(ApiResponse::error(e.user_message()))),
    }
}

async fn get_stats(State(state): State<Arc<ApiState>>) -> ApiResult<TicketStatsSummary> {
    match state.cache.get_or_compute(state.store.all()).await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary.as_ref().clone()))),
        Err(e) => {
            warn!("Failed to compute ticket statistics: {}", e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to compute statistics: {}",
                e.user_message()
            ))))
        }
    }
}

async fn get_solutions(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<SolutionGuide>> {
    match state.cache.get_or_compute(state.store.all()).await {
        Ok(summary) => Ok(Json(ApiResponse::success(solution_guides(
            &summary.common_solutions,
        )))),
        Err(e) => {
            warn!("Failed to compute solution guides: {}", e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to compute solutions: {}",
                e.user_message()
            ))))
        }
    }
}

async fn search_tickets(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<SearchResult>> {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(ApiResponse::success(search(
        state.store.all(),
        &query,
        limit,
    ))))
}
