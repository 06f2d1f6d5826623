use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use room_allocator::allocation::{
    try_allocate, AllocatedRoom, AllocationResult, AllocationSummary, Occupant, PassengerGroup,
    RoomInventory,
};
use room_allocator::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AllocationRequest {
    #[serde(default)]
    pub(crate) inventory: Option<RoomInventory>,
    #[serde(default)]
    pub(crate) groups: Vec<PassengerGroup>,
    #[serde(default)]
    pub(crate) include_summary: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AllocationResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) inventory: RoomInventory,
    pub(crate) family_rooms: Vec<AllocatedRoom>,
    pub(crate) men_rooms: Vec<AllocatedRoom>,
    pub(crate) women_rooms: Vec<AllocatedRoom>,
    pub(crate) unallocated: Vec<Occupant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<AllocationSummary>,
}

impl AllocationResponse {
    pub(crate) fn new(
        inventory: RoomInventory,
        result: AllocationResult,
        include_summary: bool,
    ) -> Self {
        let summary = include_summary.then(|| result.summary(&inventory));
        let AllocationResult {
            family_rooms,
            men_rooms,
            women_rooms,
            unallocated,
        } = result;

        Self {
            generated_at: Utc::now(),
            inventory,
            family_rooms,
            men_rooms,
            women_rooms,
            unallocated,
            summary,
        }
    }
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/allocations", post(allocation_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn allocation_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AllocationRequest>,
) -> Result<Json<AllocationResponse>, AppError> {
    let AllocationRequest {
        inventory,
        groups,
        include_summary,
    } = payload;

    let inventory = inventory.unwrap_or(state.default_inventory);
    let result = try_allocate(&inventory, &groups)?;
    info!(
        groups = groups.len(),
        rooms = inventory.total_rooms(),
        placed = result.placed_people(),
        unallocated = result.unallocated_people(),
        "allocation served"
    );

    Ok(Json(AllocationResponse::new(inventory, result, include_summary)))
}
