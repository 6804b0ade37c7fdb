use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::data::{AllocationInput, AllocationOutput, SeatAssignment};
use crate::error::ApiError;
use crate::report::{self, HallSummary, RoomLayout};
use crate::store::AllocationStore;

type SharedStore = Arc<AllocationStore>;
type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmResponse {
    confirmed: usize,
}

async fn generate_handler(
    State(store): State<SharedStore>,
    Json(input): Json<AllocationInput>,
) -> ApiResult<AllocationOutput> {
    match store.generate(&input) {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(ApiError::from(e).into()),
    }
}

async fn preview_handler(State(store): State<SharedStore>) -> ApiResult<AllocationOutput> {
    Ok(Json(store.preview()?))
}

async fn confirm_handler(State(store): State<SharedStore>) -> ApiResult<ConfirmResponse> {
    let confirmed = store.confirm()?;
    Ok(Json(ConfirmResponse { confirmed }))
}

async fn lookup_handler(
    State(store): State<SharedStore>,
    Path(regno): Path<String>,
) -> ApiResult<SeatAssignment> {
    Ok(Json(store.lookup(&regno)?))
}

async fn summary_handler(State(store): State<SharedStore>) -> ApiResult<Vec<HallSummary>> {
    let confirmed = store.confirmed()?;
    Ok(Json(report::hall_summaries(&confirmed)))
}

async fn layout_handler(State(store): State<SharedStore>) -> ApiResult<Vec<RoomLayout>> {
    let preview = store.preview()?;
    Ok(Json(report::room_layouts(&preview.assignments)))
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/v1/allocation/generate", post(generate_handler))
        .route("/v1/allocation/preview", get(preview_handler))
        .route("/v1/allocation/preview/layout", get(layout_handler))
        .route("/v1/allocation/confirm", post(confirm_handler))
        .route("/v1/allocation/summary", get(summary_handler))
        .route("/v1/allocation/lookup/:regno", get(lookup_handler))
        .with_state(store)
}

pub async fn run_server(bind: SocketAddr) -> std::io::Result<()> {
    let app = router(Arc::new(AllocationStore::new()));

    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
