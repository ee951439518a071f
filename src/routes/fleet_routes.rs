use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::controllers::FleetController;
use crate::dto::fleet_dto::CompatiblePartsQuery;
use crate::models::vehicle::VehicleServiceResponse;
use crate::models::{ServiceRecord, VehiclePart, VehiclePartCompatibility};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles/due-for-service", get(due_for_service))
        .route("/vehicles/:id/service-history", get(service_history))
        .route("/parts/low-stock", get(low_stock))
        .route("/compatible-parts", get(compatible_parts))
}

async fn due_for_service(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleServiceResponse>>, AppError> {
    let controller = FleetController::new(state.repository.clone());
    let response = controller.due_for_service(Utc::now().date_naive()).await?;
    Ok(Json(response))
}

async fn service_history(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ServiceRecord>>, AppError> {
    let Path(id) = id?;
    let controller = FleetController::new(state.repository.clone());
    let response = controller.service_history(id).await?;
    Ok(Json(response))
}

async fn low_stock(State(state): State<AppState>) -> Result<Json<Vec<VehiclePart>>, AppError> {
    let controller = FleetController::new(state.repository.clone());
    let response = controller.low_stock().await?;
    Ok(Json(response))
}

async fn compatible_parts(
    State(state): State<AppState>,
    query: Result<Query<CompatiblePartsQuery>, QueryRejection>,
) -> Result<Json<Vec<VehiclePartCompatibility>>, AppError> {
    let Query(query) = query?;
    let controller = FleetController::new(state.repository.clone());
    let response = controller.compatible_parts(&query).await?;
    Ok(Json(response))
}
