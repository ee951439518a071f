use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};

use crate::controllers::ReportController;
use crate::dto::report_dto::{MaintenanceCostQuery, ReportDateQuery};
use crate::models::reports::{
    MaintenanceCostReport, PartUsageSummary, ServiceForecastEntry, VehicleUtilization,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/service-forecast", get(service_forecast))
        .route("/vehicle-utilization", get(vehicle_utilization))
        .route("/maintenance-costs", get(maintenance_costs))
        .route("/parts-usage", get(parts_usage))
}

fn controller(state: &AppState) -> ReportController {
    ReportController::new(state.repository.clone(), state.config.reports.clone())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn service_forecast(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceForecastEntry>>, AppError> {
    let response = controller(&state).service_forecast(today()).await?;
    Ok(Json(response))
}

async fn vehicle_utilization(
    State(state): State<AppState>,
    query: Result<Query<ReportDateQuery>, QueryRejection>,
) -> Result<Json<Vec<VehicleUtilization>>, AppError> {
    let Query(query) = query?;
    let response = controller(&state).vehicle_utilization(&query, today()).await?;
    Ok(Json(response))
}

async fn maintenance_costs(
    State(state): State<AppState>,
    query: Result<Query<MaintenanceCostQuery>, QueryRejection>,
) -> Result<Json<MaintenanceCostReport>, AppError> {
    let Query(query) = query?;
    let response = controller(&state).maintenance_costs(&query, today()).await?;
    Ok(Json(response))
}

async fn parts_usage(
    State(state): State<AppState>,
    query: Result<Query<ReportDateQuery>, QueryRejection>,
) -> Result<Json<Vec<PartUsageSummary>>, AppError> {
    let Query(query) = query?;
    let response = controller(&state).parts_usage(&query, today()).await?;
    Ok(Json(response))
}
