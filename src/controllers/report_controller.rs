use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::config::environment::ReportSettings;
use crate::dto::report_dto::{MaintenanceCostQuery, ReportDateQuery};
use crate::models::reports::{
    MaintenanceCostReport, PartUsageSummary, ServiceForecastEntry, VehicleUtilization,
};
use crate::repositories::FleetRepository;
use crate::services;
use crate::utils::date_range::{months_forward, DateRange, MonthBucket};
use crate::utils::errors::AppResult;

pub struct ReportController {
    repository: Arc<dyn FleetRepository>,
    settings: ReportSettings,
}

impl ReportController {
    pub fn new(repository: Arc<dyn FleetRepository>, settings: ReportSettings) -> Self {
        Self { repository, settings }
    }

    fn resolve_range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<DateRange> {
        DateRange::resolve(start_date, end_date, today, self.settings.default_lookback_days)
    }

    pub async fn service_forecast(&self, today: NaiveDate) -> AppResult<Vec<ServiceForecastEntry>> {
        let months = months_forward(today, self.settings.forecast_months);
        let window = match (months.first(), months.last()) {
            (Some(first), Some(last)) => DateRange::new(first.start, last.end),
            _ => {
                let current = MonthBucket::containing(today);
                DateRange::new(current.start, current.end)
            }
        };

        let vehicles = self.repository.list_vehicles().await?;
        let scheduled = self.repository.list_service_records(&window).await?;

        info!(
            "📅 Previsión de servicios: {} meses desde {}",
            self.settings.forecast_months, window.start
        );
        Ok(services::service_forecast(
            &vehicles,
            &scheduled,
            today,
            self.settings.forecast_months,
        ))
    }

    pub async fn vehicle_utilization(
        &self,
        query: &ReportDateQuery,
        today: NaiveDate,
    ) -> AppResult<Vec<VehicleUtilization>> {
        let range = self.resolve_range(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            today,
        )?;

        let vehicles = self.repository.list_vehicles().await?;
        let service_records = self.repository.list_service_records(&range).await?;

        info!("🚗 Utilización de vehículos: {} a {}", range.start, range.end);
        Ok(services::vehicle_utilization(&vehicles, &service_records, &range))
    }

    pub async fn maintenance_costs(
        &self,
        query: &MaintenanceCostQuery,
        today: NaiveDate,
    ) -> AppResult<MaintenanceCostReport> {
        // Validar antes de consultar datos
        let grouping = query.grouping()?;
        let range = self.resolve_range(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            today,
        )?;

        let vehicles = self.repository.list_vehicles().await?;
        let service_records = self.repository.list_service_records(&range).await?;

        info!(
            "💰 Costos de mantenimiento por {}: {} a {}",
            grouping, range.start, range.end
        );
        Ok(services::maintenance_costs(&vehicles, &service_records, &range, grouping))
    }

    pub async fn parts_usage(
        &self,
        query: &ReportDateQuery,
        today: NaiveDate,
    ) -> AppResult<Vec<PartUsageSummary>> {
        let range = self.resolve_range(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            today,
        )?;

        let service_records = self.repository.list_service_records(&range).await?;
        let usages = self.repository.list_part_usages(&range).await?;

        info!("🔧 Consumo de repuestos: {} a {}", range.start, range.end);
        Ok(services::parts_usage_report(&service_records, &usages, &range))
    }
}
