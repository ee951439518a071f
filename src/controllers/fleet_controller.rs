use chrono::NaiveDate;
use std::sync::Arc;

use crate::dto::fleet_dto::CompatiblePartsQuery;
use crate::models::vehicle::VehicleServiceResponse;
use crate::models::{ServiceRecord, VehiclePart, VehiclePartCompatibility};
use crate::repositories::FleetRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct FleetController {
    repository: Arc<dyn FleetRepository>,
}

impl FleetController {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    /// Vehículos que requieren servicio a fecha de `today`
    pub async fn due_for_service(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<VehicleServiceResponse>> {
        let vehicles = self.repository.list_vehicles().await?;

        Ok(vehicles
            .into_iter()
            .filter(|v| v.service_due(today))
            .map(|v| VehicleServiceResponse::new(v, today))
            .collect())
    }

    /// Repuestos con stock igual o inferior al mínimo
    pub async fn low_stock(&self) -> AppResult<Vec<VehiclePart>> {
        let parts = self.repository.list_parts().await?;
        Ok(parts.into_iter().filter(VehiclePart::needs_reorder).collect())
    }

    pub async fn service_history(&self, vehicle_id: i64) -> AppResult<Vec<ServiceRecord>> {
        if self.repository.find_vehicle(vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }

        self.repository.list_vehicle_service_history(vehicle_id).await
    }

    /// Repuestos compatibles con el vehículo indicado en `vehicle_id`
    pub async fn compatible_parts(
        &self,
        query: &CompatiblePartsQuery,
    ) -> AppResult<Vec<VehiclePartCompatibility>> {
        let vehicle_id = query.vehicle_id()?;
        self.repository.list_compatible_parts(vehicle_id).await
    }
}
