use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::part::{CompatibilityRow, PartUsageRow};
use crate::models::vehicle::VehicleRow;
use crate::models::{
    PartUsageRecord, ServiceRecord, VehiclePart, VehiclePartCompatibility, VehicleRecord,
};
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::date_range::DateRange;
use crate::utils::errors::{AppError, AppResult};

const VEHICLE_COLUMNS: &str = r#"
    id::bigint AS id, name, registration, make, model, year, status,
    current_mileage, last_service_date, last_service_mileage,
    service_interval_months, service_interval_miles
"#;

const SERVICE_COLUMNS: &str = r#"
    id::bigint AS id, vehicle_id::bigint AS vehicle_id, service_date,
    mileage_at_service, service_type, cost
"#;

pub struct PgFleetRepository {
    pool: PgPool,
}

impl PgFleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_vehicle(row: VehicleRow) -> AppResult<VehicleRecord> {
        let id = row.id;
        VehicleRecord::try_from(row)
            .map_err(|e| AppError::Internal(format!("Vehicle {} has invalid data: {}", id, e)))
    }
}

#[async_trait]
impl FleetRepository for PgFleetRepository {
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicle_management_vehicle ORDER BY id",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        log::debug!("🚗 {} vehículos cargados", rows.len());
        rows.into_iter().map(Self::into_vehicle).collect()
    }

    async fn find_vehicle(&self, id: i64) -> AppResult<Option<VehicleRecord>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicle_management_vehicle WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        row.map(Self::into_vehicle).transpose()
    }

    async fn list_service_records(&self, range: &DateRange) -> AppResult<Vec<ServiceRecord>> {
        let services = sqlx::query_as::<_, ServiceRecord>(&format!(
            r#"
            SELECT {}
            FROM vehicle_management_servicerecord
            WHERE service_date BETWEEN $1 AND $2
            ORDER BY service_date, id
            "#,
            SERVICE_COLUMNS
        ))
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        log::debug!(
            "🔧 {} servicios entre {} y {}",
            services.len(),
            range.start,
            range.end
        );
        Ok(services)
    }

    async fn list_vehicle_service_history(&self, vehicle_id: i64) -> AppResult<Vec<ServiceRecord>> {
        let services = sqlx::query_as::<_, ServiceRecord>(&format!(
            r#"
            SELECT {}
            FROM vehicle_management_servicerecord
            WHERE vehicle_id = $1
            ORDER BY service_date DESC, id DESC
            "#,
            SERVICE_COLUMNS
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(services)
    }

    async fn list_parts(&self) -> AppResult<Vec<VehiclePart>> {
        let parts = sqlx::query_as::<_, VehiclePart>(
            r#"
            SELECT id::bigint AS id, part_number, description, current_stock, minimum_stock
            FROM vehicle_management_vehiclepart
            ORDER BY part_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(parts)
    }

    async fn list_compatible_parts(
        &self,
        vehicle_id: i64,
    ) -> AppResult<Vec<VehiclePartCompatibility>> {
        let Some(vehicle) = self.find_vehicle(vehicle_id).await? else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, CompatibilityRow>(
            r#"
            SELECT
                c.id::bigint AS id,
                p.id::bigint AS part_id,
                p.part_number,
                p.description,
                p.current_stock,
                p.minimum_stock
            FROM vehicle_management_vehiclepartcompatibility c
            JOIN vehicle_management_vehiclepart p ON p.id = c.part_id
            WHERE c.vehicle_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        log::debug!("🔩 {} repuestos compatibles con vehículo {}", rows.len(), vehicle_id);
        Ok(rows
            .into_iter()
            .map(|row| row.into_compatibility(vehicle.clone()))
            .collect())
    }

    async fn list_part_usages(&self, range: &DateRange) -> AppResult<Vec<PartUsageRecord>> {
        let rows = sqlx::query_as::<_, PartUsageRow>(
            r#"
            SELECT
                u.service_id::bigint AS service_id,
                p.id::bigint AS part_id,
                p.part_number,
                p.description,
                p.current_stock,
                p.minimum_stock,
                u.quantity
            FROM vehicle_management_servicepartusage u
            JOIN vehicle_management_servicerecord s ON s.id = u.service_id
            JOIN vehicle_management_vehiclepart p ON p.id = u.part_id
            WHERE s.service_date BETWEEN $1 AND $2
            ORDER BY u.id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        log::debug!("📦 {} consumos de repuestos cargados", rows.len());
        Ok(rows.into_iter().map(PartUsageRecord::from).collect())
    }
}
