//! Contrato de acceso a datos de la flota
//!
//! El motor de reportes nunca consulta la base de datos directamente:
//! los controladores piden los registros a un `FleetRepository` y
//! pasan los resultados a las funciones de `services`.

use async_trait::async_trait;

use crate::models::{
    PartUsageRecord, ServiceRecord, VehiclePart, VehiclePartCompatibility, VehicleRecord,
};
use crate::utils::date_range::DateRange;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// Todos los vehículos, ordenados por id
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>>;

    async fn find_vehicle(&self, id: i64) -> AppResult<Option<VehicleRecord>>;

    /// Servicios cuya fecha cae dentro de `range`
    async fn list_service_records(&self, range: &DateRange) -> AppResult<Vec<ServiceRecord>>;

    /// Historial completo de un vehículo, del más reciente al más antiguo
    async fn list_vehicle_service_history(&self, vehicle_id: i64) -> AppResult<Vec<ServiceRecord>>;

    /// Todos los repuestos, ordenados por número de pieza
    async fn list_parts(&self) -> AppResult<Vec<VehiclePart>>;

    /// Repuestos compatibles con un vehículo, por id de compatibilidad.
    /// Un vehículo inexistente no tiene repuestos compatibles.
    async fn list_compatible_parts(
        &self,
        vehicle_id: i64,
    ) -> AppResult<Vec<VehiclePartCompatibility>>;

    /// Consumos de repuestos de los servicios dentro de `range`
    async fn list_part_usages(&self, range: &DateRange) -> AppResult<Vec<PartUsageRecord>>;
}
