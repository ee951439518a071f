//! Repositorio en memoria
//!
//! Sirve los reportes a partir de un snapshot JSON de la flota
//! (`FLEET_SNAPSHOT_PATH`) y se usa en los tests de la API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::models::{
    PartUsageRecord, ServiceRecord, VehiclePart, VehiclePartCompatibility, VehicleRecord,
};
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::date_range::DateRange;
use crate::utils::errors::{internal_error, AppError, AppResult};

/// Consumo tal como aparece en el snapshot, referenciando el repuesto por id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartUsageEntry {
    pub service_id: i64,
    pub part_id: i64,
    pub quantity: i32,
}

/// Compatibilidad repuesto-vehículo tal como aparece en el snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub id: i64,
    pub vehicle_id: i64,
    pub part_id: i64,
}

/// Contenido completo del snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
    #[serde(default)]
    pub service_records: Vec<ServiceRecord>,
    #[serde(default)]
    pub parts: Vec<VehiclePart>,
    #[serde(default)]
    pub part_usages: Vec<PartUsageEntry>,
    #[serde(default)]
    pub compatibilities: Vec<CompatibilityEntry>,
}

pub struct InMemoryFleetRepository {
    snapshot: FleetSnapshot,
}

impl InMemoryFleetRepository {
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let snapshot: FleetSnapshot = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid fleet snapshot: {}", e)))?;
        Ok(Self::new(snapshot))
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Cannot read fleet snapshot {}: {}", path.display(), e))
        })?;

        let repository = Self::from_json_str(&json)?;
        log::info!(
            "📂 Snapshot cargado desde {}: {} vehículos, {} servicios, {} repuestos",
            path.display(),
            repository.snapshot.vehicles.len(),
            repository.snapshot.service_records.len(),
            repository.snapshot.parts.len()
        );
        Ok(repository)
    }
}

#[async_trait]
impl FleetRepository for InMemoryFleetRepository {
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>> {
        let mut vehicles = self.snapshot.vehicles.clone();
        vehicles.sort_by_key(|v| v.id);
        Ok(vehicles)
    }

    async fn find_vehicle(&self, id: i64) -> AppResult<Option<VehicleRecord>> {
        Ok(self.snapshot.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn list_service_records(&self, range: &DateRange) -> AppResult<Vec<ServiceRecord>> {
        let mut services: Vec<ServiceRecord> = self
            .snapshot
            .service_records
            .iter()
            .filter(|s| range.contains(s.service_date))
            .cloned()
            .collect();
        services.sort_by_key(|s| (s.service_date, s.id));
        Ok(services)
    }

    async fn list_vehicle_service_history(&self, vehicle_id: i64) -> AppResult<Vec<ServiceRecord>> {
        let mut services: Vec<ServiceRecord> = self
            .snapshot
            .service_records
            .iter()
            .filter(|s| s.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        services.sort_by(|a, b| (b.service_date, b.id).cmp(&(a.service_date, a.id)));
        Ok(services)
    }

    async fn list_parts(&self) -> AppResult<Vec<VehiclePart>> {
        let mut parts = self.snapshot.parts.clone();
        parts.sort_by(|a, b| a.part_number.cmp(&b.part_number));
        Ok(parts)
    }

    async fn list_compatible_parts(
        &self,
        vehicle_id: i64,
    ) -> AppResult<Vec<VehiclePartCompatibility>> {
        let Some(vehicle) = self.snapshot.vehicles.iter().find(|v| v.id == vehicle_id) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<&CompatibilityEntry> = self
            .snapshot
            .compatibilities
            .iter()
            .filter(|c| c.vehicle_id == vehicle_id)
            .collect();
        entries.sort_by_key(|c| c.id);

        entries
            .into_iter()
            .map(|entry| -> AppResult<VehiclePartCompatibility> {
                let part = self
                    .snapshot
                    .parts
                    .iter()
                    .find(|p| p.id == entry.part_id)
                    .ok_or_else(|| {
                        internal_error(&format!(
                            "Compatibility {} references unknown part {}",
                            entry.id, entry.part_id
                        ))
                    })?;

                Ok(VehiclePartCompatibility {
                    id: entry.id,
                    vehicle: vehicle.clone(),
                    part: part.clone(),
                })
            })
            .collect()
    }

    async fn list_part_usages(&self, range: &DateRange) -> AppResult<Vec<PartUsageRecord>> {
        let parts: HashMap<i64, &VehiclePart> =
            self.snapshot.parts.iter().map(|p| (p.id, p)).collect();
        let services: HashMap<i64, &ServiceRecord> = self
            .snapshot
            .service_records
            .iter()
            .map(|s| (s.id, s))
            .collect();

        let mut usages = Vec::new();
        for entry in &self.snapshot.part_usages {
            let Some(service) = services.get(&entry.service_id) else {
                return Err(AppError::Internal(format!(
                    "Part usage references unknown service {}",
                    entry.service_id
                )));
            };
            if !range.contains(service.service_date) {
                continue;
            }
            let Some(part) = parts.get(&entry.part_id) else {
                return Err(AppError::Internal(format!(
                    "Part usage references unknown part {}",
                    entry.part_id
                )));
            };

            usages.push(PartUsageRecord {
                service_id: entry.service_id,
                part: (*part).clone(),
                quantity: entry.quantity,
            });
        }

        Ok(usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SNAPSHOT: &str = r#"{
        "vehicles": [
            {"id": 2, "name": "MAD 2", "registration": "1ABC234", "make": "Toyota",
             "model": "Hilux", "year": 2019, "status": "active", "current_mileage": 80000},
            {"id": 1, "name": "MAD 1", "registration": "1XYZ987", "make": "Ford",
             "model": "Ranger", "year": 2021, "status": "off_road",
             "last_service_date": "2024-01-10", "last_service_mileage": 20000}
        ],
        "service_records": [
            {"id": 10, "vehicle_id": 1, "service_date": "2024-01-10",
             "mileage_at_service": 20000, "service_type": "Service", "cost": "150.00"},
            {"id": 11, "vehicle_id": 1, "service_date": "2024-05-02",
             "mileage_at_service": 26000, "service_type": "Tyres", "cost": null}
        ],
        "parts": [
            {"id": 5, "part_number": "OF-100", "description": "Oil filter",
             "current_stock": 3, "minimum_stock": 5}
        ],
        "part_usages": [
            {"service_id": 10, "part_id": 5, "quantity": 1},
            {"service_id": 11, "part_id": 5, "quantity": 2}
        ],
        "compatibilities": [
            {"id": 3, "vehicle_id": 1, "part_id": 5},
            {"id": 1, "vehicle_id": 2, "part_id": 5}
        ]
    }"#;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_defaults_and_ordering() {
        let repository = InMemoryFleetRepository::from_json_str(SNAPSHOT).unwrap();
        let vehicles = repository.list_vehicles().await.unwrap();

        assert_eq!(vehicles[0].id, 1);
        assert_eq!(vehicles[1].service_interval_months, 6);
        assert_eq!(vehicles[1].service_interval_miles, 10_000);
        assert_eq!(vehicles[1].last_service_date, None);
    }

    #[tokio::test]
    async fn test_service_records_filtered_by_range() {
        let repository = InMemoryFleetRepository::from_json_str(SNAPSHOT).unwrap();
        let range = DateRange::new(date(2024, 2, 1), date(2024, 12, 31));

        let services = repository.list_service_records(&range).await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, 11);
        assert_eq!(services[0].cost, None);

        let usages = repository.list_part_usages(&range).await.unwrap();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].quantity, 2);
        assert_eq!(usages[0].part.part_number, "OF-100");
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let repository = InMemoryFleetRepository::from_json_str(SNAPSHOT).unwrap();
        let history = repository.list_vehicle_service_history(1).await.unwrap();

        let ids: Vec<i64> = history.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![11, 10]);
    }

    #[tokio::test]
    async fn test_dangling_part_reference_is_an_error() {
        let mut snapshot: FleetSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        snapshot.part_usages.push(PartUsageEntry {
            service_id: 10,
            part_id: 404,
            quantity: 1,
        });
        let repository = InMemoryFleetRepository::new(snapshot);
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));

        assert!(repository.list_part_usages(&range).await.is_err());
    }

    #[tokio::test]
    async fn test_compatible_parts_for_vehicle() {
        let repository = InMemoryFleetRepository::from_json_str(SNAPSHOT).unwrap();

        let compatible = repository.list_compatible_parts(1).await.unwrap();
        assert_eq!(compatible.len(), 1);
        assert_eq!(compatible[0].id, 3);
        assert_eq!(compatible[0].vehicle.name, "MAD 1");
        assert_eq!(compatible[0].part.part_number, "OF-100");

        assert!(repository.list_compatible_parts(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_compatibility_is_an_error() {
        let mut snapshot: FleetSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        snapshot.compatibilities.push(CompatibilityEntry {
            id: 9,
            vehicle_id: 1,
            part_id: 404,
        });
        let repository = InMemoryFleetRepository::new(snapshot);

        assert!(matches!(
            repository.list_compatible_parts(1).await,
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        assert!(InMemoryFleetRepository::from_json_str("{\"vehicles\": 3}").is_err());
    }
}
