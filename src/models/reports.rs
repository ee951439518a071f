//! Modelos de reportes
//!
//! Este módulo contiene las estructuras de salida del motor de reportes.
//! Los importes se exponen como `f64` en el JSON de respuesta.

use serde::{Deserialize, Serialize};

/// Previsión de servicios para un mes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceForecastEntry {
    /// Etiqueta del mes, p. ej. "Jan 2024"
    pub name: String,
    pub scheduled: u32,
    pub predicted: u32,
}

/// Utilización de un vehículo en el rango solicitado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleUtilization {
    pub id: i64,
    pub name: String,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub total_services: u32,
    pub total_cost: f64,
    pub downtime_days: i64,
    pub utilization_percentage: f64,
    pub latest_mileage: i32,
    pub mileage_change: i32,
}

/// Costos de mantenimiento de un mes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyCost {
    pub period: String,
    pub total_cost: f64,
    pub service_count: u32,
}

/// Costos de mantenimiento de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleCost {
    pub vehicle_id: i64,
    pub name: String,
    pub registration: String,
    pub make_model: String,
    pub total_cost: f64,
    pub service_count: u32,
    pub avg_cost_per_service: f64,
}

/// Costos de mantenimiento por tipo de servicio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceTypeCost {
    pub service_type: String,
    pub total_cost: f64,
    pub service_count: u32,
    pub avg_cost_per_service: f64,
}

/// Reporte de costos; la forma depende de la agrupación
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MaintenanceCostReport {
    Monthly(Vec<MonthlyCost>),
    ByVehicle(Vec<VehicleCost>),
    ByServiceType(Vec<ServiceTypeCost>),
}

impl MaintenanceCostReport {
    pub fn len(&self) -> usize {
        match self {
            MaintenanceCostReport::Monthly(rows) => rows.len(),
            MaintenanceCostReport::ByVehicle(rows) => rows.len(),
            MaintenanceCostReport::ByServiceType(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Consumo de un repuesto en un mes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyQuantity {
    pub month: String,
    pub quantity: i64,
}

/// Consumo agregado de un repuesto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartUsageSummary {
    pub part_id: i64,
    pub part_number: String,
    pub description: String,
    pub total_quantity: i64,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub usage_by_month: Vec<MonthlyQuantity>,
}
