//! Modelo de ServiceRecord
//!
//! Historial de mantenimiento de un vehículo.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Servicio realizado a un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ServiceRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub service_date: NaiveDate,
    pub mileage_at_service: i32,
    pub service_type: String,
    #[serde(default)]
    pub cost: Option<Decimal>,
}

impl ServiceRecord {
    /// Costo del servicio, cero si no fue registrado
    pub fn cost_or_zero(&self) -> Decimal {
        self.cost.unwrap_or(Decimal::ZERO)
    }
}
