//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo que consume el motor de reportes
//! y los cálculos derivados de su intervalo de servicio.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Días que se cuentan por cada mes de intervalo de servicio
pub const DAYS_PER_INTERVAL_MONTH: i64 = 30;

/// Margen para considerar un servicio como próximo
pub const DUE_SOON_DAYS: i64 = 30;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    OffRoad,
    Decommissioned,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::OffRoad => "off_road",
            VehicleStatus::Decommissioned => "decommissioned",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(VehicleStatus::Active),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            "off_road" => Ok(VehicleStatus::OffRoad),
            "decommissioned" => Ok(VehicleStatus::Decommissioned),
            other => Err(format!("unknown vehicle status '{}'", other)),
        }
    }
}

/// Indicador de vencimiento del próximo servicio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceDueStatus {
    Ok,
    DueSoon,
    Overdue,
}

fn default_interval_months() -> i32 {
    6
}

fn default_interval_miles() -> i32 {
    10_000
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleRecord {
    pub id: i64,
    pub name: String,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    #[serde(default)]
    pub current_mileage: i32,
    #[serde(default)]
    pub last_service_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_service_mileage: Option<i32>,
    #[serde(default = "default_interval_months")]
    pub service_interval_months: i32,
    #[serde(default = "default_interval_miles")]
    pub service_interval_miles: i32,
}

impl VehicleRecord {
    pub fn make_model(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Intervalo de servicio en días (bloques de 30 días por mes).
    /// `None` si el intervalo no es representable como duración.
    pub fn service_interval(&self) -> Option<Duration> {
        Duration::try_days(i64::from(self.service_interval_months) * DAYS_PER_INTERVAL_MONTH)
    }

    /// Próxima fecha de servicio; `None` sin historial o si cae fuera del calendario
    pub fn next_service_date(&self) -> Option<NaiveDate> {
        let last = self.last_service_date?;
        last.checked_add_signed(self.service_interval()?)
    }

    /// Próximo kilometraje de servicio
    pub fn next_service_mileage(&self) -> Option<i64> {
        self.last_service_mileage
            .map(|last| i64::from(last) + i64::from(self.service_interval_miles))
    }

    fn has_complete_history(&self) -> bool {
        self.last_service_date.is_some() && self.last_service_mileage.is_some()
    }

    /// Un vehículo sin historial completo siempre requiere servicio
    pub fn service_due(&self, today: NaiveDate) -> bool {
        if !self.has_complete_history() {
            return true;
        }

        let date_due = self.next_service_date().is_some_and(|next| next <= today);
        let mileage_due = self
            .next_service_mileage()
            .is_some_and(|next| i64::from(self.current_mileage) >= next);
        date_due || mileage_due
    }

    pub fn service_due_status(&self, today: NaiveDate) -> ServiceDueStatus {
        if self.last_service_date.is_none() {
            return ServiceDueStatus::Overdue;
        }
        // Fecha fuera del calendario: nunca vence
        let Some(next_date) = self.next_service_date() else {
            return ServiceDueStatus::Ok;
        };

        let days_until_service = (next_date - today).num_days();
        if days_until_service < 0 {
            ServiceDueStatus::Overdue
        } else if days_until_service <= DUE_SOON_DAYS {
            ServiceDueStatus::DueSoon
        } else {
            ServiceDueStatus::Ok
        }
    }
}

/// Fila de la tabla de vehículos tal como llega de PostgreSQL
#[derive(Debug, FromRow)]
pub struct VehicleRow {
    pub id: i64,
    pub name: String,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: String,
    pub current_mileage: i32,
    pub last_service_date: Option<NaiveDate>,
    pub last_service_mileage: Option<i32>,
    pub service_interval_months: i32,
    pub service_interval_miles: i32,
}

impl TryFrom<VehicleRow> for VehicleRecord {
    type Error = String;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            registration: row.registration,
            make: row.make,
            model: row.model,
            year: row.year,
            status: row.status.parse()?,
            current_mileage: row.current_mileage,
            last_service_date: row.last_service_date,
            last_service_mileage: row.last_service_mileage,
            service_interval_months: row.service_interval_months,
            service_interval_miles: row.service_interval_miles,
        })
    }
}

/// Response de vehículo con su estado de servicio calculado
#[derive(Debug, Serialize)]
pub struct VehicleServiceResponse {
    #[serde(flatten)]
    pub vehicle: VehicleRecord,
    pub service_due: bool,
    pub service_due_status: ServiceDueStatus,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_mileage: Option<i64>,
}

impl VehicleServiceResponse {
    pub fn new(vehicle: VehicleRecord, today: NaiveDate) -> Self {
        Self {
            service_due: vehicle.service_due(today),
            service_due_status: vehicle.service_due_status(today),
            next_service_date: vehicle.next_service_date(),
            next_service_mileage: vehicle.next_service_mileage(),
            vehicle,
        }
    }
}
