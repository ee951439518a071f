//! Costos de mantenimiento
//!
//! Agrupa el costo de los servicios del rango por mes calendario,
//! por vehículo o por tipo de servicio.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::models::reports::{MaintenanceCostReport, MonthlyCost, ServiceTypeCost, VehicleCost};
use crate::models::{ServiceRecord, VehicleRecord};
use crate::services::aggregation::{sort_descending_by, tally_by, CostTally};
use crate::utils::date_range::{months_covering, DateRange};
use crate::utils::errors::AppError;

/// Modo de agrupación del reporte de costos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostGrouping {
    #[default]
    Month,
    Vehicle,
    ServiceType,
}

impl CostGrouping {
    pub const VALID_OPTIONS: &'static str = "month, vehicle, service_type";

    pub fn as_str(&self) -> &'static str {
        match self {
            CostGrouping::Month => "month",
            CostGrouping::Vehicle => "vehicle",
            CostGrouping::ServiceType => "service_type",
        }
    }
}

impl fmt::Display for CostGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostGrouping {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "month" => Ok(CostGrouping::Month),
            "vehicle" => Ok(CostGrouping::Vehicle),
            "service_type" => Ok(CostGrouping::ServiceType),
            other => Err(AppError::BadRequest(format!(
                "Invalid group_by parameter: {}. Valid options: {}",
                other,
                Self::VALID_OPTIONS
            ))),
        }
    }
}

fn in_range<'a>(
    services: &'a [ServiceRecord],
    range: &'a DateRange,
) -> impl Iterator<Item = &'a ServiceRecord> + 'a {
    services.iter().filter(move |s| range.contains(s.service_date))
}

/// Totales por mes calendario, en orden cronológico
pub fn costs_by_month(services: &[ServiceRecord], range: &DateRange) -> Vec<MonthlyCost> {
    months_covering(range)
        .iter()
        .map(|month| {
            let tally = CostTally::from_records(
                in_range(services, range).filter(|s| month.contains(s.service_date)),
            );

            MonthlyCost {
                period: month.label(),
                total_cost: tally.total_f64(),
                service_count: tally.count,
            }
        })
        .collect()
}

/// Totales por vehículo con al menos un servicio, de mayor a menor costo
pub fn costs_by_vehicle(
    vehicles: &[VehicleRecord],
    services: &[ServiceRecord],
    range: &DateRange,
) -> Vec<VehicleCost> {
    let tallies: HashMap<i64, CostTally> = tally_by(in_range(services, range), |s| s.vehicle_id)
        .into_iter()
        .collect();

    let mut rows: Vec<VehicleCost> = vehicles
        .iter()
        .filter_map(|vehicle| {
            tallies.get(&vehicle.id).map(|tally| VehicleCost {
                vehicle_id: vehicle.id,
                name: vehicle.name.clone(),
                registration: vehicle.registration.clone(),
                make_model: vehicle.make_model(),
                total_cost: tally.total_f64(),
                service_count: tally.count,
                avg_cost_per_service: tally.average_f64(),
            })
        })
        .collect();

    sort_descending_by(&mut rows, |row| row.total_cost);
    rows
}

/// Totales por etiqueta exacta de tipo de servicio, de mayor a menor costo
pub fn costs_by_service_type(
    services: &[ServiceRecord],
    range: &DateRange,
) -> Vec<ServiceTypeCost> {
    let groups = tally_by(in_range(services, range), |s| s.service_type.clone());
    let mut rows: Vec<ServiceTypeCost> = groups
        .into_iter()
        .map(|(service_type, tally)| ServiceTypeCost {
            service_type,
            total_cost: tally.total_f64(),
            service_count: tally.count,
            avg_cost_per_service: tally.average_f64(),
        })
        .collect();

    sort_descending_by(&mut rows, |row| row.total_cost);
    rows
}

pub fn maintenance_costs(
    vehicles: &[VehicleRecord],
    services: &[ServiceRecord],
    range: &DateRange,
    grouping: CostGrouping,
) -> MaintenanceCostReport {
    let report = match grouping {
        CostGrouping::Month => MaintenanceCostReport::Monthly(costs_by_month(services, range)),
        CostGrouping::Vehicle => {
            MaintenanceCostReport::ByVehicle(costs_by_vehicle(vehicles, services, range))
        }
        CostGrouping::ServiceType => {
            MaintenanceCostReport::ByServiceType(costs_by_service_type(services, range))
        }
    };

    debug!("💰 Reporte de costos agrupado por {}: {} filas", grouping, report.len());
    report
}
