//! Utilización de vehículos
//!
//! Cada servicio registrado cuenta como un día fuera de operación.

use tracing::debug;

use crate::models::reports::VehicleUtilization;
use crate::models::{ServiceRecord, VehicleRecord};
use crate::services::aggregation::{round_two, CostTally};
use crate::utils::date_range::DateRange;

/// Porcentaje de días operativos del rango, con dos decimales
pub fn utilization_percentage(total_days: i64, downtime_days: i64) -> f64 {
    if total_days <= 0 {
        return 0.0;
    }
    let available = (total_days - downtime_days) as f64;
    round_two(available / total_days as f64 * 100.0)
}

fn utilization_for(
    vehicle: &VehicleRecord,
    services: &[ServiceRecord],
    range: &DateRange,
) -> VehicleUtilization {
    let mut history: Vec<&ServiceRecord> = services
        .iter()
        .filter(|s| s.vehicle_id == vehicle.id && range.contains(s.service_date))
        .collect();
    history.sort_by_key(|s| (s.service_date, s.id));

    let tally = CostTally::from_records(history.iter().copied());
    let downtime_days = i64::from(tally.count);

    let earliest = history.first();
    let latest = history.last();

    let latest_mileage = latest
        .map(|s| s.mileage_at_service)
        .unwrap_or(vehicle.current_mileage);
    let mileage_change = match (earliest, latest) {
        (Some(first), Some(last)) if first.id != last.id => {
            last.mileage_at_service - first.mileage_at_service
        }
        _ => 0,
    };

    VehicleUtilization {
        id: vehicle.id,
        name: vehicle.name.clone(),
        registration: vehicle.registration.clone(),
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        year: vehicle.year,
        total_services: tally.count,
        total_cost: tally.total_f64(),
        downtime_days,
        utilization_percentage: utilization_percentage(range.total_days(), downtime_days),
        latest_mileage,
        mileage_change,
    }
}

/// Métricas de utilización por vehículo, en el orden del listado recibido
pub fn vehicle_utilization(
    vehicles: &[VehicleRecord],
    services: &[ServiceRecord],
    range: &DateRange,
) -> Vec<VehicleUtilization> {
    debug!(
        "🚗 Calculando utilización de {} vehículos entre {} y {}",
        vehicles.len(),
        range.start,
        range.end
    );

    vehicles
        .iter()
        .map(|vehicle| utilization_for(vehicle, services, range))
        .collect()
}
