//! Previsión de servicios
//!
//! Para cada mes de la ventana cuenta los servicios ya registrados
//! (`scheduled`) y los vehículos activos que probablemente lo necesiten
//! (`predicted`). La predicción es heurística: cada mes de intervalo
//! cuenta como 30 días y el exceso de kilometraje no se pondera.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::reports::ServiceForecastEntry;
use crate::models::{ServiceRecord, VehicleRecord, VehicleStatus};
use crate::utils::date_range::{months_forward, MonthBucket};

/// Meses de la ventana de previsión por defecto
pub const DEFAULT_FORECAST_MONTHS: u32 = 6;

pub fn is_active(vehicle: &VehicleRecord) -> bool {
    vehicle.status == VehicleStatus::Active
}

pub fn has_service_history(vehicle: &VehicleRecord) -> bool {
    vehicle.last_service_date.is_some()
}

/// El último servicio es anterior a `as_of` menos el intervalo en meses.
/// Si el umbral cae fuera del calendario el intervalo no se considera cumplido.
pub fn interval_elapsed(vehicle: &VehicleRecord, as_of: NaiveDate) -> bool {
    let threshold = vehicle
        .service_interval()
        .and_then(|interval| as_of.checked_sub_signed(interval));

    match (vehicle.last_service_date, threshold) {
        (Some(last), Some(threshold)) => last < threshold,
        _ => false,
    }
}

/// El kilometraje actual alcanzó el del último servicio más el intervalo
pub fn mileage_exceeded(vehicle: &VehicleRecord) -> bool {
    vehicle
        .next_service_mileage()
        .is_some_and(|next| i64::from(vehicle.current_mileage) >= next)
}

pub fn serviced_in(
    vehicle: &VehicleRecord,
    services: &[ServiceRecord],
    month: &MonthBucket,
) -> bool {
    services
        .iter()
        .any(|s| s.vehicle_id == vehicle.id && month.contains(s.service_date))
}

/// Vehículo que se prevé necesitará servicio en `month`
pub fn is_predicted_due(
    vehicle: &VehicleRecord,
    services: &[ServiceRecord],
    month: &MonthBucket,
) -> bool {
    let due = interval_elapsed(vehicle, month.end) || mileage_exceeded(vehicle);

    is_active(vehicle)
        && has_service_history(vehicle)
        && due
        && !serviced_in(vehicle, services, month)
}

/// Construir la previsión de `months` meses a partir del mes de `today`
pub fn service_forecast(
    vehicles: &[VehicleRecord],
    services: &[ServiceRecord],
    today: NaiveDate,
    months: u32,
) -> Vec<ServiceForecastEntry> {
    let forecast: Vec<ServiceForecastEntry> = months_forward(today, months)
        .iter()
        .map(|month| {
            let scheduled = services
                .iter()
                .filter(|s| month.contains(s.service_date))
                .count();
            let predicted = vehicles
                .iter()
                .filter(|v| is_predicted_due(v, services, month))
                .count();

            ServiceForecastEntry {
                name: month.label(),
                scheduled: scheduled as u32,
                predicted: predicted as u32,
            }
        })
        .collect();

    debug!(
        "📅 Previsión calculada: {} meses, {} vehículos, {} servicios",
        forecast.len(),
        vehicles.len(),
        services.len()
    );

    forecast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{date, service, vehicle};

    fn serviced_vehicle(id: i64, last_service: &str) -> VehicleRecord {
        let mut v = vehicle(id, "Van");
        v.last_service_date = Some(date(last_service));
        v.last_service_mileage = Some(30_000);
        v.current_mileage = 35_000;
        v
    }

    #[test]
    fn test_forecast_has_six_chronological_months() {
        let forecast = service_forecast(&[], &[], date("2024-11-20"), DEFAULT_FORECAST_MONTHS);
        let names: Vec<&str> = forecast.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025", "Apr 2025"]
        );
        assert!(forecast.iter().all(|f| f.scheduled == 0 && f.predicted == 0));
    }

    #[test]
    fn test_scheduled_counts_services_inside_month() {
        let services = vec![
            service(1, 9, "2024-11-01", "Service", None),
            service(2, 9, "2024-11-30", "Service", None),
            service(3, 9, "2024-12-01", "Service", None),
            service(4, 9, "2024-10-31", "Service", None),
        ];
        let forecast = service_forecast(&[], &services, date("2024-11-20"), 2);

        assert_eq!(forecast[0].scheduled, 2);
        assert_eq!(forecast[1].scheduled, 1);
    }

    #[test]
    fn test_interval_elapsed_uses_month_end() {
        // 180 días antes del 2024-12-31 es el 2024-07-04
        let v = serviced_vehicle(1, "2024-07-03");
        let december = MonthBucket::containing(date("2024-12-15"));
        let november = MonthBucket::containing(date("2024-11-15"));

        assert!(interval_elapsed(&v, december.end));
        assert!(!interval_elapsed(&v, november.end));

        let v = serviced_vehicle(1, "2024-07-04");
        assert!(!interval_elapsed(&v, december.end));
    }

    #[test]
    fn test_mileage_exceeded_requires_last_mileage() {
        let mut v = serviced_vehicle(1, "2024-10-01");
        v.current_mileage = 40_000;
        assert!(mileage_exceeded(&v));

        v.current_mileage = 39_999;
        assert!(!mileage_exceeded(&v));

        v.current_mileage = 90_000;
        v.last_service_mileage = None;
        assert!(!mileage_exceeded(&v));
    }

    #[test]
    fn test_predicted_requires_active_with_history() {
        let month = MonthBucket::containing(date("2024-11-15"));

        let mut inactive = serviced_vehicle(1, "2023-01-01");
        inactive.status = VehicleStatus::Maintenance;
        assert!(!is_predicted_due(&inactive, &[], &month));

        let mut no_history = vehicle(2, "New van");
        no_history.current_mileage = 1_000_000;
        no_history.last_service_mileage = Some(0);
        assert!(!is_predicted_due(&no_history, &[], &month));

        let overdue = serviced_vehicle(3, "2023-01-01");
        assert!(is_predicted_due(&overdue, &[], &month));
    }

    #[test]
    fn test_predicted_excludes_vehicles_already_scheduled() {
        let v = serviced_vehicle(3, "2023-01-01");
        let services = vec![service(10, 3, "2024-12-05", "Service", None)];
        let forecast = service_forecast(&[v], &services, date("2024-11-20"), 3);

        assert_eq!(forecast[0].predicted, 1);
        assert_eq!(forecast[1].predicted, 0);
        assert_eq!(forecast[1].scheduled, 1);
        assert_eq!(forecast[2].predicted, 1);
    }

    #[test]
    fn test_prediction_grows_as_interval_elapses() {
        let v = serviced_vehicle(4, "2024-06-15");
        let forecast = service_forecast(&[v], &[], date("2024-11-20"), 3);

        let predicted: Vec<u32> = forecast.iter().map(|f| f.predicted).collect();
        assert_eq!(predicted, vec![0, 1, 1]);
    }

    #[test]
    fn test_out_of_calendar_interval_is_not_elapsed() {
        let mut huge = serviced_vehicle(5, "2023-01-01");
        huge.service_interval_months = i32::MAX;
        huge.current_mileage = 0;
        let month = MonthBucket::containing(date("2024-11-15"));
        assert!(!interval_elapsed(&huge, month.end));

        let forecast = service_forecast(&[huge.clone()], &[], date("2024-11-20"), 6);
        assert_eq!(forecast.len(), 6);
        assert!(forecast.iter().all(|f| f.predicted == 0));

        huge.service_interval_months = i32::MIN;
        assert!(!interval_elapsed(&huge, month.end));
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let vehicles = vec![serviced_vehicle(1, "2023-01-01"), serviced_vehicle(2, "2024-10-01")];
        let services = vec![service(1, 2, "2024-11-02", "Service", Some("10"))];
        let today = date("2024-11-20");

        let first = service_forecast(&vehicles, &services, today, 6);
        let second = service_forecast(&vehicles, &services, today, 6);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
