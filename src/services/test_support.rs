//! Constructores de registros para tests unitarios

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{PartUsageRecord, ServiceRecord, VehiclePart, VehicleRecord, VehicleStatus};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn vehicle(id: i64, name: &str) -> VehicleRecord {
    VehicleRecord {
        id,
        name: name.to_string(),
        registration: format!("REG{:03}", id),
        make: "Toyota".to_string(),
        model: "Hilux".to_string(),
        year: 2021,
        status: VehicleStatus::Active,
        current_mileage: 40_000,
        last_service_date: None,
        last_service_mileage: None,
        service_interval_months: 6,
        service_interval_miles: 10_000,
    }
}

pub fn service(
    id: i64,
    vehicle_id: i64,
    service_date: &str,
    service_type: &str,
    cost: Option<&str>,
) -> ServiceRecord {
    ServiceRecord {
        id,
        vehicle_id,
        service_date: date(service_date),
        mileage_at_service: 0,
        service_type: service_type.to_string(),
        cost: cost.map(|c| Decimal::from_str(c).unwrap()),
    }
}

pub fn part(id: i64, part_number: &str) -> VehiclePart {
    VehiclePart {
        id,
        part_number: part_number.to_string(),
        description: format!("Part {}", part_number),
        current_stock: 10,
        minimum_stock: 5,
    }
}

pub fn usage(service_id: i64, part: &VehiclePart, quantity: i32) -> PartUsageRecord {
    PartUsageRecord {
        service_id,
        part: part.clone(),
        quantity,
    }
}
