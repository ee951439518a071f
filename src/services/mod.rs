//! Services module
//!
//! Motor de reportes: funciones puras que reciben registros ya cargados
//! por el repositorio y devuelven las estructuras de salida. Ningún
//! servicio accede a la base de datos ni al reloj del sistema.

pub mod aggregation;
pub mod forecast_service;
pub mod maintenance_cost_service;
pub mod parts_usage_service;
pub mod utilization_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use forecast_service::{service_forecast, DEFAULT_FORECAST_MONTHS};
pub use maintenance_cost_service::{maintenance_costs, CostGrouping};
pub use parts_usage_service::parts_usage_report;
pub use utilization_service::vehicle_utilization;
