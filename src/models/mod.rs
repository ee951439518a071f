//! Modelos del sistema
//!
//! Este módulo contiene los registros de entrada del motor de reportes
//! (vehículos, servicios, repuestos) y las estructuras de salida.

pub mod part;
pub mod reports;
pub mod service_record;
pub mod vehicle;

pub use part::{PartUsageRecord, VehiclePart, VehiclePartCompatibility};
pub use service_record::ServiceRecord;
pub use vehicle::{VehicleRecord, VehicleStatus};
