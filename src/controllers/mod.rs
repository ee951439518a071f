//! Controladores
//!
//! Piden los registros al repositorio y delegan el cálculo en `services`.

pub mod fleet_controller;
pub mod report_controller;

pub use fleet_controller::FleetController;
pub use report_controller::ReportController;
