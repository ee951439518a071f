//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de parámetros y rangos de fechas.

pub mod date_range;
pub mod errors;
pub mod validation;

pub use date_range::{DateRange, MonthBucket};
pub use errors::{AppError, AppResult};
