//! DTOs de la API
//!
//! Parámetros de query string de los endpoints de reportes y de flota.

pub mod fleet_dto;
pub mod report_dto;
