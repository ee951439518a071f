//! Middleware del sistema
//!
//! Configuración de CORS de la API.

pub mod cors;

pub use cors::*;
