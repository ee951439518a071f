//! Fleet Reporting
//!
//! Servicio de reportes de mantenimiento de flota: previsión de servicios,
//! utilización de vehículos, costos de mantenimiento y consumo de repuestos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
