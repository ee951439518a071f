//! Repositorios de datos
//!
//! Implementaciones del contrato `FleetRepository`: PostgreSQL con SQLx
//! y un snapshot JSON en memoria.

pub mod fleet_repository;
pub mod memory_repository;
pub mod pg_fleet_repository;

pub use fleet_repository::FleetRepository;
pub use memory_repository::{FleetSnapshot, InMemoryFleetRepository};
pub use pg_fleet_repository::PgFleetRepository;
