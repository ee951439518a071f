//! Modelos de inventario de repuestos
//!
//! Repuestos, su compatibilidad con vehículos y su consumo en cada servicio.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::vehicle::VehicleRecord;

/// Repuesto del inventario
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehiclePart {
    pub id: i64,
    pub part_number: String,
    pub description: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
}

impl VehiclePart {
    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

/// Repuesto consumido en un servicio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartUsageRecord {
    pub service_id: i64,
    pub part: VehiclePart,
    pub quantity: i32,
}

/// Fila de consumo unida con su repuesto
#[derive(Debug, FromRow)]
pub struct PartUsageRow {
    pub service_id: i64,
    pub part_id: i64,
    pub part_number: String,
    pub description: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub quantity: i32,
}

impl From<PartUsageRow> for PartUsageRecord {
    fn from(row: PartUsageRow) -> Self {
        Self {
            service_id: row.service_id,
            part: VehiclePart {
                id: row.part_id,
                part_number: row.part_number,
                description: row.description,
                current_stock: row.current_stock,
                minimum_stock: row.minimum_stock,
            },
            quantity: row.quantity,
        }
    }
}

/// Repuesto compatible con un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehiclePartCompatibility {
    pub id: i64,
    pub vehicle: VehicleRecord,
    pub part: VehiclePart,
}

/// Fila de compatibilidad unida con su repuesto
#[derive(Debug, FromRow)]
pub struct CompatibilityRow {
    pub id: i64,
    pub part_id: i64,
    pub part_number: String,
    pub description: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
}

impl CompatibilityRow {
    pub fn into_compatibility(self, vehicle: VehicleRecord) -> VehiclePartCompatibility {
        VehiclePartCompatibility {
            id: self.id,
            vehicle,
            part: VehiclePart {
                id: self.part_id,
                part_number: self.part_number,
                description: self.description,
                current_stock: self.current_stock,
                minimum_stock: self.minimum_stock,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_reorder_at_minimum() {
        let mut part = VehiclePart {
            id: 7,
            part_number: "OF-100".to_string(),
            description: "Oil filter".to_string(),
            current_stock: 5,
            minimum_stock: 5,
        };
        assert!(part.needs_reorder());

        part.current_stock = 6;
        assert!(!part.needs_reorder());
    }
}
