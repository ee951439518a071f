use serde::Deserialize;

use crate::utils::errors::{bad_request_error, AppResult};

// Query string de repuestos compatibles
#[derive(Debug, Default, Deserialize)]
pub struct CompatiblePartsQuery {
    pub vehicle_id: Option<String>,
}

impl CompatiblePartsQuery {
    /// Id del vehículo; obligatorio y numérico
    pub fn vehicle_id(&self) -> AppResult<i64> {
        let raw = self
            .vehicle_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| bad_request_error("vehicle_id query parameter is required"))?;

        raw.parse()
            .map_err(|_| bad_request_error(&format!("Invalid vehicle_id: {}", raw)))
    }
}
