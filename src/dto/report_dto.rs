use serde::Deserialize;

use crate::services::CostGrouping;
use crate::utils::errors::AppResult;

// Query string común a los reportes con rango de fechas
#[derive(Debug, Default, Deserialize)]
pub struct ReportDateQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// Query string del reporte de costos de mantenimiento
#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceCostQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
}

impl MaintenanceCostQuery {
    /// Agrupación solicitada; `month` si no se indica
    pub fn grouping(&self) -> AppResult<CostGrouping> {
        match self.group_by.as_deref() {
            None | Some("") => Ok(CostGrouping::default()),
            Some(value) => value.parse(),
        }
    }
}
