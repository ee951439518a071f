//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y los parámetros
//! de los reportes.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::services::forecast_service::DEFAULT_FORECAST_MONTHS;
use crate::utils::date_range::{DEFAULT_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS};

/// Parámetros del motor de reportes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Meses de la ventana de previsión de servicios
    pub forecast_months: u32,
    /// Días hacia atrás cuando el request no trae `start_date`
    pub default_lookback_days: i64,
}

/// Máximo de meses de la ventana de previsión
pub const MAX_FORECAST_MONTHS: u32 = 120;

impl ReportSettings {
    /// Rechazar valores que harían fallar el cálculo de fechas en cada request
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FORECAST_MONTHS).contains(&self.forecast_months) {
            anyhow::bail!(
                "REPORT_FORECAST_MONTHS must be between 1 and {}, got {}",
                MAX_FORECAST_MONTHS,
                self.forecast_months
            );
        }
        if !(0..=MAX_LOOKBACK_DAYS).contains(&self.default_lookback_days) {
            anyhow::bail!(
                "REPORT_DEFAULT_LOOKBACK_DAYS must be between 0 and {}, got {}",
                MAX_LOOKBACK_DAYS,
                self.default_lookback_days
            );
        }
        Ok(())
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            forecast_months: DEFAULT_FORECAST_MONTHS,
            default_lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub fleet_snapshot_path: Option<String>,
    pub reports: ReportSettings,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            cors_origins: Vec::new(),
            fleet_snapshot_path: None,
            reports: ReportSettings::default(),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno, con valores por defecto
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let reports = ReportSettings {
            forecast_months: parse_var(
                "REPORT_FORECAST_MONTHS",
                defaults.reports.forecast_months,
            )?,
            default_lookback_days: parse_var(
                "REPORT_DEFAULT_LOOKBACK_DAYS",
                defaults.reports.default_lookback_days,
            )?,
        };
        reports.validate()?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            fleet_snapshot_path: env::var("FLEET_SNAPSHOT_PATH").ok(),
            reports,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
