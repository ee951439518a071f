use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use fleet_reporting::config::database::DatabaseConfig;
use fleet_reporting::config::environment::EnvironmentConfig;
use fleet_reporting::database;
use fleet_reporting::repositories::{FleetRepository, InMemoryFleetRepository, PgFleetRepository};
use fleet_reporting::routes::create_router;
use fleet_reporting::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Fleet Reporting - API de reportes de flota");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() {
        info!(
            "🔧 Modo desarrollo: previsión de {} meses, rango por defecto de {} días",
            config.reports.forecast_months, config.reports.default_lookback_days
        );
    }

    let repository = create_repository(&config).await?;
    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(config, repository));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📊 Reportes:");
    info!("   GET  /api/reports/service-forecast - Previsión de servicios");
    info!("   GET  /api/reports/vehicle-utilization - Utilización de vehículos");
    info!("   GET  /api/reports/maintenance-costs - Costos de mantenimiento");
    info!("   GET  /api/reports/parts-usage - Consumo de repuestos");
    info!("🚗 Flota:");
    info!("   GET  /api/vehicles/due-for-service - Vehículos con servicio pendiente");
    info!("   GET  /api/vehicles/:id/service-history - Historial de servicios");
    info!("   GET  /api/parts/low-stock - Repuestos bajo mínimo");
    info!("   GET  /api/compatible-parts?vehicle_id= - Repuestos compatibles");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Elegir la fuente de datos: PostgreSQL si hay `DATABASE_URL`, si no el snapshot JSON
async fn create_repository(config: &EnvironmentConfig) -> Result<Arc<dyn FleetRepository>> {
    if let Some(db_config) = DatabaseConfig::from_env() {
        let pool = database::connect(&db_config).await?;
        return Ok(Arc::new(PgFleetRepository::new(pool)));
    }

    if let Some(path) = &config.fleet_snapshot_path {
        let repository = InMemoryFleetRepository::from_json_file(path).await?;
        return Ok(Arc::new(repository));
    }

    anyhow::bail!("DATABASE_URL or FLEET_SNAPSHOT_PATH must be set")
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
