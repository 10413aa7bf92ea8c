use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_control::config::{AppConfig, DatabaseConfig, StoreBackend};
use fleet_control::{create_router, database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = AppConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Control - API de registro de flota");
    info!("===========================================");
    info!("🏷️ Entorno: {}", config.environment);

    let state = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = match database::connect(&db_config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            AppState::with_postgres(config.clone(), pool)
        }
        StoreBackend::Memory => {
            info!("🧪 Usando almacenamiento en memoria (los datos no persisten)");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_router(state);
    let addr = config.listen_addr()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    for resource in ["driver", "vehicle"] {
        info!("   GET  /api/{0} | /api/{0}/all", resource);
        info!("   POST /api/{}/create", resource);
        info!("   PUT  /api/{}/:id/update", resource);
        info!("   DELETE /api/{}/:id/delete", resource);
    }
    info!("   GET  /api/control | /api/control/:id | /api/control/:vehicle_id/total_km");
    info!("   POST /api/control/create");
    info!("   PUT  /api/control/:id/update");
    info!("   DELETE /api/control/:id/delete");

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
