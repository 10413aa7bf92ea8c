//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum: la
//! configuración y un repositorio por entidad.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::repositories::{
    ControlRepository, DriverRepository, MemoryStore, PgControlRepository, PgDriverRepository,
    PgVehicleRepository, VehicleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub drivers: Arc<dyn DriverRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub controls: Arc<dyn ControlRepository>,
}

impl AppState {
    pub fn with_postgres(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config,
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            controls: Arc::new(PgControlRepository::new(pool)),
        }
    }

    /// Las tres entidades comparten el mismo `MemoryStore`
    pub fn in_memory(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        Self {
            config,
            drivers: Arc::new(store.clone()),
            vehicles: Arc::new(store.clone()),
            controls: Arc::new(store),
        }
    }
}
