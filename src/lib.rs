//! Fleet Control
//!
//! Registro de flota: conductores, vehículos y controles de viaje, con el
//! reporte de km acumulados desde el último cambio de aceite.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
