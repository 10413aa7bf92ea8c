//! Configuración de variables de entorno
//!
//! Todas las variables tienen un valor por defecto apto para desarrollo;
//! un valor presente pero inválido es un error de configuración.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::utils::errors::{AppError, AppResult};

/// Backend de almacenamiento de los repositorios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::Config(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    pub store_backend: StoreBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
            store_backend: StoreBackend::Postgres,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(environment) = env::var("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| {
                    AppError::Config(format!("PORT must be a valid number, got '{}'", port))
                })?;
        }
        if let Ok(origins) = env::var("CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins);
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|_| {
                    AppError::Config(format!("LOG_LEVEL is not a valid level: '{}'", level))
                })?;
        }
        if let Ok(backend) = env::var("STORE_BACKEND") {
            config.store_backend = backend.parse()?;
        }

        Ok(config)
    }

    /// Dirección de escucha del servidor
    pub fn listen_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST/PORT: {}", e)))
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("Postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("http://localhost:5173, ,https://fleet.example.com");
        assert_eq!(origins, vec!["http://localhost:5173", "https://fleet.example.com"]);
    }

    #[test]
    fn test_default_listen_addr() {
        let addr = AppConfig::default().listen_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }
}
