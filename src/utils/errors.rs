//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la aplicación y su conversión
//! a respuestas HTTP. El campo `error` del cuerpo lleva siempre el
//! mensaje que el cliente debe mostrar ("Driver not found", ...).

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required fields")]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::MissingFields(fields) => ErrorResponse {
                error: "Missing required fields".to_string(),
                details: Some(json!({ "missing": fields })),
                code: "MISSING_FIELDS",
            },

            AppError::Validation(e) => ErrorResponse {
                error: "The provided data is invalid".to_string(),
                details: Some(json!(e)),
                code: "VALIDATION_ERROR",
            },

            AppError::BadRequest(msg) => ErrorResponse {
                error: msg,
                details: None,
                code: "BAD_REQUEST",
            },

            AppError::NotFound(msg) => ErrorResponse {
                error: msg,
                details: None,
                code: "NOT_FOUND",
            },

            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                ErrorResponse {
                    error: "An error occurred while accessing the database".to_string(),
                    details: None,
                    code: "DB_ERROR",
                }
            }

            other => {
                tracing::error!("❌ Internal error: {}", other);
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                    code: "INTERNAL_ERROR",
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

// Los rechazos de los extractores de axum salen con el mismo formato JSON
// que el resto de errores
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingFields(vec!["name"]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found_error("Driver").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Config("PORT".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(not_found_error("Control").to_string(), "Control not found");
    }
}
