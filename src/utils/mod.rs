//! Utilidades del sistema
//!
//! Manejo de errores, validación de payloads y paginación.

pub mod errors;
pub mod pagination;
pub mod validation;
