//! DTOs de la API
//!
//! Payloads de entrada y sobres de respuesta de cada recurso.

pub mod common_dto;
pub mod control_dto;
pub mod driver_dto;
pub mod vehicle_dto;
