//! Repositorios
//!
//! Cada entidad tiene un trait de acceso a datos con dos implementaciones:
//! PostgreSQL (sqlx) y memoria. Las búsquedas por id devuelven `Option`:
//! el llamador decide qué hacer cuando el registro no existe.

pub mod control_repository;
pub mod driver_repository;
pub mod memory_repository;
pub mod vehicle_repository;

pub use control_repository::{ControlRepository, PgControlRepository};
pub use driver_repository::{DriverRepository, PgDriverRepository};
pub use memory_repository::MemoryStore;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
