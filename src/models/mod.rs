//! Modelos del sistema
//!
//! Este módulo contiene las entidades de la flota tal como se guardan
//! en las tablas `driver`, `vehicle` y `control`.

pub mod control;
pub mod driver;
pub mod vehicle;

pub use control::{Control, ControlData, ControlDetail, ControlOrdering, ControlSortField};
pub use driver::{Driver, DriverChanges, NewDriver};
pub use vehicle::{NewVehicle, OilChangeStatus, Vehicle, VehicleChanges};
