//! Controladores
//!
//! Capa de servicio entre las rutas y los repositorios: comprueba campos
//! obligatorios y existencia de referencias antes de escribir.

pub mod control_controller;
pub mod driver_controller;
pub mod vehicle_controller;

pub use control_controller::ControlController;
pub use driver_controller::DriverController;
pub use vehicle_controller::VehicleController;
