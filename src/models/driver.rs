//! Modelo de Driver
//!
//! Mapea la tabla `driver`. Los conductores no dependen de ninguna otra entidad.

use serde::Serialize;
use sqlx::FromRow;

/// Driver principal - mapea exactamente a la tabla driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub license_number: String,
}

/// Conductor listo para insertar (sin id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    pub name: String,
    pub phone: String,
    pub license_number: String,
}

/// Cambios parciales; `None` conserva el valor actual
#[derive(Debug, Clone, Default)]
pub struct DriverChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

impl Driver {
    pub fn from_new(id: i64, new: NewDriver) -> Self {
        Self {
            id,
            name: new.name,
            phone: new.phone,
            license_number: new.license_number,
        }
    }

    pub fn apply(&mut self, changes: DriverChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(license_number) = changes.license_number {
            self.license_number = license_number;
        }
    }

    /// Coincidencia usada por la búsqueda: subcadena sin distinguir mayúsculas
    /// sobre nombre, teléfono o licencia.
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        [&self.name, &self.phone, &self.license_number]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
