//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el cálculo del estado de
//! cambio de aceite a partir de los km acumulados en los controles.

use serde::Serialize;
use sqlx::FromRow;

/// Vehicle principal - mapea exactamente a la tabla vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub oil_change_km: i32,
}

/// Vehículo listo para insertar (sin id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub oil_change_km: i32,
}

/// Cambios parciales; `None` conserva el valor actual
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub oil_change_km: Option<i32>,
}

impl Vehicle {
    pub fn from_new(id: i64, new: NewVehicle) -> Self {
        Self {
            id,
            plate: new.plate,
            brand: new.brand,
            model: new.model,
            oil_change_km: new.oil_change_km,
        }
    }

    pub fn apply(&mut self, changes: VehicleChanges) {
        if let Some(plate) = changes.plate {
            self.plate = plate;
        }
        if let Some(brand) = changes.brand {
            self.brand = brand;
        }
        if let Some(model) = changes.model {
            self.model = model;
        }
        if let Some(oil_change_km) = changes.oil_change_km {
            self.oil_change_km = oil_change_km;
        }
    }

    /// Búsqueda por placa, marca o modelo
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        [&self.plate, &self.brand, &self.model]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Estado del vehículo respecto a su próximo cambio de aceite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OilChangeStatus {
    pub oil_change_km: i32,
    pub total_km: i64,
    pub km_left: i64,
    pub limit_exceeded: bool,
}

impl OilChangeStatus {
    /// `km_left` puede ser negativo cuando el límite ya se superó.
    pub fn evaluate(oil_change_km: i32, total_km: i64) -> Self {
        let threshold = i64::from(oil_change_km);
        Self {
            oil_change_km,
            total_km,
            km_left: threshold - total_km,
            limit_exceeded: total_km >= threshold,
        }
    }

    pub fn message(&self) -> &'static str {
        if self.limit_exceeded {
            "Vehicle exceeded the km limit"
        } else {
            "Vehicle is within the km limit"
        }
    }
}
