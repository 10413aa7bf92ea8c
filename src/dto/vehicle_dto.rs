use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewVehicle, OilChangeStatus, Vehicle, VehicleChanges};
use crate::utils::errors::AppResult;
use crate::utils::validation::RequiredFields;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(max = 10))]
    pub plate: Option<String>,

    #[validate(length(max = 100))]
    pub brand: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    pub oil_change_km: Option<i32>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        let mut required = RequiredFields::new();
        let plate = required.check("plate", self.plate.clone());
        let brand = required.check("brand", self.brand.clone());
        let model = required.check("model", self.model.clone());
        let oil_change_km = required.check("oil_change_km", self.oil_change_km);

        match (plate, brand, model, oil_change_km) {
            (Some(plate), Some(brand), Some(model), Some(oil_change_km)) => {
                self.validate()?;
                Ok(NewVehicle {
                    plate,
                    brand,
                    model,
                    oil_change_km,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}

// Request para actualizar un vehículo existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(max = 10))]
    pub plate: Option<String>,

    #[validate(length(max = 100))]
    pub brand: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    pub oil_change_km: Option<i32>,
}

impl UpdateVehicleRequest {
    pub fn into_changes(self) -> AppResult<VehicleChanges> {
        self.validate()?;
        Ok(VehicleChanges {
            plate: self.plate,
            brand: self.brand,
            model: self.model,
            oil_change_km: self.oil_change_km,
        })
    }
}

// Response de creación
#[derive(Debug, Serialize)]
pub struct CreateVehicleResponse {
    pub vehicle: Vehicle,
}

// Response del reporte de km desde el último cambio de aceite
#[derive(Debug, Serialize)]
pub struct TotalKmResponse {
    pub success: bool,
    pub message: String,
    pub limit_exceeded: bool,
    pub oil_change_km: i32,
    pub km_left: i64,
    pub total_km: i64,
}

impl From<OilChangeStatus> for TotalKmResponse {
    fn from(status: OilChangeStatus) -> Self {
        Self {
            success: true,
            message: status.message().to_string(),
            limit_exceeded: status.limit_exceeded,
            oil_change_km: status.oil_change_km,
            km_left: status.km_left,
            total_km: status.total_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use serde_json::json;

    #[test]
    fn test_all_keys_required() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "plate": "ABC-1234",
            "brand": "Volkswagen",
            "model": "Fusca"
        }))
        .unwrap();

        match request.into_new_vehicle() {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["oil_change_km"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_plate_length_limit() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "plate": "ABC-1234-XYZ",
            "brand": "Volkswagen",
            "model": "Fusca",
            "oil_change_km": 1000
        }))
        .unwrap();

        assert!(matches!(request.into_new_vehicle(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_total_km_response_from_status() {
        let response = TotalKmResponse::from(OilChangeStatus::evaluate(1000, 100));
        assert_eq!(response.message, "Vehicle is within the km limit");
        assert_eq!(response.km_left, 900);
        assert_eq!(response.oil_change_km, 1000);
    }
}
