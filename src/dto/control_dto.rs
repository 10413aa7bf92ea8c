use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ControlData, ControlDetail};
use crate::utils::errors::AppResult;
use crate::utils::validation::RequiredFields;

// Request para crear un control. Las nueve claves son obligatorias, pero
// las de regreso admiten `null` (viaje todavía abierto).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateControlRequest {
    pub vehicle: Option<i64>,
    pub driver: Option<i64>,
    pub departure_date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub departure_km: Option<i32>,

    #[validate(length(max = 200))]
    pub destination: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_time: Option<Option<NaiveTime>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_km: Option<Option<i32>>,
}

/// Payload de creación con todas las claves presentes, antes de resolver
/// vehículo y conductor
#[derive(Debug, Clone)]
pub struct ControlDraft {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_km: i32,
    pub destination: String,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub return_km: Option<i32>,
}

impl CreateControlRequest {
    pub fn into_draft(self) -> AppResult<ControlDraft> {
        let mut required = RequiredFields::new();
        let fields = (
            required.check("vehicle", self.vehicle),
            required.check("driver", self.driver),
            required.check("departure_date", self.departure_date),
            required.check("departure_time", self.departure_time),
            required.check("departure_km", self.departure_km),
            required.check("destination", self.destination.clone()),
            required.check("return_date", self.return_date),
            required.check("return_time", self.return_time),
            required.check("return_km", self.return_km),
        );

        match fields {
            (
                Some(vehicle_id),
                Some(driver_id),
                Some(departure_date),
                Some(departure_time),
                Some(departure_km),
                Some(destination),
                Some(return_date),
                Some(return_time),
                Some(return_km),
            ) => {
                self.validate()?;
                Ok(ControlDraft {
                    vehicle_id,
                    driver_id,
                    departure_date,
                    departure_time,
                    departure_km,
                    destination,
                    return_date,
                    return_time,
                    return_km,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}

impl ControlDraft {
    pub fn into_data(self) -> AppResult<ControlData> {
        ControlData::new(
            self.vehicle_id,
            self.driver_id,
            self.departure_date,
            self.departure_time,
            self.departure_km,
            self.destination,
            self.return_date,
            self.return_time,
            self.return_km,
        )
    }
}

// Request para actualizar un control. Claves ausentes conservan el valor;
// en los campos de regreso `null` explícito borra el valor. En `vehicle` y
// `driver` un `null` es una referencia inexistente.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateControlRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub vehicle: Option<Option<i64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub driver: Option<Option<i64>>,

    pub departure_date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub departure_km: Option<i32>,

    #[validate(length(max = 200))]
    pub destination: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_time: Option<Option<NaiveTime>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub return_km: Option<Option<i32>>,
}

impl UpdateControlRequest {
    /// Aplica los campos presentes y recalcula la distancia
    pub fn apply_to(self, mut data: ControlData) -> AppResult<ControlData> {
        self.validate()?;

        if let Some(Some(vehicle_id)) = self.vehicle {
            data.vehicle_id = vehicle_id;
        }
        if let Some(Some(driver_id)) = self.driver {
            data.driver_id = driver_id;
        }
        if let Some(departure_date) = self.departure_date {
            data.departure_date = departure_date;
        }
        if let Some(departure_time) = self.departure_time {
            data.departure_time = departure_time;
        }
        if let Some(departure_km) = self.departure_km {
            data.departure_km = departure_km;
        }
        if let Some(destination) = self.destination {
            data.destination = destination;
        }
        if let Some(return_date) = self.return_date {
            data.return_date = return_date;
        }
        if let Some(return_time) = self.return_time {
            data.return_time = return_time;
        }
        if let Some(return_km) = self.return_km {
            data.return_km = return_km;
        }

        data.recompute()
    }
}

// Response de creación
#[derive(Debug, Serialize)]
pub struct CreateControlResponse {
    pub control: ControlDetail,
}

// Response de búsqueda por id
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub success: bool,
    pub control: ControlDetail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "driver": 1,
            "vehicle": 2,
            "departure_date": "2023-08-11",
            "departure_time": "10:30:00.000000",
            "return_date": "2023-08-11",
            "return_time": "12:30:00.000000",
            "departure_km": 150,
            "return_km": 250,
            "destination": "São Paulo"
        })
    }

    #[test]
    fn test_full_payload_builds_data() {
        let request: CreateControlRequest = serde_json::from_value(full_payload()).unwrap();
        let draft = request.into_draft().unwrap();
        assert_eq!(draft.vehicle_id, 2);
        assert_eq!(draft.driver_id, 1);

        let data = draft.into_data().unwrap();
        assert_eq!(data.distance_traveled(), Some(100));
    }

    #[test]
    fn test_null_return_fields_count_as_present() {
        let mut payload = full_payload();
        payload["return_date"] = json!(null);
        payload["return_time"] = json!(null);
        payload["return_km"] = json!(null);

        let request: CreateControlRequest = serde_json::from_value(payload).unwrap();
        let data = request.into_draft().unwrap().into_data().unwrap();
        assert_eq!(data.return_km, None);
        assert_eq!(data.distance_traveled(), None);
    }

    #[test]
    fn test_absent_return_key_is_missing() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("return_km");

        let request: CreateControlRequest = serde_json::from_value(payload).unwrap();
        match request.into_draft() {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["return_km"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_update_keeps_omitted_fields_and_recomputes() {
        let request: CreateControlRequest = serde_json::from_value(full_payload()).unwrap();
        let data = request.into_draft().unwrap().into_data().unwrap();

        let update: UpdateControlRequest =
            serde_json::from_value(json!({ "departure_km": 200, "return_km": 300 })).unwrap();
        let updated = update.apply_to(data.clone()).unwrap();

        assert_eq!(updated.departure_km, 200);
        assert_eq!(updated.return_km, Some(300));
        assert_eq!(updated.distance_traveled(), Some(100));
        assert_eq!(updated.destination, data.destination);
        assert_eq!(updated.return_date, data.return_date);
    }

    #[test]
    fn test_update_with_explicit_null_reopens_trip() {
        let request: CreateControlRequest = serde_json::from_value(full_payload()).unwrap();
        let data = request.into_draft().unwrap().into_data().unwrap();

        let update: UpdateControlRequest =
            serde_json::from_value(json!({ "return_km": null })).unwrap();
        let updated = update.apply_to(data).unwrap();

        assert_eq!(updated.return_km, None);
        assert_eq!(updated.distance_traveled(), None);
        assert!(updated.return_date.is_some());
    }

    #[test]
    fn test_update_tells_null_reference_from_absent_key() {
        let update: UpdateControlRequest =
            serde_json::from_value(json!({ "vehicle": null, "driver": 3 })).unwrap();
        assert_eq!(update.vehicle, Some(None));
        assert_eq!(update.driver, Some(Some(3)));

        let update: UpdateControlRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(update.vehicle, None);
        assert_eq!(update.driver, None);
    }
}
