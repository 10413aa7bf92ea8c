//! Modelo de Control (registro de viaje)
//!
//! Un control une un conductor con un vehículo y guarda los km de salida
//! y de regreso. `distance_traveled` nunca llega del cliente: se recalcula
//! en cada escritura con [`compute_distance`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use super::{Driver, Vehicle};
use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Control principal - mapea exactamente a la tabla control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Control {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_km: i32,
    pub destination: String,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub return_km: Option<i32>,
    pub distance_traveled: Option<i32>,
}

/// Columnas escribibles de un control. Se construye siempre con
/// [`ControlData::new`] o [`ControlData::recompute`], que fijan la distancia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlData {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_km: i32,
    pub destination: String,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub return_km: Option<i32>,
    distance_traveled: Option<i32>,
}

/// Control con su conductor y vehículo embebidos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlDetail {
    pub id: i64,
    pub vehicle: Vehicle,
    pub driver: Driver,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_km: i32,
    pub destination: String,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub return_km: Option<i32>,
    pub distance_traveled: Option<i32>,
}

/// Distancia recorrida: `return_km - departure_km` cuando hay km de regreso.
///
/// Un `return_km` de 0 cuenta como presente. Lecturas negativas o un regreso
/// menor que la salida se rechazan, la distancia nunca es negativa.
pub fn compute_distance(departure_km: i32, return_km: Option<i32>) -> AppResult<Option<i32>> {
    if departure_km < 0 {
        return Err(bad_request_error("departure_km must be a non-negative integer"));
    }

    match return_km {
        None => Ok(None),
        Some(km) if km < 0 => Err(bad_request_error("return_km must be a non-negative integer")),
        Some(km) if km < departure_km => Err(bad_request_error(
            "return_km must be greater than or equal to departure_km",
        )),
        Some(km) => Ok(Some(km - departure_km)),
    }
}

impl ControlData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vehicle_id: i64,
        driver_id: i64,
        departure_date: NaiveDate,
        departure_time: NaiveTime,
        departure_km: i32,
        destination: String,
        return_date: Option<NaiveDate>,
        return_time: Option<NaiveTime>,
        return_km: Option<i32>,
    ) -> AppResult<Self> {
        let data = Self {
            vehicle_id,
            driver_id,
            departure_date,
            departure_time,
            departure_km,
            destination,
            return_date,
            return_time,
            return_km,
            distance_traveled: None,
        };
        data.recompute()
    }

    /// Recalcula la distancia tras modificar los campos públicos.
    pub fn recompute(mut self) -> AppResult<Self> {
        self.distance_traveled = compute_distance(self.departure_km, self.return_km)?;
        Ok(self)
    }

    pub fn distance_traveled(&self) -> Option<i32> {
        self.distance_traveled
    }

    pub fn into_control(self, id: i64) -> Control {
        Control {
            id,
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
            departure_date: self.departure_date,
            departure_time: self.departure_time,
            departure_km: self.departure_km,
            destination: self.destination,
            return_date: self.return_date,
            return_time: self.return_time,
            return_km: self.return_km,
            distance_traveled: self.distance_traveled,
        }
    }
}

impl From<Control> for ControlData {
    fn from(control: Control) -> Self {
        Self {
            vehicle_id: control.vehicle_id,
            driver_id: control.driver_id,
            departure_date: control.departure_date,
            departure_time: control.departure_time,
            departure_km: control.departure_km,
            destination: control.destination,
            return_date: control.return_date,
            return_time: control.return_time,
            return_km: control.return_km,
            distance_traveled: control.distance_traveled,
        }
    }
}

impl Control {
    pub fn with_relations(self, vehicle: Vehicle, driver: Driver) -> ControlDetail {
        ControlDetail {
            id: self.id,
            vehicle,
            driver,
            departure_date: self.departure_date,
            departure_time: self.departure_time,
            departure_km: self.departure_km,
            destination: self.destination,
            return_date: self.return_date,
            return_time: self.return_time,
            return_km: self.return_km,
            distance_traveled: self.distance_traveled,
        }
    }

    /// Búsqueda por fecha de salida o de regreso (subcadena de `YYYY-MM-DD`)
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.departure_date.to_string().contains(&needle)
            || self
                .return_date
                .map(|date| date.to_string().contains(&needle))
                .unwrap_or(false)
    }
}

/// Campos por los que se puede ordenar el listado de controles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSortField {
    Id,
    DepartureDate,
    DepartureTime,
    DepartureKm,
    Destination,
    ReturnDate,
    ReturnTime,
    ReturnKm,
    DistanceTraveled,
}

impl ControlSortField {
    pub const ALL: [ControlSortField; 9] = [
        ControlSortField::Id,
        ControlSortField::DepartureDate,
        ControlSortField::DepartureTime,
        ControlSortField::DepartureKm,
        ControlSortField::Destination,
        ControlSortField::ReturnDate,
        ControlSortField::ReturnTime,
        ControlSortField::ReturnKm,
        ControlSortField::DistanceTraveled,
    ];

    /// Nombre del campo en la API y columna en la tabla `control`
    pub fn column(&self) -> &'static str {
        match self {
            ControlSortField::Id => "id",
            ControlSortField::DepartureDate => "departure_date",
            ControlSortField::DepartureTime => "departure_time",
            ControlSortField::DepartureKm => "departure_km",
            ControlSortField::Destination => "destination",
            ControlSortField::ReturnDate => "return_date",
            ControlSortField::ReturnTime => "return_time",
            ControlSortField::ReturnKm => "return_km",
            ControlSortField::DistanceTraveled => "distance_traveled",
        }
    }

    fn compare(&self, a: &Control, b: &Control) -> Ordering {
        match self {
            ControlSortField::Id => a.id.cmp(&b.id),
            ControlSortField::DepartureDate => a.departure_date.cmp(&b.departure_date),
            ControlSortField::DepartureTime => a.departure_time.cmp(&b.departure_time),
            ControlSortField::DepartureKm => a.departure_km.cmp(&b.departure_km),
            ControlSortField::Destination => a.destination.cmp(&b.destination),
            ControlSortField::ReturnDate => a.return_date.cmp(&b.return_date),
            ControlSortField::ReturnTime => a.return_time.cmp(&b.return_time),
            ControlSortField::ReturnKm => a.return_km.cmp(&b.return_km),
            ControlSortField::DistanceTraveled => a.distance_traveled.cmp(&b.distance_traveled),
        }
    }
}

/// Orden del listado. Sintaxis `campo` o `-campo` (descendente).
///
/// Los NULL se tratan como el valor más pequeño en ambos backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOrdering {
    pub field: ControlSortField,
    pub descending: bool,
}

impl Default for ControlOrdering {
    fn default() -> Self {
        Self {
            field: ControlSortField::DepartureDate,
            descending: true,
        }
    }
}

impl FromStr for ControlOrdering {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (descending, name) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };

        ControlSortField::ALL
            .iter()
            .find(|field| field.column() == name)
            .map(|field| Self {
                field: *field,
                descending,
            })
            .ok_or_else(|| AppError::BadRequest(format!("Invalid order_by field: '{}'", value)))
    }
}

impl fmt::Display for ControlOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field.column())
        } else {
            f.write_str(self.field.column())
        }
    }
}

impl ControlOrdering {
    /// Cláusula ORDER BY; el id desempata para que la paginación sea estable.
    pub fn sql(&self) -> String {
        let column = self.field.column();
        if self.descending {
            format!("c.{} DESC NULLS LAST, c.id ASC", column)
        } else {
            format!("c.{} ASC NULLS FIRST, c.id ASC", column)
        }
    }

    pub fn compare(&self, a: &Control, b: &Control) -> Ordering {
        let ordering = self.field.compare(a, b);
        let ordering = if self.descending { ordering.reverse() } else { ordering };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn trip(departure_km: i32, return_km: Option<i32>) -> AppResult<ControlData> {
        ControlData::new(
            1,
            1,
            date("2023-08-11"),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            departure_km,
            "São Paulo".to_string(),
            return_km.map(|_| date("2023-08-11")),
            return_km.map(|_| NaiveTime::from_hms_opt(12, 30, 0).unwrap()),
            return_km,
        )
    }

    #[test]
    fn test_distance_is_return_minus_departure() {
        assert_eq!(compute_distance(150, Some(250)).unwrap(), Some(100));
        assert_eq!(trip(200, Some(300)).unwrap().distance_traveled(), Some(100));
    }

    #[test]
    fn test_open_trip_has_no_distance() {
        assert_eq!(compute_distance(150, None).unwrap(), None);
        assert_eq!(trip(150, None).unwrap().distance_traveled(), None);
    }

    #[test]
    fn test_zero_return_km_counts_as_present() {
        assert_eq!(compute_distance(0, Some(0)).unwrap(), Some(0));
    }

    #[test]
    fn test_rejects_return_below_departure() {
        let err = compute_distance(300, Some(250)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_rejects_negative_readings() {
        assert!(compute_distance(-1, None).is_err());
        assert!(compute_distance(0, Some(-5)).is_err());
    }

    #[test]
    fn test_recompute_after_clearing_return() {
        let mut data = trip(150, Some(250)).unwrap();
        data.return_km = None;
        let data = data.recompute().unwrap();
        assert_eq!(data.distance_traveled(), None);
    }

    #[test]
    fn test_parse_ordering() {
        let ordering: ControlOrdering = "-departure_km".parse().unwrap();
        assert_eq!(ordering.field, ControlSortField::DepartureKm);
        assert!(ordering.descending);
        assert_eq!(ordering.to_string(), "-departure_km");

        let ordering: ControlOrdering = "destination".parse().unwrap();
        assert!(!ordering.descending);
        assert_eq!(ordering.sql(), "c.destination ASC NULLS FIRST, c.id ASC");
    }

    #[test]
    fn test_parse_ordering_rejects_unknown_field() {
        assert!("vehicle_id; DROP TABLE control".parse::<ControlOrdering>().is_err());
        assert!("password".parse::<ControlOrdering>().is_err());
    }

    #[test]
    fn test_default_ordering_is_latest_departure_first() {
        let older = trip(0, None).unwrap().into_control(1);
        let mut newer = trip(0, None).unwrap().into_control(2);
        newer.departure_date = date("2023-09-01");

        let ordering = ControlOrdering::default();
        assert_eq!(ordering.compare(&newer, &older), Ordering::Less);
    }

    #[test]
    fn test_matches_dates() {
        let control = trip(150, Some(250)).unwrap().into_control(1);
        assert!(control.matches("2023-08"));
        assert!(!control.matches("2024"));
    }
}
