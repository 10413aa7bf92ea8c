//! Backend en memoria
//!
//! Las tres tablas viven detrás de un único `RwLock`, de modo que el borrado
//! en cascada de conductores y vehículos es atómico igual que en PostgreSQL.
//! Se usa con `STORE_BACKEND=memory` y en los tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ControlRepository, DriverRepository, VehicleRepository};
use crate::models::{
    Control, ControlData, ControlDetail, ControlOrdering, Driver, NewDriver, NewVehicle, Vehicle,
};
use crate::utils::errors::AppResult;
use crate::utils::pagination::PageRequest;

#[derive(Debug, Default)]
struct Tables {
    drivers: BTreeMap<i64, Driver>,
    vehicles: BTreeMap<i64, Vehicle>,
    controls: BTreeMap<i64, Control>,
    last_driver_id: i64,
    last_vehicle_id: i64,
    last_control_id: i64,
}

impl Tables {
    fn detail(&self, control: &Control) -> Option<ControlDetail> {
        let vehicle = self.vehicles.get(&control.vehicle_id)?.clone();
        let driver = self.drivers.get(&control.driver_id)?.clone();
        Some(control.clone().with_relations(vehicle, driver))
    }

    fn search_controls<'a>(&'a self, search: Option<&'a str>) -> impl Iterator<Item = &'a Control> {
        self.controls
            .values()
            .filter(move |control| search.map_or(true, |term| control.matches(term)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of<T: Clone>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait]
impl DriverRepository for MemoryStore {
    async fn create(&self, driver: NewDriver) -> AppResult<Driver> {
        let mut tables = self.tables.write().await;
        tables.last_driver_id += 1;
        let driver = Driver::from_new(tables.last_driver_id, driver);
        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        Ok(self.tables.read().await.drivers.get(&id).cloned())
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let total = tables
            .drivers
            .values()
            .filter(|driver| search.map_or(true, |term| driver.matches(term)))
            .count();
        Ok(total as i64)
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Driver>> {
        let tables = self.tables.read().await;
        let matching = tables
            .drivers
            .values()
            .filter(|driver| search.map_or(true, |term| driver.matches(term)))
            .cloned()
            .collect();
        Ok(page_of(matching, page))
    }

    async fn list_all(&self) -> AppResult<Vec<Driver>> {
        Ok(self.tables.read().await.drivers.values().cloned().collect())
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let mut tables = self.tables.write().await;
        Ok(tables.drivers.get_mut(&driver.id).map(|stored| {
            *stored = driver.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.drivers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.controls.retain(|_, control| control.driver_id != id);
        Ok(true)
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        tables.last_vehicle_id += 1;
        let vehicle = Vehicle::from_new(tables.last_vehicle_id, vehicle);
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.tables.read().await.vehicles.get(&id).cloned())
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let total = tables
            .vehicles
            .values()
            .filter(|vehicle| search.map_or(true, |term| vehicle.matches(term)))
            .count();
        Ok(total as i64)
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let matching = tables
            .vehicles
            .values()
            .filter(|vehicle| search.map_or(true, |term| vehicle.matches(term)))
            .cloned()
            .collect();
        Ok(page_of(matching, page))
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.tables.read().await.vehicles.values().cloned().collect())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.write().await;
        Ok(tables.vehicles.get_mut(&vehicle.id).map(|stored| {
            *stored = vehicle.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.controls.retain(|_, control| control.vehicle_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ControlRepository for MemoryStore {
    async fn create(&self, data: ControlData) -> AppResult<Control> {
        let mut tables = self.tables.write().await;
        tables.last_control_id += 1;
        let control = data.into_control(tables.last_control_id);
        tables.controls.insert(control.id, control.clone());
        Ok(control)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Control>> {
        Ok(self.tables.read().await.controls.get(&id).cloned())
    }

    async fn find_detail(&self, id: i64) -> AppResult<Option<ControlDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.controls.get(&id).and_then(|control| tables.detail(control)))
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.search_controls(search).count() as i64)
    }

    async fn list(
        &self,
        search: Option<&str>,
        ordering: ControlOrdering,
        page: PageRequest,
    ) -> AppResult<Vec<ControlDetail>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Control> = tables.search_controls(search).collect();
        matching.sort_by(|a, b| ordering.compare(a, b));

        let details = matching
            .into_iter()
            .filter_map(|control| tables.detail(control))
            .collect();
        Ok(page_of(details, page))
    }

    async fn update(&self, id: i64, data: ControlData) -> AppResult<Option<Control>> {
        let mut tables = self.tables.write().await;
        Ok(tables.controls.get_mut(&id).map(|stored| {
            *stored = data.into_control(id);
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.controls.remove(&id).is_some())
    }

    async fn total_distance_for_vehicle(&self, vehicle_id: i64) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let total = tables
            .controls
            .values()
            .filter(|control| control.vehicle_id == vehicle_id)
            .filter_map(|control| control.distance_traveled)
            .map(i64::from)
            .sum();
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    async fn seed(store: &MemoryStore) -> (Driver, Vehicle) {
        let driver = DriverRepository::create(
            store,
            NewDriver {
                name: "Matheus".to_string(),
                phone: "14 99655-5555".to_string(),
                license_number: "ABC123".to_string(),
            },
        )
        .await
        .unwrap();
        let vehicle = VehicleRepository::create(
            store,
            NewVehicle {
                plate: "ABC-1234".to_string(),
                brand: "Volkswagen".to_string(),
                model: "Fusca".to_string(),
                oil_change_km: 1000,
            },
        )
        .await
        .unwrap();
        (driver, vehicle)
    }

    fn trip(
        vehicle: &Vehicle,
        driver: &Driver,
        day: u32,
        departure_km: i32,
        return_km: Option<i32>,
    ) -> ControlData {
        ControlData::new(
            vehicle.id,
            driver.id,
            NaiveDate::from_ymd_opt(2023, 8, day).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            departure_km,
            "São Paulo".to_string(),
            None,
            None,
            return_km,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let (driver, vehicle) = seed(&store).await;
        assert_eq!(driver.id, 1);
        assert_eq!(vehicle.id, 1);

        let first = ControlRepository::create(&store, trip(&vehicle, &driver, 1, 0, None))
            .await
            .unwrap();
        let second = ControlRepository::create(&store, trip(&vehicle, &driver, 2, 0, None))
            .await
            .unwrap();
        assert_eq!((first.id, second.id), (1, 2));
    }

    #[tokio::test]
    async fn test_total_distance_skips_open_trips() {
        let store = MemoryStore::new();
        let (driver, vehicle) = seed(&store).await;

        for data in [
            trip(&vehicle, &driver, 1, 150, Some(250)),
            trip(&vehicle, &driver, 2, 250, Some(400)),
            trip(&vehicle, &driver, 3, 400, None),
        ] {
            ControlRepository::create(&store, data).await.unwrap();
        }

        assert_eq!(store.total_distance_for_vehicle(vehicle.id).await.unwrap(), 250);
        assert_eq!(store.total_distance_for_vehicle(99).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_vehicle_cascades_to_controls() {
        let store = MemoryStore::new();
        let (driver, vehicle) = seed(&store).await;
        let control = ControlRepository::create(&store, trip(&vehicle, &driver, 1, 150, Some(250)))
            .await
            .unwrap();

        assert!(VehicleRepository::delete(&store, vehicle.id).await.unwrap());
        assert!(ControlRepository::find_by_id(&store, control.id).await.unwrap().is_none());
        assert!(!VehicleRepository::delete(&store, vehicle.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_and_paginates() {
        let store = MemoryStore::new();
        let (driver, vehicle) = seed(&store).await;
        for day in 1..=3 {
            ControlRepository::create(&store, trip(&vehicle, &driver, day, 0, None))
                .await
                .unwrap();
        }

        let page = PageRequest::new(Some(1), Some(2)).unwrap();
        let first = ControlRepository::list(&store, None, ControlOrdering::default(), page)
            .await
            .unwrap();
        let days: Vec<_> = first.iter().map(|c| c.departure_date.to_string()).collect();
        assert_eq!(days, vec!["2023-08-03", "2023-08-02"]);

        let ordering: ControlOrdering = "departure_date".parse().unwrap();
        let ascending =
            ControlRepository::list(&store, Some("08-01"), ordering, PageRequest::default())
                .await
                .unwrap();
        assert_eq!(ascending.len(), 1);
        assert_eq!(ascending[0].driver.name, "Matheus");
    }
}
