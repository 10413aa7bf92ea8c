use std::sync::Arc;

use crate::dto::common_dto::{ListQuery, MessageResponse};
use crate::dto::control_dto::{
    ControlResponse, CreateControlRequest, CreateControlResponse, UpdateControlRequest,
};
use crate::dto::vehicle_dto::TotalKmResponse;
use crate::models::{ControlData, ControlDetail, ControlOrdering, Driver, OilChangeStatus, Vehicle};
use crate::repositories::{ControlRepository, DriverRepository, VehicleRepository};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

pub struct ControlController {
    controls: Arc<dyn ControlRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    drivers: Arc<dyn DriverRepository>,
}

impl ControlController {
    pub fn new(
        controls: Arc<dyn ControlRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        drivers: Arc<dyn DriverRepository>,
    ) -> Self {
        Self {
            controls,
            vehicles,
            drivers,
        }
    }

    async fn require_vehicle(&self, id: i64) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    async fn require_driver(&self, id: i64) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Page<ControlDetail>> {
        let page = PageRequest::new(query.page, query.page_size)?;
        let ordering = match query.order_by.as_deref().map(str::trim) {
            Some(order_by) if !order_by.is_empty() => order_by.parse::<ControlOrdering>()?,
            _ => ControlOrdering::default(),
        };
        let search = query.search_term();

        let total = self.controls.count(search.as_deref()).await?;
        page.ensure_in_range(total)?;
        let controls = self.controls.list(search.as_deref(), ordering, page).await?;

        Ok(Page::new(page, total, controls))
    }

    /// Crea un control. El vehículo se resuelve antes que el conductor, así
    /// que con ambos inválidos el error es "Vehicle not found".
    pub async fn create(&self, request: CreateControlRequest) -> AppResult<CreateControlResponse> {
        let draft = request.into_draft()?;
        let vehicle = self.require_vehicle(draft.vehicle_id).await?;
        let driver = self.require_driver(draft.driver_id).await?;

        let control = self.controls.create(draft.into_data()?).await?;

        tracing::info!(
            "✅ Control creado: id={} vehicle={} driver={} distance={:?}",
            control.id,
            vehicle.id,
            driver.id,
            control.distance_traveled
        );
        Ok(CreateControlResponse {
            control: control.with_relations(vehicle, driver),
        })
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateControlRequest,
    ) -> AppResult<MessageResponse> {
        let current = self
            .controls
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Control"))?;

        // Las referencias solo se revalidan si vienen en el payload; `null`
        // nunca resuelve
        match request.vehicle {
            Some(Some(vehicle_id)) => {
                self.require_vehicle(vehicle_id).await?;
            }
            Some(None) => return Err(not_found_error("Vehicle")),
            None => {}
        }
        match request.driver {
            Some(Some(driver_id)) => {
                self.require_driver(driver_id).await?;
            }
            Some(None) => return Err(not_found_error("Driver")),
            None => {}
        }

        let data = request.apply_to(ControlData::from(current))?;
        let control = self
            .controls
            .update(id, data)
            .await?
            .ok_or_else(|| not_found_error("Control"))?;

        tracing::info!(
            "✏️ Control actualizado: id={} distance={:?}",
            control.id,
            control.distance_traveled
        );
        Ok(MessageResponse::success("Control updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MessageResponse> {
        if !self.controls.delete(id).await? {
            return Err(not_found_error("Control"));
        }

        tracing::info!("🗑️ Control eliminado: id={}", id);
        Ok(MessageResponse::success("Control deleted successfully"))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ControlResponse> {
        let control = self
            .controls
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Control"))?;

        Ok(ControlResponse {
            success: true,
            control,
        })
    }

    /// Km acumulados por el vehículo frente a su intervalo de cambio de aceite
    pub async fn total_km(&self, vehicle_id: i64) -> AppResult<TotalKmResponse> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        let total_km = self.controls.total_distance_for_vehicle(vehicle.id).await?;

        let status = OilChangeStatus::evaluate(vehicle.oil_change_km, total_km);
        tracing::debug!(
            "Km totales vehicle={} total={} restante={}",
            vehicle.id,
            status.total_km,
            status.km_left
        );
        Ok(TotalKmResponse::from(status))
    }
}
