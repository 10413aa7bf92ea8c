use std::sync::Arc;

use crate::dto::common_dto::{ListAllResponse, ListQuery, MessageResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, CreateVehicleResponse, UpdateVehicleRequest};
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Page<Vehicle>> {
        let page = PageRequest::new(query.page, query.page_size)?;
        let search = query.search_term();

        let total = self.repository.count(search.as_deref()).await?;
        page.ensure_in_range(total)?;
        let vehicles = self.repository.list(search.as_deref(), page).await?;

        Ok(Page::new(page, total, vehicles))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<CreateVehicleResponse> {
        let new_vehicle = request.into_new_vehicle()?;
        let vehicle = self.repository.create(new_vehicle).await?;

        tracing::info!("✅ Vehículo creado: id={} placa={}", vehicle.id, vehicle.plate);
        Ok(CreateVehicleResponse { vehicle })
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> AppResult<MessageResponse> {
        // Obtener vehículo actual
        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        vehicle.apply(request.into_changes()?);
        self.repository
            .update(&vehicle)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        tracing::info!("✏️ Vehículo actualizado: id={}", id);
        Ok(MessageResponse::success("Vehicle updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MessageResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }

        tracing::info!("🗑️ Vehículo eliminado: id={}", id);
        Ok(MessageResponse::success("Vehicle deleted successfully"))
    }

    pub async fn list_all(&self) -> AppResult<ListAllResponse<Vehicle>> {
        let vehicles = self.repository.list_all().await?;
        Ok(ListAllResponse::new(vehicles))
    }
}
