use std::sync::Arc;

use crate::dto::common_dto::{ListAllResponse, ListQuery, MessageResponse};
use crate::dto::driver_dto::{CreateDriverRequest, CreateDriverResponse, UpdateDriverRequest};
use crate::models::Driver;
use crate::repositories::DriverRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
}

impl DriverController {
    pub fn new(repository: Arc<dyn DriverRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Page<Driver>> {
        let page = PageRequest::new(query.page, query.page_size)?;
        let search = query.search_term();

        let total = self.repository.count(search.as_deref()).await?;
        page.ensure_in_range(total)?;
        let drivers = self.repository.list(search.as_deref(), page).await?;

        Ok(Page::new(page, total, drivers))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<CreateDriverResponse> {
        let new_driver = request.into_new_driver()?;
        let driver = self.repository.create(new_driver).await?;

        tracing::info!("✅ Conductor creado: id={}", driver.id);
        Ok(CreateDriverResponse { driver })
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateDriverRequest,
    ) -> AppResult<MessageResponse> {
        let mut driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        driver.apply(request.into_changes()?);
        self.repository
            .update(&driver)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        tracing::info!("✏️ Conductor actualizado: id={}", id);
        Ok(MessageResponse::success("Driver updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MessageResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver"));
        }

        tracing::info!("🗑️ Conductor eliminado: id={}", id);
        Ok(MessageResponse::success("Driver deleted successfully"))
    }

    pub async fn list_all(&self) -> AppResult<ListAllResponse<Driver>> {
        let drivers = self.repository.list_all().await?;
        Ok(ListAllResponse::new(drivers))
    }
}
