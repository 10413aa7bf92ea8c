use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::DriverController;
use crate::dto::common_dto::{ListAllResponse, ListQuery, MessageResponse};
use crate::dto::driver_dto::{CreateDriverRequest, CreateDriverResponse, UpdateDriverRequest};
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Page;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers))
        .route("/create", post(create_driver))
        .route("/all", get(list_all_drivers))
        .route("/:id/update", put(update_driver))
        .route("/:id/delete", delete(delete_driver))
}

async fn list_drivers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<Driver>>, AppError> {
    let Query(query) = query?;
    let controller = DriverController::new(state.drivers.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_driver(
    State(state): State<AppState>,
    request: Result<Json<CreateDriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateDriverResponse>), AppError> {
    let Json(request) = request?;
    let controller = DriverController::new(state.drivers.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_driver(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateDriverRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let controller = DriverController::new(state.drivers.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let controller = DriverController::new(state.drivers.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn list_all_drivers(
    State(state): State<AppState>,
) -> Result<Json<ListAllResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.drivers.clone());
    let response = controller.list_all().await?;
    Ok(Json(response))
}
