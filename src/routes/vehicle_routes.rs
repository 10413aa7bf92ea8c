use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::common_dto::{ListAllResponse, ListQuery, MessageResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, CreateVehicleResponse, UpdateVehicleRequest};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Page;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/create", post(create_vehicle))
        .route("/all", get(list_all_vehicles))
        .route("/:id/update", put(update_vehicle))
        .route("/:id/delete", delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<Vehicle>>, AppError> {
    let Query(query) = query?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    request: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateVehicleResponse>), AppError> {
    let Json(request) = request?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn list_all_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ListAllResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.list_all().await?;
    Ok(Json(response))
}
