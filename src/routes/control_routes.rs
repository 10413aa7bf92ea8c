use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::ControlController;
use crate::dto::common_dto::{ListQuery, MessageResponse};
use crate::dto::control_dto::{
    ControlResponse, CreateControlRequest, CreateControlResponse, UpdateControlRequest,
};
use crate::dto::vehicle_dto::TotalKmResponse;
use crate::models::ControlDetail;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Page;

// `/:id/total_km` recibe el id del vehículo; el segmento comparte nombre
// con el resto de rutas para que el router no lo considere un conflicto.
pub fn create_control_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_controls))
        .route("/create", post(create_control))
        .route("/:id", get(get_control))
        .route("/:id/update", put(update_control))
        .route("/:id/delete", delete(delete_control))
        .route("/:id/total_km", get(total_km))
}

fn controller(state: &AppState) -> ControlController {
    ControlController::new(
        state.controls.clone(),
        state.vehicles.clone(),
        state.drivers.clone(),
    )
}

async fn list_controls(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<ControlDetail>>, AppError> {
    let Query(query) = query?;
    let response = controller(&state).list(query).await?;
    Ok(Json(response))
}

async fn create_control(
    State(state): State<AppState>,
    request: Result<Json<CreateControlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateControlResponse>), AppError> {
    let Json(request) = request?;
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_control(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ControlResponse>, AppError> {
    let Path(id) = id?;
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_control(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateControlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_control(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}

async fn total_km(
    State(state): State<AppState>,
    vehicle_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TotalKmResponse>, AppError> {
    let Path(vehicle_id) = vehicle_id?;
    let response = controller(&state).total_km(vehicle_id).await?;
    Ok(Json(response))
}
