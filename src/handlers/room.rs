use super::bind_body;
use crate::error::{AppError, ErrorBody};
use crate::model::{RoomDto, RoomInsertDto};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{RoomRepository, Validate};
use crate::state::AppState;
use crate::store::Gateway;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/api/room",
    tag = "Room",
    responses((status = 200, description = "All rooms with their hotel", body = Vec<RoomDto>))
)]
pub async fn list_rooms<G: Gateway>(State(state): State<AppState<G>>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let rooms = RoomRepository::new(&mut session).get_all().await?;
    Ok(success_many(rooms))
}

#[utoipa::path(
    get,
    path = "/api/room/{id}",
    tag = "Room",
    params(("id" = String, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room found", body = RoomDto),
        (status = 404, description = "No such room", body = ErrorBody)
    )
)]
pub async fn get_room<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = RoomRepository::new(&mut session);
    let room = repo.get_by_id(&id).await?;
    Ok(success_ok(repo.to_dto(&room).await?))
}

#[utoipa::path(
    post,
    path = "/api/room",
    tag = "Room",
    request_body = RoomInsertDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Referenced hotel does not exist", body = ErrorBody)
    )
)]
pub async fn create_room<G: Gateway>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input: RoomInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = RoomRepository::new(&mut session);
    let hotel = repo.get_hotel_by_id(input.hotel_id.as_deref().unwrap_or_default()).await?;
    let room = repo.add(&input, &hotel).await?;
    Ok(success_created(format!("/api/room/{}", room.room_id), room))
}

#[utoipa::path(
    put,
    path = "/api/room/{id}",
    tag = "Room",
    params(("id" = String, Path, description = "Room id")),
    request_body = RoomInsertDto,
    responses(
        (status = 200, description = "Room replaced", body = RoomDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Room or referenced hotel does not exist", body = ErrorBody)
    )
)]
pub async fn update_room<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: RoomInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = RoomRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    let hotel = repo.get_hotel_by_id(input.hotel_id.as_deref().unwrap_or_default()).await?;
    let room = repo.update(&found, &input, &hotel).await?;
    Ok(success_ok(room))
}

#[utoipa::path(
    delete,
    path = "/api/room/{id}",
    tag = "Room",
    params(("id" = String, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "No such room", body = ErrorBody)
    )
)]
pub async fn delete_room<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = RoomRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    repo.delete(&found).await?;
    Ok(StatusCode::NO_CONTENT)
}
