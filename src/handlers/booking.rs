//! Booking handlers. A booking resolves both its room and its user before any write.

use super::bind_body;
use crate::error::{AppError, ErrorBody};
use crate::model::{BookingDto, BookingInsertDto};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{BookingRepository, Validate};
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
    path = "/api/booking",
    tag = "Booking",
    responses((status = 200, description = "All bookings with room and user", body = Vec<BookingDto>))
)]
pub async fn list_bookings<G: Gateway>(State(state): State<AppState<G>>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let bookings = BookingRepository::new(&mut session).get_all().await?;
    Ok(success_many(bookings))
}

#[utoipa::path(
    get,
    path = "/api/booking/{id}",
    tag = "Booking",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingDto),
        (status = 404, description = "No such booking", body = ErrorBody)
    )
)]
pub async fn get_booking<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = BookingRepository::new(&mut session);
    let booking = repo.get_by_id(&id).await?;
    Ok(success_ok(repo.to_dto(&booking).await?))
}

#[utoipa::path(
    post,
    path = "/api/booking",
    tag = "Booking",
    request_body = BookingInsertDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Referenced room or user does not exist", body = ErrorBody)
    )
)]
pub async fn create_booking<G: Gateway>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input: BookingInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = BookingRepository::new(&mut session);
    let room = repo.get_room_by_id(input.room_id.as_deref().unwrap_or_default()).await?;
    let user = repo.get_user_by_id(input.user_id.as_deref().unwrap_or_default()).await?;
    let booking = repo.add(&input, &room, &user).await?;
    Ok(success_created(format!("/api/booking/{}", booking.booking_id), booking))
}

#[utoipa::path(
    put,
    path = "/api/booking/{id}",
    tag = "Booking",
    params(("id" = String, Path, description = "Booking id")),
    request_body = BookingInsertDto,
    responses(
        (status = 200, description = "Booking replaced", body = BookingDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Booking, room or user does not exist", body = ErrorBody)
    )
)]
pub async fn update_booking<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: BookingInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = BookingRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    let room = repo.get_room_by_id(input.room_id.as_deref().unwrap_or_default()).await?;
    let user = repo.get_user_by_id(input.user_id.as_deref().unwrap_or_default()).await?;
    let booking = repo.update(&found, &input, &room, &user).await?;
    Ok(success_ok(booking))
}

#[utoipa::path(
    delete,
    path = "/api/booking/{id}",
    tag = "Booking",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "No such booking", body = ErrorBody)
    )
)]
pub async fn delete_booking<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = BookingRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    repo.delete(&found).await?;
    Ok(StatusCode::NO_CONTENT)
}
