use super::bind_body;
use crate::error::{AppError, ErrorBody};
use crate::model::{HotelDto, HotelInsertDto};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{HotelRepository, Validate};
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
    path = "/api/hotel",
    tag = "Hotel",
    responses((status = 200, description = "All hotels with their city name", body = Vec<HotelDto>))
)]
pub async fn list_hotels<G: Gateway>(State(state): State<AppState<G>>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let hotels = HotelRepository::new(&mut session).get_all().await?;
    Ok(success_many(hotels))
}

#[utoipa::path(
    get,
    path = "/api/hotel/{id}",
    tag = "Hotel",
    params(("id" = String, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel found", body = HotelDto),
        (status = 404, description = "No such hotel", body = ErrorBody)
    )
)]
pub async fn get_hotel<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = HotelRepository::new(&mut session);
    let hotel = repo.get_by_id(&id).await?;
    Ok(success_ok(repo.to_dto(&hotel).await?))
}

#[utoipa::path(
    post,
    path = "/api/hotel",
    tag = "Hotel",
    request_body = HotelInsertDto,
    responses(
        (status = 201, description = "Hotel created", body = HotelDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Referenced city does not exist", body = ErrorBody)
    )
)]
pub async fn create_hotel<G: Gateway>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input: HotelInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = HotelRepository::new(&mut session);
    let city = repo.get_city_by_id(input.city_id.as_deref().unwrap_or_default()).await?;
    let hotel = repo.add(&input, &city).await?;
    Ok(success_created(format!("/api/hotel/{}", hotel.hotel_id), hotel))
}

#[utoipa::path(
    put,
    path = "/api/hotel/{id}",
    tag = "Hotel",
    params(("id" = String, Path, description = "Hotel id")),
    request_body = HotelInsertDto,
    responses(
        (status = 200, description = "Hotel replaced", body = HotelDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "Hotel or referenced city does not exist", body = ErrorBody)
    )
)]
pub async fn update_hotel<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: HotelInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = HotelRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    let city = repo.get_city_by_id(input.city_id.as_deref().unwrap_or_default()).await?;
    let hotel = repo.update(&found, &input, &city).await?;
    Ok(success_ok(hotel))
}

#[utoipa::path(
    delete,
    path = "/api/hotel/{id}",
    tag = "Hotel",
    params(("id" = String, Path, description = "Hotel id")),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 404, description = "No such hotel", body = ErrorBody)
    )
)]
pub async fn delete_hotel<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = HotelRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    repo.delete(&found).await?;
    Ok(StatusCode::NO_CONTENT)
}
