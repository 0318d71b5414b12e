use super::bind_body;
use crate::error::{AppError, ErrorBody};
use crate::model::{CityDto, CityInsertDto};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{CityRepository, Validate};
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
    path = "/api/city",
    tag = "City",
    responses((status = 200, description = "All cities", body = Vec<CityDto>))
)]
pub async fn list_cities<G: Gateway>(State(state): State<AppState<G>>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let cities = CityRepository::new(&mut session).get_all().await?;
    Ok(success_many(cities))
}

#[utoipa::path(
    get,
    path = "/api/city/{id}",
    tag = "City",
    params(("id" = String, Path, description = "City id")),
    responses(
        (status = 200, description = "City found", body = CityDto),
        (status = 404, description = "No such city", body = ErrorBody)
    )
)]
pub async fn get_city<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = CityRepository::new(&mut session);
    let city = repo.get_by_id(&id).await?;
    Ok(success_ok(repo.to_dto(&city)))
}

#[utoipa::path(
    post,
    path = "/api/city",
    tag = "City",
    request_body = CityInsertDto,
    responses(
        (status = 201, description = "City created", body = CityDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody)
    )
)]
pub async fn create_city<G: Gateway>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input: CityInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let city = CityRepository::new(&mut session).add(&input).await?;
    Ok(success_created(format!("/api/city/{}", city.city_id), city))
}

#[utoipa::path(
    put,
    path = "/api/city/{id}",
    tag = "City",
    params(("id" = String, Path, description = "City id")),
    request_body = CityInsertDto,
    responses(
        (status = 200, description = "City replaced", body = CityDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "No such city", body = ErrorBody)
    )
)]
pub async fn update_city<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: CityInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = CityRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    let city = repo.update(&found, &input).await?;
    Ok(success_ok(city))
}

#[utoipa::path(
    delete,
    path = "/api/city/{id}",
    tag = "City",
    params(("id" = String, Path, description = "City id")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 404, description = "No such city", body = ErrorBody)
    )
)]
pub async fn delete_city<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = CityRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    repo.delete(&found).await?;
    Ok(StatusCode::NO_CONTENT)
}
