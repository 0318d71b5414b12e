//! User handlers. Passwords are accepted on write and never returned.

use super::bind_body;
use crate::error::{AppError, ErrorBody};
use crate::model::{UserDto, UserInsertDto};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{UserRepository, Validate};
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
    path = "/api/user",
    tag = "User",
    responses((status = 200, description = "All users", body = Vec<UserDto>))
)]
pub async fn list_users<G: Gateway>(State(state): State<AppState<G>>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let users = UserRepository::new(&mut session).get_all().await?;
    Ok(success_many(users))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "User",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn get_user<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = UserRepository::new(&mut session);
    let user = repo.get_by_id(&id).await?;
    Ok(success_ok(repo.to_dto(&user)))
}

#[utoipa::path(
    post,
    path = "/api/user",
    tag = "User",
    request_body = UserInsertDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody)
    )
)]
pub async fn create_user<G: Gateway>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input: UserInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let user = UserRepository::new(&mut session).add(&input).await?;
    Ok(success_created(format!("/api/user/{}", user.user_id), user))
}

#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "User",
    params(("id" = String, Path, description = "User id")),
    request_body = UserInsertDto,
    responses(
        (status = 200, description = "User replaced", body = UserDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn update_user<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: UserInsertDto = bind_body(payload)?;
    input.validate().into_result()?;
    let mut session = state.gateway.begin().await?;
    let mut repo = UserRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    let user = repo.update(&found, &input).await?;
    Ok(success_ok(user))
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "User",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn delete_user<G: Gateway>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut session = state.gateway.begin().await?;
    let mut repo = UserRepository::new(&mut session);
    let found = repo.get_by_id(&id).await?;
    repo.delete(&found).await?;
    Ok(StatusCode::NO_CONTENT)
}
