//! HTTP handlers for city, hotel, room, user and booking CRUD.
//!
//! Handlers bind and validate the body, open one session per request and hand off
//! to a repository. They never touch the store directly.

pub mod booking;
pub mod city;
pub mod hotel;
pub mod room;
pub mod user;

use crate::case::value_keys_to_pascal_case;
use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a request body into an insert DTO, accepting snake_case and camelCase keys.
pub(crate) fn bind_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(mut value) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if !value.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    value_keys_to_pascal_case(&mut value);
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))
}
