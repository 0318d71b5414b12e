//! Standard response envelope helpers: `{ "Data": ..., "Result": "Success" }`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    pub data: T,
    pub result: &'static str,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope {
            data,
            result: "Success",
        }
    }
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::success(data)))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    (StatusCode::OK, Json(Envelope::success(data)))
}

/// 201 Created with a `Location` pointing at the new resource.
pub fn success_created<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Envelope::success(data)),
    )
        .into_response()
}
