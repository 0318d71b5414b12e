//! Resource routes nested under `/api`.

use crate::handlers::{booking, city, hotel, room, user};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::store::Gateway;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `/city`, `/hotel`, `/room`, `/user`, `/booking` collections and items, plus `/openapi.json`.
pub fn api_routes<G: Gateway>() -> Router<AppState<G>> {
    Router::new()
        .route("/city", get(city::list_cities::<G>).post(city::create_city::<G>))
        .route(
            "/city/:id",
            get(city::get_city::<G>)
                .put(city::update_city::<G>)
                .delete(city::delete_city::<G>),
        )
        .route("/hotel", get(hotel::list_hotels::<G>).post(hotel::create_hotel::<G>))
        .route(
            "/hotel/:id",
            get(hotel::get_hotel::<G>)
                .put(hotel::update_hotel::<G>)
                .delete(hotel::delete_hotel::<G>),
        )
        .route("/room", get(room::list_rooms::<G>).post(room::create_room::<G>))
        .route(
            "/room/:id",
            get(room::get_room::<G>)
                .put(room::update_room::<G>)
                .delete(room::delete_room::<G>),
        )
        .route("/user", get(user::list_users::<G>).post(user::create_user::<G>))
        .route(
            "/user/:id",
            get(user::get_user::<G>)
                .put(user::update_user::<G>)
                .delete(user::delete_user::<G>),
        )
        .route("/booking", get(booking::list_bookings::<G>).post(booking::create_booking::<G>))
        .route(
            "/booking/:id",
            get(booking::get_booking::<G>)
                .put(booking::update_booking::<G>)
                .delete(booking::delete_booking::<G>),
        )
        .route("/openapi.json", get(openapi_json))
}
