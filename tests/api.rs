//! Router tests against the in-memory store.
//!
//! Each test builds the full application (operational routes, `/api` resources, body
//! limit and trace layers) and drives it with `oneshot` requests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bookings_api::model::{City, Hotel};
use bookings_api::{app, AppState, MemoryGateway};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

const BODY_LIMIT: usize = 64 * 1024;

struct Response {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

fn setup() -> (Router, MemoryGateway) {
    let gateway = MemoryGateway::new();
    (app(AppState::new(gateway.clone()), BODY_LIMIT), gateway)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Response { status, location, body }
}

async fn create(app: &Router, resource: &str, body: Value) -> Value {
    let res = send(app, "POST", &format!("/api/{}", resource), Some(body)).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["Data"].clone()
}

fn id_of<'a>(data: &'a Value, key: &str) -> &'a str {
    data[key].as_str().unwrap()
}

/// City, hotel, room and user ready for a booking.
async fn seed(app: &Router) -> (String, String, String, String) {
    let city = create(app, "city", json!({ "Name": "Rome" })).await;
    let city_id = id_of(&city, "CityId").to_string();
    let hotel = create(
        app,
        "hotel",
        json!({ "Name": "Hotel Artemide", "Address": "Via Nazionale 22", "CityId": city_id }),
    )
    .await;
    let hotel_id = id_of(&hotel, "HotelId").to_string();
    let room = create(
        app,
        "room",
        json!({ "Name": "Deluxe", "Capacity": 3, "Image": "deluxe.jpg", "HotelId": hotel_id }),
    )
    .await;
    let room_id = id_of(&room, "RoomId").to_string();
    let user = create(
        app,
        "user",
        json!({ "Name": "Ada", "Email": "Ada@Example.com", "Password": "secret1", "UserType": "client" }),
    )
    .await;
    let user_id = id_of(&user, "UserId").to_string();
    (city_id, hotel_id, room_id, user_id)
}

#[tokio::test]
async fn empty_collection_lists_nothing() {
    let (app, _) = setup();
    for resource in ["city", "hotel", "room", "user", "booking"] {
        let res = send(&app, "GET", &format!("/api/{}", resource), None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({ "Data": [], "Result": "Success" }));
    }
}

#[tokio::test]
async fn create_city_returns_created_with_location() {
    let (app, gateway) = setup();
    let res = send(&app, "POST", "/api/city", Some(json!({ "Name": "Rome" }))).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["Result"], "Success");
    assert_eq!(res.body["Data"]["Name"], "Rome");
    let id = res.body["Data"]["CityId"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(res.location.as_deref(), Some(format!("/api/city/{}", id).as_str()));
    assert_eq!(gateway.count::<City>().await, 1);

    let fetched = send(&app, "GET", &format!("/api/city/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["Data"], res.body["Data"]);
}

#[tokio::test]
async fn every_create_gets_a_fresh_id() {
    let (app, _) = setup();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..5 {
        let city = create(&app, "city", json!({ "Name": "Rome" })).await;
        assert!(seen.insert(id_of(&city, "CityId").to_string()));
    }
    let list = send(&app, "GET", "/api/city", None).await;
    assert_eq!(list.body["Data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn hotel_with_unknown_city_is_not_found() {
    let (app, gateway) = setup();
    let res = send(
        &app,
        "POST",
        "/api/hotel",
        Some(json!({ "Name": "Grand", "Address": "Corso 1", "CityId": "nonexistent" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["Result"], "Error");
    assert_eq!(res.body["Message"], "City 'nonexistent' not found");
    assert_eq!(gateway.count::<Hotel>().await, 0);
}

#[tokio::test]
async fn update_of_missing_city_leaves_store_unchanged() {
    let (app, gateway) = setup();
    let city = create(&app, "city", json!({ "Name": "Rome" })).await;
    let res = send(&app, "PUT", "/api/city/nonexistent", Some(json!({ "Name": "Milan" }))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(gateway.count::<City>().await, 1);

    let list = send(&app, "GET", "/api/city", None).await;
    assert_eq!(list.body["Data"], json!([city]));
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let (app, gateway) = setup();
    let city = create(&app, "city", json!({ "Name": "Rome" })).await;
    let uri = format!("/api/city/{}", id_of(&city, "CityId"));

    let first = send(&app, "DELETE", &uri, None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(first.body, Value::Null);
    assert_eq!(gateway.count::<City>().await, 0);

    let second = send(&app, "DELETE", &uri, None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", &uri, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_failures_are_bad_requests() {
    let (app, _) = setup();
    let res = send(&app, "POST", "/api/city", Some(json!({ "Name": "  " }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "Message": "'Name' must not be empty.", "Result": "Error" }));

    let (_, _, room_id, user_id) = seed(&app).await;
    for quantity in [json!(0), json!(-1), json!(""), json!("many")] {
        let res = send(
            &app,
            "POST",
            "/api/booking",
            Some(json!({
                "CheckIn": "2024-05-01",
                "CheckOut": "2024-05-04",
                "GuestQuantity": quantity,
                "RoomId": room_id,
                "UserId": user_id
            })),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{}", quantity);
        assert!(res.body["Message"].as_str().unwrap().contains("'Guest Quantity'"));
    }

    let res = send(
        &app,
        "POST",
        "/api/booking",
        Some(json!({
            "CheckIn": "next week",
            "CheckOut": "2024-05-04",
            "GuestQuantity": 2,
            "RoomId": room_id,
            "UserId": user_id
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["Message"], "'Check In' must be a valid date");
}

#[tokio::test]
async fn hotel_referencing_missing_city_only_is_not_found() {
    let (app, gateway) = setup();
    let res = send(&app, "POST", "/api/hotel", Some(json!({ "CityId": "nonexistent" }))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["Result"], "Error");
    assert_eq!(res.body["Message"], "City 'nonexistent' not found");
    assert_eq!(gateway.count::<Hotel>().await, 0);

    let res = send(&app, "POST", "/api/hotel", Some(json!({ "Name": "Grand" }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["Message"], "'City Id' must not be empty.");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _) = setup();
    let request = Request::builder()
        .method("POST")
        .uri("/api/city")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"Name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["Result"], "Error");
    assert!(!body["Message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn accepts_camel_and_snake_case_keys() {
    let (app, _) = setup();
    let city = create(&app, "city", json!({ "name": "Rome" })).await;
    let hotel = create(
        &app,
        "hotel",
        json!({ "name": "Grand", "address": "Corso 1", "cityId": id_of(&city, "CityId") }),
    )
    .await;
    let room = create(
        &app,
        "room",
        json!({ "name": "Single", "capacity": "1", "image": "single.png", "hotel_id": id_of(&hotel, "HotelId") }),
    )
    .await;
    assert_eq!(room["Capacity"], 1);
    assert_eq!(room["Hotel"]["CityName"], "Rome");
}

#[tokio::test]
async fn booking_embeds_room_hotel_and_user() {
    let (app, _) = setup();
    let (city_id, hotel_id, room_id, user_id) = seed(&app).await;
    let booking = create(
        &app,
        "booking",
        json!({
            "CheckIn": "2024-05-01T14:00:00",
            "CheckOut": "2024-05-04",
            "GuestQuantity": 2,
            "RoomId": room_id,
            "UserId": user_id
        }),
    )
    .await;
    assert_eq!(booking["CheckIn"], "2024-05-01T14:00:00");
    assert_eq!(booking["CheckOut"], "2024-05-04T00:00:00");
    assert_eq!(booking["GuestQuantity"], 2);
    assert_eq!(booking["Room"]["RoomId"], room_id.as_str());
    assert_eq!(booking["Room"]["Hotel"]["HotelId"], hotel_id.as_str());
    assert_eq!(booking["Room"]["Hotel"]["CityId"], city_id.as_str());
    assert_eq!(booking["Room"]["Hotel"]["CityName"], "Rome");
    assert_eq!(booking["User"]["Email"], "ada@example.com");

    let list = send(&app, "GET", "/api/booking", None).await;
    assert_eq!(list.body["Data"], json!([booking]));
}

#[tokio::test]
async fn booking_requires_existing_room_and_user() {
    let (app, _) = setup();
    let (_, _, room_id, _) = seed(&app).await;
    let res = send(
        &app,
        "POST",
        "/api/booking",
        Some(json!({
            "CheckIn": "2024-05-01",
            "CheckOut": "2024-05-04",
            "GuestQuantity": 2,
            "RoomId": room_id,
            "UserId": "ghost"
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["Message"], "User 'ghost' not found");
    let list = send(&app, "GET", "/api/booking", None).await;
    assert_eq!(list.body["Data"], json!([]));
}

#[tokio::test]
async fn users_never_expose_passwords() {
    let (app, _) = setup();
    let (_, _, _, user_id) = seed(&app).await;
    let res = send(&app, "GET", &format!("/api/user/{}", user_id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let data = res.body["Data"].as_object().unwrap();
    assert!(!data.contains_key("Password"));
    assert!(!data.contains_key("PasswordHash"));
    assert_eq!(data["UserType"], "client");

    let res = send(
        &app,
        "POST",
        "/api/user",
        Some(json!({ "Name": "Bob", "Email": "bob", "Password": "123", "UserType": "guest" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["Message"],
        "'Email' is not a valid email address. 'Password' must be at least 6 characters. 'User Type' must be one of: admin, client."
    );
}

#[tokio::test]
async fn update_replaces_the_whole_entity() {
    let (app, _) = setup();
    let (_, hotel_id, _, _) = seed(&app).await;
    let milan = create(&app, "city", json!({ "Name": "Milan" })).await;
    let milan_id = id_of(&milan, "CityId");

    let res = send(
        &app,
        "PUT",
        &format!("/api/hotel/{}", hotel_id),
        Some(json!({ "Name": "Hotel Principe", "Address": "Piazza 4", "CityId": milan_id })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["Data"],
        json!({
            "HotelId": hotel_id,
            "Name": "Hotel Principe",
            "Address": "Piazza 4",
            "CityId": milan_id,
            "CityName": "Milan"
        })
    );

    let res = send(
        &app,
        "PUT",
        &format!("/api/hotel/{}", hotel_id),
        Some(json!({ "Name": "Hotel Principe", "Address": "Piazza 4", "CityId": "nowhere" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let fetched = send(&app, "GET", &format!("/api/hotel/{}", hotel_id), None).await;
    assert_eq!(fetched.body["Data"]["CityId"], milan_id);
}

#[tokio::test]
async fn deleted_parent_renders_as_null() {
    let (app, _) = setup();
    let (city_id, hotel_id, room_id, _) = seed(&app).await;

    let res = send(&app, "DELETE", &format!("/api/city/{}", city_id), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let hotel = send(&app, "GET", &format!("/api/hotel/{}", hotel_id), None).await;
    assert_eq!(hotel.status, StatusCode::OK);
    assert_eq!(hotel.body["Data"]["CityName"], Value::Null);

    send(&app, "DELETE", &format!("/api/hotel/{}", hotel_id), None).await;
    let rooms = send(&app, "GET", "/api/room", None).await;
    assert_eq!(rooms.body["Data"][0]["RoomId"], room_id.as_str());
    assert_eq!(rooms.body["Data"][0]["Hotel"], Value::Null);
}

#[tokio::test]
async fn operational_routes() {
    let (app, _) = setup();
    let health = send(&app, "GET", "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let ready = send(&app, "GET", "/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);

    let version = send(&app, "GET", "/version", None).await;
    assert_eq!(version.body["name"], "bookings-api");

    let doc = send(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(doc.status, StatusCode::OK);
    assert!(doc.body["paths"]["/api/booking/{id}"].is_object());
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let (app, _) = setup();
    let name = "x".repeat(BODY_LIMIT + 1);
    let res = send(&app, "POST", "/api/city", Some(json!({ "Name": name }))).await;
    assert!(res.status.is_client_error());
}
