//! OpenAPI document served at `/api/openapi.json`.

use crate::error::ErrorBody;
use crate::handlers::{booking, city, hotel, room, user};
use crate::model::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookings API",
        description = "Cities, hotels, rooms, users and bookings"
    ),
    paths(
        city::list_cities,
        city::get_city,
        city::create_city,
        city::update_city,
        city::delete_city,
        hotel::list_hotels,
        hotel::get_hotel,
        hotel::create_hotel,
        hotel::update_hotel,
        hotel::delete_hotel,
        room::list_rooms,
        room::get_room,
        room::create_room,
        room::update_room,
        room::delete_room,
        user::list_users,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user,
        booking::list_bookings,
        booking::get_booking,
        booking::create_booking,
        booking::update_booking,
        booking::delete_booking,
    ),
    components(schemas(
        CityDto,
        CityInsertDto,
        HotelDto,
        HotelInsertDto,
        RoomDto,
        RoomInsertDto,
        UserDto,
        UserInsertDto,
        BookingDto,
        BookingInsertDto,
        ErrorBody
    )),
    tags(
        (name = "City", description = "Cities"),
        (name = "Hotel", description = "Hotels within a city"),
        (name = "Room", description = "Rooms within a hotel"),
        (name = "User", description = "Guests and administrators"),
        (name = "Booking", description = "Room bookings")
    )
)]
pub struct ApiDoc;
