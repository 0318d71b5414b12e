//! Entity <-> DTO mapping.
//!
//! `*_from_insert` builds a fresh entity value from a validated insert DTO, the id it
//! should carry and its resolved parents. `*_to_dto` projects an entity for the wire,
//! with parent summaries that are `None` when the parent no longer exists.
//! The `From<&XDto> for XInsertDto` impls recover the client-writable fields of a DTO.

use crate::error::AppError;
use crate::model::*;
use crate::service::validation::parse_date;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

pub fn city_to_dto(city: &City) -> CityDto {
    CityDto {
        city_id: city.city_id.clone(),
        name: city.name.clone(),
    }
}

pub fn city_from_insert(input: &CityInsertDto, id: String) -> City {
    City {
        city_id: id,
        name: text(&input.name),
    }
}

pub fn hotel_to_dto(hotel: &Hotel, city: Option<&City>) -> HotelDto {
    HotelDto {
        hotel_id: hotel.hotel_id.clone(),
        name: hotel.name.clone(),
        address: hotel.address.clone(),
        city_id: hotel.city_id.clone(),
        city_name: city.map(|c| c.name.clone()),
    }
}

pub fn hotel_from_insert(input: &HotelInsertDto, id: String, city: &City) -> Hotel {
    Hotel {
        hotel_id: id,
        name: text(&input.name),
        address: text(&input.address),
        city_id: city.city_id.clone(),
    }
}

pub fn room_to_dto(room: &Room, hotel: Option<HotelDto>) -> RoomDto {
    RoomDto {
        room_id: room.room_id.clone(),
        name: room.name.clone(),
        capacity: room.capacity,
        image: room.image.clone(),
        hotel_id: room.hotel_id.clone(),
        hotel,
    }
}

pub fn room_from_insert(input: &RoomInsertDto, id: String, hotel: &Hotel) -> Room {
    Room {
        room_id: id,
        name: text(&input.name),
        capacity: input.capacity.unwrap_or_default(),
        image: text(&input.image),
        hotel_id: hotel.hotel_id.clone(),
    }
}

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        user_id: user.user_id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        user_type: user.user_type.clone(),
    }
}

/// The caller hashes the password; the plain text never reaches the entity.
pub fn user_from_insert(input: &UserInsertDto, id: String, password_hash: String) -> User {
    User {
        user_id: id,
        name: text(&input.name),
        email: text(&input.email).to_lowercase(),
        password_hash,
        user_type: text(&input.user_type),
    }
}

pub fn booking_to_dto(booking: &Booking, room: Option<RoomDto>, user: Option<UserDto>) -> BookingDto {
    BookingDto {
        booking_id: booking.booking_id.clone(),
        check_in: booking.check_in,
        check_out: booking.check_out,
        guest_quantity: booking.guest_quantity,
        room_id: booking.room_id.clone(),
        user_id: booking.user_id.clone(),
        room,
        user,
    }
}

pub fn booking_from_insert(
    input: &BookingInsertDto,
    id: String,
    room: &Room,
    user: &User,
) -> Result<Booking, AppError> {
    let date = |field: &Option<String>, name: &str| {
        field
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| AppError::Validation(format!("'{}' must be a valid date", name)))
    };
    Ok(Booking {
        booking_id: id,
        check_in: date(&input.check_in, "Check In")?,
        check_out: date(&input.check_out, "Check Out")?,
        guest_quantity: input.guest_quantity.unwrap_or_default(),
        room_id: room.room_id.clone(),
        user_id: user.user_id.clone(),
    })
}

impl From<&CityDto> for CityInsertDto {
    fn from(dto: &CityDto) -> Self {
        CityInsertDto {
            name: Some(dto.name.clone()),
        }
    }
}

impl From<&HotelDto> for HotelInsertDto {
    fn from(dto: &HotelDto) -> Self {
        HotelInsertDto {
            name: Some(dto.name.clone()),
            address: Some(dto.address.clone()),
            city_id: Some(dto.city_id.clone()),
        }
    }
}

impl From<&RoomDto> for RoomInsertDto {
    fn from(dto: &RoomDto) -> Self {
        RoomInsertDto {
            name: Some(dto.name.clone()),
            capacity: Some(dto.capacity),
            image: Some(dto.image.clone()),
            hotel_id: Some(dto.hotel_id.clone()),
        }
    }
}

impl From<&BookingDto> for BookingInsertDto {
    fn from(dto: &BookingDto) -> Self {
        BookingInsertDto {
            check_in: Some(dto.check_in.format(DATE_FORMAT).to_string()),
            check_out: Some(dto.check_out.format(DATE_FORMAT).to_string()),
            guest_quantity: Some(dto.guest_quantity),
            room_id: Some(dto.room_id.clone()),
            user_id: Some(dto.user_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn city() -> City {
        City {
            city_id: "c1".into(),
            name: "Rome".into(),
        }
    }

    fn hotel() -> Hotel {
        Hotel {
            hotel_id: "h1".into(),
            name: "Hotel Artemide".into(),
            address: "Via Nazionale 22".into(),
            city_id: "c1".into(),
        }
    }

    fn room() -> Room {
        Room {
            room_id: "r1".into(),
            name: "Deluxe".into(),
            capacity: 3,
            image: "deluxe.jpg".into(),
            hotel_id: "h1".into(),
        }
    }

    fn user() -> User {
        User {
            user_id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            user_type: "client".into(),
        }
    }

    #[test]
    fn city_round_trip_keeps_fields_but_not_id() {
        let original = city();
        let insert = CityInsertDto::from(&city_to_dto(&original));
        let rebuilt = city_from_insert(&insert, "c2".into());
        assert_eq!(rebuilt.name, original.name);
        assert_eq!(rebuilt.city_id, "c2");
    }

    #[test]
    fn hotel_round_trip() {
        let original = hotel();
        let dto = hotel_to_dto(&original, Some(&city()));
        assert_eq!(dto.city_name.as_deref(), Some("Rome"));
        let rebuilt = hotel_from_insert(&HotelInsertDto::from(&dto), original.hotel_id.clone(), &city());
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn room_round_trip() {
        let original = room();
        let dto = room_to_dto(&original, Some(hotel_to_dto(&hotel(), Some(&city()))));
        let rebuilt = room_from_insert(&RoomInsertDto::from(&dto), original.room_id.clone(), &hotel());
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn booking_round_trip() {
        let original = Booking {
            booking_id: "b1".into(),
            check_in: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(14, 0, 0).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap().and_hms_opt(11, 0, 0).unwrap(),
            guest_quantity: 2,
            room_id: "r1".into(),
            user_id: "u1".into(),
        };
        let dto = booking_to_dto(&original, Some(room_to_dto(&room(), None)), Some(user_to_dto(&user())));
        let rebuilt =
            booking_from_insert(&BookingInsertDto::from(&dto), original.booking_id.clone(), &room(), &user()).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn booking_round_trip_keeps_fractional_seconds() {
        let original = Booking {
            booking_id: "b2".into(),
            check_in: parse_date("2024-05-01T10:00:00.5").unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap().and_hms_milli_opt(9, 30, 0, 125).unwrap(),
            guest_quantity: 1,
            room_id: "r1".into(),
            user_id: "u1".into(),
        };
        let insert = BookingInsertDto::from(&booking_to_dto(&original, None, None));
        assert_eq!(insert.check_in.as_deref(), Some("2024-05-01T10:00:00.500"));
        let rebuilt = booking_from_insert(&insert, original.booking_id.clone(), &room(), &user()).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn user_dto_hides_password() {
        let json = serde_json::to_value(user_to_dto(&user())).unwrap();
        assert!(json.get("PasswordHash").is_none());
        assert!(json.get("Password").is_none());
        assert_eq!(json["Email"], "ada@example.com");
    }

    #[test]
    fn missing_parent_maps_to_none() {
        let dto = hotel_to_dto(&hotel(), None);
        assert_eq!(dto.city_name, None);
        let dto = room_to_dto(&room(), None);
        assert!(dto.hotel.is_none());
    }

    #[test]
    fn parents_come_from_resolved_entities() {
        let input = HotelInsertDto {
            name: Some(" Grand ".into()),
            address: Some("Corso 1".into()),
            city_id: Some("c1".into()),
        };
        let built = hotel_from_insert(&input, "h9".into(), &city());
        assert_eq!(built.name, "Grand");
        assert_eq!(built.city_id, "c1");
    }
}
