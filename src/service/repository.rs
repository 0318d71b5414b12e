//! One repository per entity. Each borrows the request's session, maps between DTOs and
//! entities, assigns ids on create and commits after every mutation.
//!
//! `update` replaces the whole stored entity with one rebuilt from the insert DTO,
//! keeping only the id. `delete` does not cascade to children.

use super::crud::{new_id, require, Lookup};
use super::password::hash_password;
use crate::error::AppError;
use crate::mapper;
use crate::model::*;
use crate::store::Session;

pub struct CityRepository<'s, S> {
    session: &'s mut S,
}

impl<'s, S: Session> CityRepository<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        CityRepository { session }
    }

    pub async fn get_all(&mut self) -> Result<Vec<CityDto>, AppError> {
        let cities = self.session.all::<City>().await?;
        Ok(cities.iter().map(mapper::city_to_dto).collect())
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<City, AppError> {
        require::<City, _>(&mut *self.session, id).await
    }

    pub fn to_dto(&self, city: &City) -> CityDto {
        mapper::city_to_dto(city)
    }

    pub async fn add(&mut self, input: &CityInsertDto) -> Result<CityDto, AppError> {
        let city = mapper::city_from_insert(input, new_id());
        self.session.insert(&city).await?;
        self.session.commit().await?;
        tracing::info!(city_id = %city.city_id, "city created");
        Ok(mapper::city_to_dto(&city))
    }

    pub async fn update(&mut self, found: &City, input: &CityInsertDto) -> Result<CityDto, AppError> {
        let city = mapper::city_from_insert(input, found.city_id.clone());
        self.session.replace(&city).await?;
        self.session.commit().await?;
        tracing::info!(city_id = %city.city_id, "city updated");
        Ok(mapper::city_to_dto(&city))
    }

    pub async fn delete(&mut self, found: &City) -> Result<(), AppError> {
        self.session.remove::<City>(&found.city_id).await?;
        self.session.commit().await?;
        tracing::info!(city_id = %found.city_id, "city deleted");
        Ok(())
    }
}

pub struct HotelRepository<'s, S> {
    session: &'s mut S,
}

impl<'s, S: Session> HotelRepository<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        HotelRepository { session }
    }

    pub async fn get_all(&mut self) -> Result<Vec<HotelDto>, AppError> {
        let hotels = self.session.all::<Hotel>().await?;
        let mut lookup = Lookup::default();
        lookup.load_cities(&mut *self.session).await?;
        Ok(hotels.iter().map(|h| lookup.hotel_dto(h)).collect())
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<Hotel, AppError> {
        require::<Hotel, _>(&mut *self.session, id).await
    }

    pub async fn get_city_by_id(&mut self, id: &str) -> Result<City, AppError> {
        require::<City, _>(&mut *self.session, id).await
    }

    pub async fn to_dto(&mut self, hotel: &Hotel) -> Result<HotelDto, AppError> {
        let mut lookup = Lookup::default();
        lookup.add_city(&mut *self.session, &hotel.city_id).await?;
        Ok(lookup.hotel_dto(hotel))
    }

    pub async fn add(&mut self, input: &HotelInsertDto, city: &City) -> Result<HotelDto, AppError> {
        let hotel = mapper::hotel_from_insert(input, new_id(), city);
        self.session.insert(&hotel).await?;
        self.session.commit().await?;
        tracing::info!(hotel_id = %hotel.hotel_id, city_id = %city.city_id, "hotel created");
        Ok(mapper::hotel_to_dto(&hotel, Some(city)))
    }

    pub async fn update(&mut self, found: &Hotel, input: &HotelInsertDto, city: &City) -> Result<HotelDto, AppError> {
        let hotel = mapper::hotel_from_insert(input, found.hotel_id.clone(), city);
        self.session.replace(&hotel).await?;
        self.session.commit().await?;
        tracing::info!(hotel_id = %hotel.hotel_id, "hotel updated");
        Ok(mapper::hotel_to_dto(&hotel, Some(city)))
    }

    pub async fn delete(&mut self, found: &Hotel) -> Result<(), AppError> {
        self.session.remove::<Hotel>(&found.hotel_id).await?;
        self.session.commit().await?;
        tracing::info!(hotel_id = %found.hotel_id, "hotel deleted");
        Ok(())
    }
}

pub struct RoomRepository<'s, S> {
    session: &'s mut S,
}

impl<'s, S: Session> RoomRepository<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        RoomRepository { session }
    }

    pub async fn get_all(&mut self) -> Result<Vec<RoomDto>, AppError> {
        let rooms = self.session.all::<Room>().await?;
        let mut lookup = Lookup::default();
        lookup.load_hotels(&mut *self.session).await?;
        lookup.load_cities(&mut *self.session).await?;
        Ok(rooms.iter().map(|r| lookup.room_dto(r)).collect())
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<Room, AppError> {
        require::<Room, _>(&mut *self.session, id).await
    }

    pub async fn get_hotel_by_id(&mut self, id: &str) -> Result<Hotel, AppError> {
        require::<Hotel, _>(&mut *self.session, id).await
    }

    pub async fn to_dto(&mut self, room: &Room) -> Result<RoomDto, AppError> {
        let mut lookup = Lookup::default();
        lookup.add_hotel(&mut *self.session, &room.hotel_id).await?;
        Ok(lookup.room_dto(room))
    }

    pub async fn add(&mut self, input: &RoomInsertDto, hotel: &Hotel) -> Result<RoomDto, AppError> {
        let room = mapper::room_from_insert(input, new_id(), hotel);
        self.session.insert(&room).await?;
        self.session.commit().await?;
        tracing::info!(room_id = %room.room_id, hotel_id = %hotel.hotel_id, "room created");
        self.to_dto(&room).await
    }

    pub async fn update(&mut self, found: &Room, input: &RoomInsertDto, hotel: &Hotel) -> Result<RoomDto, AppError> {
        let room = mapper::room_from_insert(input, found.room_id.clone(), hotel);
        self.session.replace(&room).await?;
        self.session.commit().await?;
        tracing::info!(room_id = %room.room_id, "room updated");
        self.to_dto(&room).await
    }

    pub async fn delete(&mut self, found: &Room) -> Result<(), AppError> {
        self.session.remove::<Room>(&found.room_id).await?;
        self.session.commit().await?;
        tracing::info!(room_id = %found.room_id, "room deleted");
        Ok(())
    }
}

pub struct UserRepository<'s, S> {
    session: &'s mut S,
}

impl<'s, S: Session> UserRepository<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        UserRepository { session }
    }

    pub async fn get_all(&mut self) -> Result<Vec<UserDto>, AppError> {
        let users = self.session.all::<User>().await?;
        Ok(users.iter().map(mapper::user_to_dto).collect())
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<User, AppError> {
        require::<User, _>(&mut *self.session, id).await
    }

    pub fn to_dto(&self, user: &User) -> UserDto {
        mapper::user_to_dto(user)
    }

    pub async fn add(&mut self, input: &UserInsertDto) -> Result<UserDto, AppError> {
        let hash = hash_password(input.password.as_deref().unwrap_or_default())?;
        let user = mapper::user_from_insert(input, new_id(), hash);
        self.session.insert(&user).await?;
        self.session.commit().await?;
        tracing::info!(user_id = %user.user_id, "user created");
        Ok(mapper::user_to_dto(&user))
    }

    pub async fn update(&mut self, found: &User, input: &UserInsertDto) -> Result<UserDto, AppError> {
        let hash = hash_password(input.password.as_deref().unwrap_or_default())?;
        let user = mapper::user_from_insert(input, found.user_id.clone(), hash);
        self.session.replace(&user).await?;
        self.session.commit().await?;
        tracing::info!(user_id = %user.user_id, "user updated");
        Ok(mapper::user_to_dto(&user))
    }

    pub async fn delete(&mut self, found: &User) -> Result<(), AppError> {
        self.session.remove::<User>(&found.user_id).await?;
        self.session.commit().await?;
        tracing::info!(user_id = %found.user_id, "user deleted");
        Ok(())
    }
}

pub struct BookingRepository<'s, S> {
    session: &'s mut S,
}

impl<'s, S: Session> BookingRepository<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        BookingRepository { session }
    }

    pub async fn get_all(&mut self) -> Result<Vec<BookingDto>, AppError> {
        let bookings = self.session.all::<Booking>().await?;
        let mut lookup = Lookup::default();
        lookup.load_rooms(&mut *self.session).await?;
        lookup.load_hotels(&mut *self.session).await?;
        lookup.load_cities(&mut *self.session).await?;
        lookup.load_users(&mut *self.session).await?;
        Ok(bookings.iter().map(|b| lookup.booking_dto(b)).collect())
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<Booking, AppError> {
        require::<Booking, _>(&mut *self.session, id).await
    }

    pub async fn get_room_by_id(&mut self, id: &str) -> Result<Room, AppError> {
        require::<Room, _>(&mut *self.session, id).await
    }

    pub async fn get_user_by_id(&mut self, id: &str) -> Result<User, AppError> {
        require::<User, _>(&mut *self.session, id).await
    }

    pub async fn to_dto(&mut self, booking: &Booking) -> Result<BookingDto, AppError> {
        let mut lookup = Lookup::default();
        lookup.add_room(&mut *self.session, &booking.room_id).await?;
        lookup.add_user(&mut *self.session, &booking.user_id).await?;
        Ok(lookup.booking_dto(booking))
    }

    pub async fn add(&mut self, input: &BookingInsertDto, room: &Room, user: &User) -> Result<BookingDto, AppError> {
        let booking = mapper::booking_from_insert(input, new_id(), room, user)?;
        self.session.insert(&booking).await?;
        self.session.commit().await?;
        tracing::info!(booking_id = %booking.booking_id, room_id = %room.room_id, "booking created");
        self.to_dto(&booking).await
    }

    pub async fn update(
        &mut self,
        found: &Booking,
        input: &BookingInsertDto,
        room: &Room,
        user: &User,
    ) -> Result<BookingDto, AppError> {
        let booking = mapper::booking_from_insert(input, found.booking_id.clone(), room, user)?;
        self.session.replace(&booking).await?;
        self.session.commit().await?;
        tracing::info!(booking_id = %booking.booking_id, "booking updated");
        self.to_dto(&booking).await
    }

    pub async fn delete(&mut self, found: &Booking) -> Result<(), AppError> {
        self.session.remove::<Booking>(&found.booking_id).await?;
        self.session.commit().await?;
        tracing::info!(booking_id = %found.booking_id, "booking deleted");
        Ok(())
    }
}
