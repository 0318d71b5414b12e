//! Shared repository plumbing: id generation, required lookups and parent resolution
//! for building DTOs with denormalized parent summaries.

use crate::error::AppError;
use crate::mapper;
use crate::model::*;
use crate::store::{Entity, Session};
use std::collections::HashMap;

/// Fresh, globally unique entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Fetch by id, or a not-found naming the entity kind.
pub async fn require<E: Entity, S: Session>(session: &mut S, id: &str) -> Result<E, AppError> {
    session
        .find::<E>(id)
        .await?
        .ok_or_else(|| AppError::not_found(E::LABEL, id))
}

async fn index<E: Entity, S: Session>(session: &mut S) -> Result<HashMap<String, E>, AppError> {
    Ok(session
        .all::<E>()
        .await?
        .into_iter()
        .map(|e| (e.id().to_string(), e))
        .collect())
}

/// Parent entities needed to render child DTOs. Missing parents render as `None`.
#[derive(Default)]
pub struct Lookup {
    cities: HashMap<String, City>,
    hotels: HashMap<String, Hotel>,
    rooms: HashMap<String, Room>,
    users: HashMap<String, User>,
}

impl Lookup {
    pub async fn load_cities<S: Session>(&mut self, session: &mut S) -> Result<(), AppError> {
        self.cities = index(session).await?;
        Ok(())
    }

    pub async fn load_hotels<S: Session>(&mut self, session: &mut S) -> Result<(), AppError> {
        self.hotels = index(session).await?;
        Ok(())
    }

    pub async fn load_rooms<S: Session>(&mut self, session: &mut S) -> Result<(), AppError> {
        self.rooms = index(session).await?;
        Ok(())
    }

    pub async fn load_users<S: Session>(&mut self, session: &mut S) -> Result<(), AppError> {
        self.users = index(session).await?;
        Ok(())
    }

    pub async fn add_city<S: Session>(&mut self, session: &mut S, id: &str) -> Result<(), AppError> {
        if let Some(city) = session.find::<City>(id).await? {
            self.cities.insert(city.city_id.clone(), city);
        }
        Ok(())
    }

    /// The hotel and its city.
    pub async fn add_hotel<S: Session>(&mut self, session: &mut S, id: &str) -> Result<(), AppError> {
        if let Some(hotel) = session.find::<Hotel>(id).await? {
            self.add_city(session, &hotel.city_id).await?;
            self.hotels.insert(hotel.hotel_id.clone(), hotel);
        }
        Ok(())
    }

    /// The room, its hotel and that hotel's city.
    pub async fn add_room<S: Session>(&mut self, session: &mut S, id: &str) -> Result<(), AppError> {
        if let Some(room) = session.find::<Room>(id).await? {
            self.add_hotel(session, &room.hotel_id).await?;
            self.rooms.insert(room.room_id.clone(), room);
        }
        Ok(())
    }

    pub async fn add_user<S: Session>(&mut self, session: &mut S, id: &str) -> Result<(), AppError> {
        if let Some(user) = session.find::<User>(id).await? {
            self.users.insert(user.user_id.clone(), user);
        }
        Ok(())
    }

    pub fn hotel_dto(&self, hotel: &Hotel) -> HotelDto {
        mapper::hotel_to_dto(hotel, self.cities.get(&hotel.city_id))
    }

    pub fn room_dto(&self, room: &Room) -> RoomDto {
        let hotel = self.hotels.get(&room.hotel_id).map(|h| self.hotel_dto(h));
        mapper::room_to_dto(room, hotel)
    }

    pub fn booking_dto(&self, booking: &Booking) -> BookingDto {
        let room = self.rooms.get(&booking.room_id).map(|r| self.room_dto(r));
        let user = self.users.get(&booking.user_id).map(mapper::user_to_dto);
        mapper::booking_to_dto(booking, room, user)
    }
}
