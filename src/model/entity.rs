//! Persisted domain entities and their table layout.

use crate::store::{Column, Entity, PgQuery, Table};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub city_id: String,
    pub name: String,
}

impl Entity for City {
    const LABEL: &'static str = "City";
    const TABLE: Table = Table {
        name: "cities",
        columns: &[
            Column::key("city_id"),
            Column::new("name", "TEXT NOT NULL"),
        ],
    };

    fn id(&self) -> &str {
        &self.city_id
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.city_id).bind(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub address: String,
    pub city_id: String,
}

impl Entity for Hotel {
    const LABEL: &'static str = "Hotel";
    const TABLE: Table = Table {
        name: "hotels",
        columns: &[
            Column::key("hotel_id"),
            Column::new("name", "TEXT NOT NULL"),
            Column::new("address", "TEXT NOT NULL"),
            Column::new("city_id", "TEXT NOT NULL"),
        ],
    };

    fn id(&self) -> &str {
        &self.hotel_id
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.hotel_id)
            .bind(&self.name)
            .bind(&self.address)
            .bind(&self.city_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub room_id: String,
    pub name: String,
    pub capacity: i32,
    pub image: String,
    pub hotel_id: String,
}

impl Entity for Room {
    const LABEL: &'static str = "Room";
    const TABLE: Table = Table {
        name: "rooms",
        columns: &[
            Column::key("room_id"),
            Column::new("name", "TEXT NOT NULL"),
            Column::new("capacity", "INTEGER NOT NULL"),
            Column::new("image", "TEXT NOT NULL"),
            Column::new("hotel_id", "TEXT NOT NULL"),
        ],
    };

    fn id(&self) -> &str {
        &self.room_id
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.room_id)
            .bind(&self.name)
            .bind(self.capacity)
            .bind(&self.image)
            .bind(&self.hotel_id)
    }
}

/// Account holder. `password_hash` is an argon2 PHC string and never leaves the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
}

impl Entity for User {
    const LABEL: &'static str = "User";
    const TABLE: Table = Table {
        name: "users",
        columns: &[
            Column::key("user_id"),
            Column::new("name", "TEXT NOT NULL"),
            Column::new("email", "TEXT NOT NULL"),
            Column::new("password_hash", "TEXT NOT NULL"),
            Column::new("user_type", "TEXT NOT NULL"),
        ],
    };

    fn id(&self) -> &str {
        &self.user_id
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.user_id)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.password_hash)
            .bind(&self.user_type)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub booking_id: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub guest_quantity: i32,
    pub room_id: String,
    pub user_id: String,
}

impl Entity for Booking {
    const LABEL: &'static str = "Booking";
    const TABLE: Table = Table {
        name: "bookings",
        columns: &[
            Column::key("booking_id"),
            Column::new("check_in", "TIMESTAMP NOT NULL"),
            Column::new("check_out", "TIMESTAMP NOT NULL"),
            Column::new("guest_quantity", "INTEGER NOT NULL"),
            Column::new("room_id", "TEXT NOT NULL"),
            Column::new("user_id", "TEXT NOT NULL"),
        ],
    };

    fn id(&self) -> &str {
        &self.booking_id
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.booking_id)
            .bind(self.check_in)
            .bind(self.check_out)
            .bind(self.guest_quantity)
            .bind(&self.room_id)
            .bind(&self.user_id)
    }
}
