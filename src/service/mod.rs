//! Repositories, validation and password hashing sitting between handlers and the store.

pub mod crud;
pub mod password;
pub mod repository;
pub mod validation;

pub use repository::{BookingRepository, CityRepository, HotelRepository, RoomRepository, UserRepository};
pub use validation::{Validate, ValidationResult};
