//! Domain entities and transport DTOs.

pub mod dto;
pub mod entity;

pub use dto::*;
pub use entity::*;
