//! Declarative request validation: each insert DTO declares an ordered list of
//! (field, predicate, message) rules. Every rule is evaluated; failures are collected
//! in declaration order and joined into one message for the caller.

use crate::error::AppError;
use crate::model::{BookingInsertDto, CityInsertDto, HotelInsertDto, RoomInsertDto, UserInsertDto};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

pub const USER_TYPES: &[&str] = &["admin", "client"];
pub const PASSWORD_MIN_LENGTH: usize = 6;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

pub struct Rule<T> {
    pub field: &'static str,
    check: fn(&T) -> bool,
    pub message: &'static str,
}

impl<T> Rule<T> {
    pub fn new(field: &'static str, check: fn(&T) -> bool, message: &'static str) -> Self {
        Rule {
            field,
            check,
            message,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages joined with a single space.
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::Validation(self.message()))
        }
    }
}

pub trait Validate: Sized {
    fn rules() -> Vec<Rule<Self>>;

    fn validate(&self) -> ValidationResult {
        let errors = Self::rules()
            .into_iter()
            .filter(|rule| !(rule.check)(self))
            .map(|rule| FieldError {
                field: rule.field,
                message: rule.message,
            })
            .collect();
        ValidationResult { errors }
    }
}

fn present(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Zero counts as empty, like an unset number.
fn present_count(n: Option<i32>) -> bool {
    n.is_some_and(|n| n != 0)
}

/// Comparison rules skip absent values; presence is reported by its own rule.
fn positive(n: Option<i32>) -> bool {
    n.map_or(true, |n| n > 0)
}

/// Accepts RFC 3339, ISO dates with or without a time part, and US-style `MM/DD/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn valid_date(s: &Option<String>) -> bool {
    s.as_deref().and_then(parse_date).is_some()
}

impl Validate for CityInsertDto {
    fn rules() -> Vec<Rule<Self>> {
        vec![Rule::new("Name", |d: &Self| present(&d.name), "'Name' must not be empty.")]
    }
}

impl Validate for HotelInsertDto {
    fn rules() -> Vec<Rule<Self>> {
        vec![Rule::new("CityId", |d: &Self| present(&d.city_id), "'City Id' must not be empty.")]
    }
}

impl Validate for RoomInsertDto {
    fn rules() -> Vec<Rule<Self>> {
        vec![
            Rule::new("Capacity", |d: &Self| present_count(d.capacity), "'Capacity' must not be empty."),
            Rule::new("Capacity", |d: &Self| positive(d.capacity), "'Capacity' must be greater than '0'."),
            Rule::new("HotelId", |d: &Self| present(&d.hotel_id), "'Hotel Id' must not be empty."),
        ]
    }
}

impl Validate for UserInsertDto {
    fn rules() -> Vec<Rule<Self>> {
        vec![
            Rule::new("Name", |d: &Self| present(&d.name), "'Name' must not be empty."),
            Rule::new("Email", |d: &Self| present(&d.email), "'Email' must not be empty."),
            Rule::new(
                "Email",
                |d: &Self| d.email.as_deref().map_or(true, |e| e.is_empty() || EMAIL.is_match(e)),
                "'Email' is not a valid email address.",
            ),
            Rule::new("Password", |d: &Self| present(&d.password), "'Password' must not be empty."),
            Rule::new(
                "Password",
                |d: &Self| d.password.as_deref().map_or(true, |p| p.chars().count() >= PASSWORD_MIN_LENGTH),
                "'Password' must be at least 6 characters.",
            ),
            Rule::new(
                "UserType",
                |d: &Self| d.user_type.as_deref().is_some_and(|t| USER_TYPES.contains(&t)),
                "'User Type' must be one of: admin, client.",
            ),
        ]
    }
}

impl Validate for BookingInsertDto {
    fn rules() -> Vec<Rule<Self>> {
        vec![
            Rule::new(
                "GuestQuantity",
                |d: &Self| present_count(d.guest_quantity),
                "'Guest Quantity' must not be empty.",
            ),
            Rule::new(
                "GuestQuantity",
                |d: &Self| positive(d.guest_quantity),
                "'Guest Quantity' must be greater than '0'.",
            ),
            Rule::new("CheckIn", |d: &Self| present(&d.check_in), "'Check In' must not be empty."),
            Rule::new("CheckIn", |d: &Self| valid_date(&d.check_in), "'Check In' must be a valid date"),
            Rule::new("CheckOut", |d: &Self| present(&d.check_out), "'Check Out' must not be empty."),
            Rule::new("CheckOut", |d: &Self| valid_date(&d.check_out), "'Check Out' must be a valid date"),
            Rule::new("RoomId", |d: &Self| present(&d.room_id), "'Room Id' must not be empty."),
            Rule::new("UserId", |d: &Self| present(&d.user_id), "'User Id' must not be empty."),
        ]
    }
}
