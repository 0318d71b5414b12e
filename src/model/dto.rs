//! Transport DTOs. Insert DTOs carry only client-writable fields; full DTOs add the
//! server-assigned id and denormalized parent summaries. Wire keys are PascalCase.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Binds a count leniently: numbers and numeric strings bind, anything else binds as absent
/// so the validator reports it instead of the JSON decoder.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CityInsertDto {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CityDto {
    pub city_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct HotelInsertDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct HotelDto {
    pub hotel_id: String,
    pub name: String,
    pub address: String,
    pub city_id: String,
    /// `None` when the city has been deleted since.
    pub city_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RoomInsertDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub hotel_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RoomDto {
    pub room_id: String,
    pub name: String,
    pub capacity: i32,
    pub image: String,
    pub hotel_id: String,
    pub hotel: Option<HotelDto>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserInsertDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub user_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BookingInsertDto {
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub guest_quantity: Option<i32>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BookingDto {
    pub booking_id: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub guest_quantity: i32,
    pub room_id: String,
    pub user_id: String,
    pub room: Option<RoomDto>,
    pub user: Option<UserDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_bind_leniently() {
        let dto: BookingInsertDto = serde_json::from_value(json!({ "GuestQuantity": "3" })).unwrap();
        assert_eq!(dto.guest_quantity, Some(3));

        let dto: BookingInsertDto = serde_json::from_value(json!({ "GuestQuantity": "many" })).unwrap();
        assert_eq!(dto.guest_quantity, None);

        let dto: RoomInsertDto = serde_json::from_value(json!({ "Capacity": 2.5 })).unwrap();
        assert_eq!(dto.capacity, None);

        let dto: RoomInsertDto = serde_json::from_value(json!({})).unwrap();
        assert_eq!(dto.capacity, None);
    }

    #[test]
    fn full_dtos_serialize_pascal_case() {
        let dto = CityDto {
            city_id: "c1".into(),
            name: "Rome".into(),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "CityId": "c1", "Name": "Rome" })
        );
    }
}
