//! Request key normalization: clients may send `cityId` or `city_id`; DTOs bind `CityId`.

use serde_json::{Map, Value};

/// Convert a single identifier from snake_case or camelCase to PascalCase.
/// e.g. "city_id" -> "CityId", "guestQuantity" -> "GuestQuantity"
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert all top-level keys of a JSON object to PascalCase (in place).
/// An existing PascalCase key wins over a converted duplicate.
pub fn object_keys_to_pascal_case(obj: &mut Map<String, Value>) {
    let keys: Vec<String> = obj.keys().cloned().collect();
    for k in keys {
        let pascal = to_pascal_case(&k);
        if pascal != k {
            if let Some(v) = obj.remove(&k) {
                obj.entry(pascal).or_insert(v);
            }
        }
    }
}

/// Apply PascalCase conversion to a Value. If it's an object, converts its keys; otherwise no-op.
pub fn value_keys_to_pascal_case(value: &mut Value) {
    if let Value::Object(ref mut map) = value {
        object_keys_to_pascal_case(map);
    }
}
