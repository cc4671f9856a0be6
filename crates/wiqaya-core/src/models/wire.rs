//! Lenient field decoders for spreadsheet and database exports, which emit
//! `null` for blank cells and floats for whole numbers.

use serde::{Deserialize, Deserializer};

use super::derived::Derived;

/// `null` decodes to the type's default.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn to_i32(value: f64) -> Option<i32> {
    value
        .is_finite()
        .then(|| value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

/// Whole number that may arrive as a float; `null` or non-finite is 0.
pub fn count<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .and_then(to_i32)
        .unwrap_or(0))
}

/// Optional whole number that may arrive as a float.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.and_then(to_i32))
}

/// Imported percentage override, rounded and clamped into `[0, 100]`.
pub fn percent_override<'de, D>(deserializer: D) -> Result<Derived<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.filter(|v| v.is_finite());
    Ok(value
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .into())
}
