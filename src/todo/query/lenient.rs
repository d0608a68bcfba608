//! Lenient deserialisation helpers for query-string parameters.

use serde::{Deserialize, Deserializer, de::IgnoredAny};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Integer(i64),
    Unsigned(u64),
    Boolean(bool),
    Text(String),
    Other(IgnoredAny),
}

/// Deserialises any scalar into `Option<T>` via [`FromStr`], mapping values
/// that do not parse to `None` instead of failing.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        RawValue::Integer(number) => number.to_string().parse().ok(),
        RawValue::Unsigned(number) => number.to_string().parse().ok(),
        RawValue::Boolean(flag) => flag.to_string().parse().ok(),
        RawValue::Text(text) => text.trim().parse().ok(),
        RawValue::Other(_) => None,
    }))
}

/// Deserialises an integer, saturating numbers outside the `i64` range
/// instead of discarding them. Non-numeric values map to `None`.
pub(crate) fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        RawValue::Integer(number) => Some(number),
        RawValue::Unsigned(_) => Some(i64::MAX),
        RawValue::Text(text) => saturating_integer(text.trim()),
        RawValue::Boolean(_) | RawValue::Other(_) => None,
    }))
}

fn saturating_integer(text: &str) -> Option<i64> {
    if let Ok(number) = text.parse::<i64>() {
        return Some(number);
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let all_digits = !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit());
    all_digits.then_some(if negative { i64::MIN } else { i64::MAX })
}

/// Deserialises free text, mapping blank strings to `None`.
pub(crate) fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        RawValue::Text(text) if !text.trim().is_empty() => Some(text),
        RawValue::Integer(number) => Some(number.to_string()),
        RawValue::Unsigned(number) => Some(number.to_string()),
        _ => None,
    }))
}
