//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for numeric job-status fields.
//! - Accept booleans, `0`/`1` numbers, or `"0"`/`"1"`/`"true"`/`"false"` strings for flags.
//!
//! Invariants / assumptions:
//! - Splunk may return `"123"` or `123` depending on endpoint and version.
//! - Errors are generic parse errors and never echo secrets.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FloatOrString {
    F64(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    U64(u64),
    String(String),
}

pub fn usize_from_string_or_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match U64OrString::deserialize(deserializer)? {
        U64OrString::U64(v) => usize::try_from(v).map_err(D::Error::custom),
        U64OrString::I64(v) => usize::try_from(v).map_err(D::Error::custom),
        U64OrString::String(s) => s.trim().parse::<usize>().map_err(D::Error::custom),
    }
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match FloatOrString::deserialize(deserializer)? {
        FloatOrString::F64(v) => Ok(v),
        FloatOrString::String(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
    }
}

pub fn bool_from_string_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match BoolLike::deserialize(deserializer)? {
        BoolLike::Bool(b) => Ok(b),
        BoolLike::U64(v) => Ok(v != 0),
        BoolLike::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean flag '{}'", other))),
        },
    }
}
