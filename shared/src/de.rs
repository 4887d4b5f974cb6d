//! Deserialization helpers for the API's loosely-typed JSON
//!
//! The server is inconsistent about scalar encodings: `/api/items`
//! stringifies decimal columns (`"12.50"`) while `/api/customer-prices`
//! sends plain numbers, and ids arrive as either strings or integers
//! depending on the table. These helpers accept both forms.

use serde::de::{Deserializer, Error as DeError, Unexpected};
use serde::Deserialize;

/// Raw scalar that may arrive as a JSON string or number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Num(f64),
    Int(i64),
    Text(String),
}

/// Deserialize an id that may be a JSON string or integer into `String`.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Ok(s),
        Scalar::Int(n) => Ok(n.to_string()),
        Scalar::Num(n) => Ok(n.to_string()),
    }
}

/// Deserialize an optional id (string, integer, or null) into `Option<String>`.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Num(n) => n.to_string(),
    }))
}

/// Deserialize a decimal that may be a JSON string or number into `f64`.
pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Num(n) => Ok(n),
        Scalar::Int(n) => Ok(n as f64),
        Scalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DeError::invalid_value(Unexpected::Str(&s), &"a decimal string")),
    }
}

/// Deserialize an optional decimal (string, number, or null) into `Option<f64>`.
pub fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Num(n)) => Ok(Some(n)),
        Some(Scalar::Int(n)) => Ok(Some(n as f64)),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DeError::invalid_value(Unexpected::Str(&s), &"a decimal string")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::id")]
        id: String,
        #[serde(deserialize_with = "super::decimal")]
        price: f64,
        #[serde(default, deserialize_with = "super::opt_decimal")]
        cost: Option<f64>,
    }

    #[test]
    fn accepts_stringified_scalars() {
        let row: Row = serde_json::from_str(r#"{"id":"a1","price":"12.50","cost":"3.25"}"#).unwrap();
        assert_eq!(row.id, "a1");
        assert_eq!(row.price, 12.50);
        assert_eq!(row.cost, Some(3.25));
    }

    #[test]
    fn accepts_plain_numbers() {
        let row: Row = serde_json::from_str(r#"{"id":42,"price":12.5,"cost":3}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.price, 12.5);
        assert_eq!(row.cost, Some(3.0));
    }

    #[test]
    fn null_and_missing_optionals() {
        let row: Row = serde_json::from_str(r#"{"id":"x","price":0,"cost":null}"#).unwrap();
        assert_eq!(row.cost, None);
        let row: Row = serde_json::from_str(r#"{"id":"x","price":0}"#).unwrap();
        assert_eq!(row.cost, None);
    }

    #[test]
    fn rejects_garbage_decimal() {
        let res: Result<Row, _> = serde_json::from_str(r#"{"id":"x","price":"12,50"}"#);
        assert!(res.is_err());
    }
}
