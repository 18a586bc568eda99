//! Lenient field deserializers.

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a JSON number or a string holding a decimal number.
///
/// Range checks are left to validation: `"NaN"` and `"inf"` parse here.
pub(crate) fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| SerdeError::custom("number is not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SerdeError::custom(format!("cannot parse number from string: {s:?}"))),
        Value::Null => Err(SerdeError::custom("expected a number, found null")),
        Value::Bool(_) => Err(SerdeError::custom("expected a number, found a boolean")),
        Value::Array(_) => Err(SerdeError::custom("expected a number, found an array")),
        Value::Object(_) => Err(SerdeError::custom("expected a number, found an object")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deserialize_lenient_f64")]
        value: f64,
    }

    fn parse(json: &str) -> Result<f64, serde_json::Error> {
        serde_json::from_str::<Probe>(json).map(|p| p.value)
    }

    #[test]
    fn accepts_numbers() {
        assert_eq!(parse(r#"{"value": 7.4}"#).unwrap(), 7.4);
        assert_eq!(parse(r#"{"value": 11}"#).unwrap(), 11.0);
        assert_eq!(parse(r#"{"value": -3}"#).unwrap(), -3.0);
    }

    #[test]
    fn accepts_numeric_strings() {
        assert_eq!(parse(r#"{"value": "0.9978"}"#).unwrap(), 0.9978);
        assert_eq!(parse(r#"{"value": " 34 "}"#).unwrap(), 34.0);
    }

    #[test]
    fn non_finite_strings_parse() {
        assert!(parse(r#"{"value": "NaN"}"#).unwrap().is_nan());
        assert!(parse(r#"{"value": "inf"}"#).unwrap().is_infinite());
    }

    #[test]
    fn rejects_other_values() {
        for json in [
            r#"{"value": "abc"}"#,
            r#"{"value": ""}"#,
            r#"{"value": null}"#,
            r#"{"value": true}"#,
            r#"{"value": [1.0]}"#,
            r#"{"value": {"x": 1}}"#,
        ] {
            assert!(parse(json).is_err(), "accepted {json}");
        }
    }
}
