//! Prediction request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sommelier_core::WineFeatures;
use validator::{Validate, ValidationError};

use super::coerce::deserialize_lenient_f64;

/// Physico-chemical measurements of the wine sample to score.
///
/// Every field is required. Values may be sent as JSON numbers or as strings
/// holding a decimal number, and must be finite.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct PredictionRequest {
    /// Fixed acidity (g/dm³ tartaric acid).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub fixed_acidity: f64,
    /// Volatile acidity (g/dm³ acetic acid).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub volatile_acidity: f64,
    /// Citric acid (g/dm³).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub citric_acid: f64,
    /// Residual sugar (g/dm³).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub residual_sugar: f64,
    /// Chlorides (g/dm³ sodium chloride).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub chlorides: f64,
    /// Free sulfur dioxide (mg/dm³).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub free_sulfur_dioxide: f64,
    /// Total sulfur dioxide (mg/dm³).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub total_sulfur_dioxide: f64,
    /// Density (g/cm³).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub density: f64,
    /// Acidity on the pH scale.
    #[serde(rename = "pH", deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub ph: f64,
    /// Sulphates (g/dm³ potassium sulphate).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub sulphates: f64,
    /// Alcohol (% by volume).
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    #[validate(custom(function = "validate_finite"))]
    pub alcohol: f64,
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        return Ok(());
    }

    Err(ValidationError::new("finite").with_message("must be a finite number".into()))
}

impl From<PredictionRequest> for WineFeatures {
    fn from(request: PredictionRequest) -> Self {
        Self {
            fixed_acidity: request.fixed_acidity,
            volatile_acidity: request.volatile_acidity,
            citric_acid: request.citric_acid,
            residual_sugar: request.residual_sugar,
            chlorides: request.chlorides,
            free_sulfur_dioxide: request.free_sulfur_dioxide,
            total_sulfur_dioxide: request.total_sulfur_dioxide,
            density: request.density,
            ph: request.ph,
            sulphates: request.sulphates,
            alcohol: request.alcohol,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sommelier_core::FEATURE_NAMES;

    use super::*;

    fn reference() -> serde_json::Value {
        json!({
            "fixed_acidity": 7.4,
            "volatile_acidity": 0.7,
            "citric_acid": 0.0,
            "residual_sugar": 1.9,
            "chlorides": 0.076,
            "free_sulfur_dioxide": 11.0,
            "total_sulfur_dioxide": 34.0,
            "density": 0.9978,
            "pH": 3.51,
            "sulphates": 0.56,
            "alcohol": 9.4
        })
    }

    #[test]
    fn reference_input_is_valid() {
        let request: PredictionRequest = serde_json::from_value(reference()).unwrap();
        assert!(request.validate().is_ok());

        let features = WineFeatures::from(request);
        assert_eq!(features.ph, 3.51);
        assert_eq!(features.to_row()[0], 7.4);
    }

    #[test]
    fn every_field_is_required() {
        for name in FEATURE_NAMES {
            let mut body = reference();
            body.as_object_mut().unwrap().remove(name);

            let error = serde_json::from_value::<PredictionRequest>(body).unwrap_err();
            assert!(error.to_string().contains(name), "{name}: {error}");
        }
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let mut body = reference();
        let object = body.as_object_mut().unwrap();
        let ph = object.remove("pH").unwrap();
        object.insert("ph".to_owned(), ph);

        assert!(serde_json::from_value::<PredictionRequest>(body).is_err());
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut body = reference();
        body["alcohol"] = json!("12.5");

        let request: PredictionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.alcohol, 12.5);
    }

    #[test]
    fn non_finite_values_fail_validation() {
        let mut body = reference();
        body["density"] = json!("NaN");

        let request: PredictionRequest = serde_json::from_value(body).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("density"));
    }

    #[test]
    fn finite_rule_checks_each_value() {
        assert!(validate_finite(3.51).is_ok());
        assert!(validate_finite(-0.0).is_ok());

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let error = validate_finite(value).unwrap_err();
            assert_eq!(error.code, "finite");
        }
    }
}
