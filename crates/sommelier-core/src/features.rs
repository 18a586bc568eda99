//! The fixed feature schema consumed by every model.

use serde::{Deserialize, Serialize};

/// Number of columns in a [`WineFeatures`] row.
pub const FEATURE_COUNT: usize = 11;

/// Column names in the order the models were trained on.
///
/// These names are part of the external contract and are case-sensitive.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fixed_acidity",
    "volatile_acidity",
    "citric_acid",
    "residual_sugar",
    "chlorides",
    "free_sulfur_dioxide",
    "total_sulfur_dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
];

/// Physico-chemical measurements of a single wine sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct WineFeatures {
    /// Fixed acidity (g/dm³ tartaric acid).
    pub fixed_acidity: f64,
    /// Volatile acidity (g/dm³ acetic acid).
    pub volatile_acidity: f64,
    /// Citric acid (g/dm³).
    pub citric_acid: f64,
    /// Residual sugar (g/dm³).
    pub residual_sugar: f64,
    /// Chlorides (g/dm³ sodium chloride).
    pub chlorides: f64,
    /// Free sulfur dioxide (mg/dm³).
    pub free_sulfur_dioxide: f64,
    /// Total sulfur dioxide (mg/dm³).
    pub total_sulfur_dioxide: f64,
    /// Density (g/cm³).
    pub density: f64,
    /// Acidity on the pH scale.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Sulphates (g/dm³ potassium sulphate).
    pub sulphates: f64,
    /// Alcohol (% by volume).
    pub alcohol: f64,
}

impl WineFeatures {
    /// Returns the features as a row in [`FEATURE_NAMES`] order.
    #[must_use]
    pub const fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }

    /// Returns `(column name, value)` pairs in [`FEATURE_NAMES`] order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_row())
    }

    /// Returns the first column whose value is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.columns()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WineFeatures {
        WineFeatures {
            fixed_acidity: 7.4,
            volatile_acidity: 0.7,
            citric_acid: 0.0,
            residual_sugar: 1.9,
            chlorides: 0.076,
            free_sulfur_dioxide: 11.0,
            total_sulfur_dioxide: 34.0,
            density: 0.9978,
            ph: 3.51,
            sulphates: 0.56,
            alcohol: 9.4,
        }
    }

    #[test]
    fn row_follows_contract_order() {
        let row = sample().to_row();
        assert_eq!(row[0], 7.4);
        assert_eq!(row[8], 3.51);
        assert_eq!(row[10], 9.4);
    }

    #[test]
    fn columns_pair_names_with_values() {
        let columns: Vec<_> = sample().columns().collect();
        assert_eq!(columns.len(), FEATURE_COUNT);
        assert_eq!(columns[8], ("pH", 3.51));
        assert_eq!(columns[5], ("free_sulfur_dioxide", 11.0));
    }

    #[test]
    fn serde_uses_contract_names() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();

        for name in FEATURE_NAMES {
            assert!(keys.contains(&name), "missing column {name}");
        }
        assert!(!keys.contains(&"ph"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["colour"] = serde_json::json!("red");
        assert!(serde_json::from_value::<WineFeatures>(json).is_err());
    }

    #[test]
    fn non_finite_column_is_reported() {
        let mut features = sample();
        assert_eq!(features.first_non_finite(), None);

        features.density = f64::NAN;
        assert_eq!(features.first_non_finite(), Some("density"));
    }
}
