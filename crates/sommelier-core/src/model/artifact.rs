//! Serialized regressors understood by [`ArtifactLoader`].
//!
//! [`ArtifactLoader`]: crate::ArtifactLoader

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use derive_more::From;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use smartcore::linear::ridge_regression::RidgeRegression;

use crate::model::Regressor;
use crate::{Error, Result, TRACING_TARGET_INFERENCE, WineFeatures};

type RandomForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Linear = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Ridge = RidgeRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A trained `smartcore` regressor as stored on disk.
///
/// The JSON encoding is adjacently tagged:
///
/// ```json
/// { "algorithm": "random_forest", "model": { ... } }
/// ```
///
/// Every variant is trained on rows laid out in [`FEATURE_NAMES`] order.
///
/// [`FEATURE_NAMES`]: crate::FEATURE_NAMES
#[derive(Serialize, Deserialize, From)]
#[serde(tag = "algorithm", content = "model", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Bagged ensemble of regression trees.
    RandomForest(RandomForest),
    /// Ordinary least squares.
    LinearRegression(Linear),
    /// L2-regularized least squares.
    RidgeRegression(Ridge),
}

impl ModelArtifact {
    /// Returns the tag this artifact is stored under.
    #[must_use]
    pub const fn algorithm(&self) -> &'static str {
        match self {
            Self::RandomForest(_) => "random_forest",
            Self::LinearRegression(_) => "linear_regression",
            Self::RidgeRegression(_) => "ridge_regression",
        }
    }

    /// Decodes an artifact from its JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Encodes this artifact as JSON into `writer`.
    pub fn to_writer(&self, writer: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }

    /// Writes this artifact to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()
    }

    fn predict_matrix(&self, matrix: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        let predictions = match self {
            Self::RandomForest(model) => model.predict(matrix),
            Self::LinearRegression(model) => model.predict(matrix),
            Self::RidgeRegression(model) => model.predict(matrix),
        };

        predictions.map_err(|err| {
            Error::inference().with_message(format!("{} failed: {err}", self.algorithm()))
        })
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, features: &WineFeatures) -> Result<f64> {
        let rows = vec![features.to_row().to_vec()];
        let matrix = DenseMatrix::from_2d_vec(&rows).map_err(|err| {
            Error::invalid_input().with_message(format!("cannot build input matrix: {err}"))
        })?;

        let prediction = self
            .predict_matrix(&matrix)?
            .first()
            .copied()
            .ok_or_else(|| Error::inference().with_message("model returned no prediction"))?;

        if !prediction.is_finite() {
            return Err(Error::inference().with_message(format!(
                "{} returned a non-finite prediction",
                self.algorithm()
            )));
        }

        tracing::trace!(
            target: TRACING_TARGET_INFERENCE,
            algorithm = self.algorithm(),
            prediction,
            "prediction computed"
        );

        Ok(prediction)
    }

    fn name(&self) -> &str {
        self.algorithm()
    }
}

impl fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelArtifact")
            .field(&self.algorithm())
            .finish()
    }
}
