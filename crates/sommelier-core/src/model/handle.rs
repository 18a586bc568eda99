use std::fmt;
use std::sync::Arc;

use crate::{Result, WineFeatures};

/// Inference capability of a trained regression model.
///
/// Implementations must be immutable after construction: a single instance is
/// shared by every concurrent request without synchronization.
pub trait Regressor: Send + Sync {
    /// Predicts the quality score for one sample.
    fn predict(&self, features: &WineFeatures) -> Result<f64>;

    /// Returns a short human-readable name of the algorithm.
    fn name(&self) -> &str;
}

/// Shared, read-only handle to a loaded model.
///
/// A handle always wraps a fully constructed model; there is no partially
/// loaded state.
#[derive(Clone)]
pub struct ModelHandle {
    inner: Arc<dyn Regressor>,
}

impl ModelHandle {
    /// Wraps a regressor into a shareable handle.
    pub fn new(regressor: impl Regressor + 'static) -> Self {
        Self {
            inner: Arc::new(regressor),
        }
    }

    /// Predicts the quality score for one sample.
    #[inline]
    pub fn predict(&self, features: &WineFeatures) -> Result<f64> {
        self.inner.predict(features)
    }

    /// Returns the name of the wrapped algorithm.
    #[inline]
    pub fn name(&self) -> &str {
        self.inner.name()
    }
}

impl From<Arc<dyn Regressor>> for ModelHandle {
    fn from(inner: Arc<dyn Regressor>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("algorithm", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _features: &WineFeatures) -> Result<f64> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

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
    fn clones_share_the_model() {
        let handle = ModelHandle::new(Constant(5.0));
        let clone = handle.clone();

        assert_eq!(handle.predict(&sample()).unwrap(), 5.0);
        assert_eq!(clone.predict(&sample()).unwrap(), 5.0);
        assert_eq!(clone.name(), "constant");
    }

    #[test]
    fn debug_shows_algorithm() {
        let handle = ModelHandle::new(Constant(1.0));
        assert!(format!("{handle:?}").contains("constant"));
    }
}
