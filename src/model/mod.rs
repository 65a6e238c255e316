//! Classifier artifact
//!
//! The screening service treats the model as an opaque binary classifier:
//! anything implementing [`Classifier`] can back the inference engine. The
//! one concrete implementation is [`LogisticModel`], a logistic regression
//! exported to pretty-printed JSON.

use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScreeningError};
use crate::features::{Feature, FeatureVector, FEATURE_COUNT};

/// A pre-trained binary classifier over the 22-feature voice schema.
///
/// Implementations must be deterministic and side-effect free: the engine
/// shares one instance across all requests behind an `Arc` without locking.
pub trait Classifier: Send + Sync {
    /// Raw class label for a validated input vector: 0 (healthy) or 1
    /// (Parkinson's present)
    fn predict(&self, features: &FeatureVector) -> Result<u8>;
}

/// Logistic regression artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Column names recorded at export time, canonical order
    pub feature_names: Vec<String>,
    /// Fitted coefficients, one per feature
    pub coefficients: Array1<f64>,
    /// Fitted intercept
    pub intercept: f64,
    /// Decision threshold on the positive-class probability
    pub threshold: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            feature_names: Feature::ALL.iter().map(|f| f.name().to_string()).collect(),
            coefficients,
            intercept,
            threshold: 0.5,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load an artifact from a JSON file.
    ///
    /// Any failure (missing file, malformed JSON, wrong coefficient count,
    /// schema mismatch) is `ModelUnavailable`: the caller cannot serve
    /// predictions and must halt.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ScreeningError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let model: Self = serde_json::from_str(&json).map_err(|e| {
            ScreeningError::ModelUnavailable(format!("cannot parse {}: {}", path.display(), e))
        })?;
        model.validate()?;
        info!(
            path = %path.display(),
            features = model.coefficients.len(),
            threshold = model.threshold,
            "Classifier artifact loaded"
        );
        Ok(model)
    }

    /// Save the artifact as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Positive-class probability for a validated input vector
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let linear = self.coefficients.dot(&features.to_array()) + self.intercept;
        1.0 / (1.0 + (-linear).exp())
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ScreeningError::ModelUnavailable(format!(
                "artifact has {} coefficients, schema requires {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ScreeningError::ModelUnavailable(format!(
                "decision threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        // A reordered or renamed export would silently permute the input
        // vector; refuse to load instead.
        if !self.feature_names.is_empty() {
            let canonical: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
            if self.feature_names != canonical {
                return Err(ScreeningError::ModelUnavailable(
                    "artifact feature names disagree with the canonical 22-feature schema"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<u8> {
        let proba = self.predict_proba(features);
        Ok(if proba >= self.threshold { 1 } else { 0 })
    }
}
