//! Inference engine
//!
//! Thin adapter between validated feature vectors and the injected
//! classifier. Stateless per call: the only mutable state is a prediction
//! counter surfaced by the health endpoint.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScreeningError};
use crate::features::{FeatureVector, Locale};
use crate::model::{Classifier, LogisticModel};

/// Binary screening outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    Negative,
    Positive,
}

impl Diagnosis {
    /// Map a raw classifier label to a diagnosis. Anything other than 0/1
    /// means the artifact violates its contract.
    pub fn from_label(label: u8) -> Result<Diagnosis> {
        match label {
            0 => Ok(Diagnosis::Negative),
            1 => Ok(Diagnosis::Positive),
            other => Err(ScreeningError::Unexpected(format!(
                "classifier returned label {other}, expected 0 or 1"
            ))),
        }
    }

    /// Fixed display message for the result page
    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Diagnosis::Negative, Locale::En) => "The Person does not have Parkinson's Disease",
            (Diagnosis::Positive, Locale::En) => "The Person has Parkinson's Disease",
            (Diagnosis::Negative, Locale::Id) => "Pasien tidak mengidap penyakit Parkinson",
            (Diagnosis::Positive, Locale::Id) => "Pasien mengidap penyakit Parkinson",
        }
    }

    /// CSS class used by the result page
    pub fn css_class(&self) -> &'static str {
        match self {
            Diagnosis::Negative => "negative",
            Diagnosis::Positive => "positive",
        }
    }
}

/// Inference engine wrapping an injected, read-only classifier
pub struct InferenceEngine {
    model: Arc<dyn Classifier>,
    predictions: AtomicU64,
}

impl InferenceEngine {
    /// Build an engine around an already-constructed classifier
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self {
            model,
            predictions: AtomicU64::new(0),
        }
    }

    /// Load the classifier artifact and build an engine around it.
    ///
    /// Fails with `ModelUnavailable` when the artifact cannot be read;
    /// callers treat that as fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let model = LogisticModel::load(path)?;
        Ok(Self::new(Arc::new(model)))
    }

    /// Run one prediction over a validated vector
    pub fn diagnose(&self, features: &FeatureVector) -> Result<Diagnosis> {
        let label = self.model.predict(features)?;
        let diagnosis = Diagnosis::from_label(label)?;
        self.predictions.fetch_add(1, Ordering::Relaxed);
        debug!(label, ?diagnosis, "Prediction completed");
        Ok(diagnosis)
    }

    /// Parse raw form fields, then diagnose.
    ///
    /// Parsing happens first, so an invalid submission never reaches the
    /// classifier.
    pub fn diagnose_form(&self, raw: &BTreeMap<String, String>) -> Result<Diagnosis> {
        let features = FeatureVector::parse(raw)?;
        self.diagnose(&features)
    }

    /// Total predictions served since startup
    pub fn prediction_count(&self) -> u64 {
        self.predictions.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("predictions", &self.prediction_count())
            .finish()
    }
}
