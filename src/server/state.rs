//! Application state management

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::inference::InferenceEngine;

use super::ServerConfig;

/// Application state shared across handlers.
///
/// The engine is loaded exactly once before the listener binds; it is
/// read-only afterwards, so no locking is needed.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: InferenceEngine,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the classifier artifact and build the state.
    ///
    /// A missing or corrupt artifact propagates `ModelUnavailable` and the
    /// server never starts.
    pub fn initialize(config: ServerConfig) -> Result<Self> {
        let engine = InferenceEngine::load(&config.model_path)?;
        Ok(Self::with_engine(config, engine))
    }

    /// Build the state around an already-constructed engine (tests inject
    /// mock classifiers this way)
    pub fn with_engine(config: ServerConfig, engine: InferenceEngine) -> Self {
        Self {
            config,
            engine,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_initialize_missing_model_fails() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            model_path: PathBuf::from("/nonexistent/model.json"),
        };
        assert!(AppState::initialize(config).is_err());
    }
}
