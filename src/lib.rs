//! Parkinson's voice screening service
//!
//! A small front-end over a pre-trained binary classifier that predicts
//! presence of Parkinson's disease from 22 numeric voice measurements.
//!
//! # Modules
//!
//! - [`features`] - Canonical 22-feature schema and validated input vectors
//! - [`model`] - Classifier trait and the JSON logistic-regression artifact
//! - [`inference`] - Inference engine mapping model output to a diagnosis
//! - [`server`] - Web form (two variants, en/id) and JSON prediction API
//! - [`cli`] - Command-line interface
//! - [`error`] - Crate error type

pub mod error;

pub mod features;
pub mod inference;
pub mod model;

pub mod cli;
pub mod server;

pub use error::{Result, ScreeningError};
