//! HTTP request handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ScreeningError;
use crate::features::{Feature, FeatureVector, Locale};
use crate::inference::Diagnosis;

use super::error::{Result, ServerError};
use super::forms::{self, FormVariant};
use super::state::AppState;

#[derive(Deserialize)]
pub struct LangQuery {
    lang: Option<String>,
}

fn locale_from(query: &LangQuery) -> Locale {
    query
        .lang
        .as_deref()
        .map(Locale::parse)
        .unwrap_or_default()
}

// ============================================================================
// Form Pages
// ============================================================================

/// Default form: classic text inputs, English labels
pub async fn serve_index(Query(query): Query<LangQuery>) -> Html<String> {
    Html(forms::render_form(
        FormVariant::Classic,
        locale_from(&query),
        None,
        None,
    ))
}

pub async fn get_form(
    Path(variant): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Html<String>> {
    let variant = FormVariant::parse(&variant)
        .ok_or_else(|| ServerError::NotFound(format!("Unknown form variant: {variant}")))?;
    Ok(Html(forms::render_form(
        variant,
        locale_from(&query),
        None,
        None,
    )))
}

/// Handle a form submission.
///
/// An invalid submission re-renders the form with a warning and the
/// submitted values preserved; the classifier is never invoked for it.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<Html<String>> {
    let variant = fields
        .get("variant")
        .and_then(|v| FormVariant::parse(v))
        .unwrap_or_default();
    let locale = fields
        .get("lang")
        .map(|l| Locale::parse(l))
        .unwrap_or_default();

    match state.engine.diagnose_form(&fields) {
        Ok(diagnosis) => {
            info!(?diagnosis, variant = variant.slug(), "Form prediction served");
            Ok(Html(forms::render_result(diagnosis, variant, locale)))
        }
        Err(ScreeningError::InvalidInput(bad_fields)) => {
            warn!(fields = %bad_fields, "Rejected invalid form submission");
            let warning = forms::invalid_input_warning(&bad_fields, locale);
            Ok(Html(forms::render_form(
                variant,
                locale,
                Some(&fields),
                Some(&warning),
            )))
        }
        Err(other) => Err(other.into()),
    }
}

// ============================================================================
// JSON API
// ============================================================================

#[derive(Deserialize)]
pub struct PredictRequest {
    /// 22 values in canonical schema order
    pub values: Option<Vec<f64>>,
    /// Alternative: feature name -> value
    pub features: Option<BTreeMap<String, f64>>,
    pub lang: Option<String>,
}

pub async fn api_predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<serde_json::Value>> {
    let locale = request
        .lang
        .as_deref()
        .map(Locale::parse)
        .unwrap_or_default();

    let vector = match (&request.values, &request.features) {
        (Some(values), _) => FeatureVector::from_slice(values)?,
        (None, Some(named)) => FeatureVector::from_named(named)?,
        (None, None) => {
            return Err(ServerError::BadRequest(
                "Provide either 'values' (22 floats in schema order) or 'features' (name -> value)"
                    .to_string(),
            ))
        }
    };

    let diagnosis = state.engine.diagnose(&vector)?;
    info!(?diagnosis, "API prediction served");

    Ok(Json(serde_json::json!({
        "success": true,
        "prediction": if diagnosis == Diagnosis::Positive { 1 } else { 0 },
        "diagnosis": diagnosis,
        "message": diagnosis.message(locale),
    })))
}

/// The canonical feature schema, in model input order
pub async fn get_features() -> Json<serde_json::Value> {
    let features: Vec<serde_json::Value> = Feature::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| {
            serde_json::json!({
                "index": i,
                "name": f.name(),
                "key": f.form_key(),
                "description": f.description(),
                "default": f.default_value(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": features.len(),
        "features": features,
    }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model_path": state.config.model_path.display().to_string(),
        "predictions": state.engine.prediction_count(),
        "uptime_secs": state.uptime_secs(),
    }))
}
