//! Server-side HTML rendering for the screening form
//!
//! Markup is embedded for portability, same as the main index page of the
//! training UI this service grew out of. Two widget variants exist: classic
//! free-text fields and numeric fields pre-filled with typical dataset
//! values. Both accept an `en` or `id` locale.

use std::collections::BTreeMap;

use crate::features::{Feature, Locale};
use crate::inference::Diagnosis;

/// Input widget style of the form page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    /// Plain text fields, initially empty
    #[default]
    Classic,
    /// Numeric fields pre-filled with typical dataset values
    Numeric,
}

impl FormVariant {
    pub fn parse(s: &str) -> Option<FormVariant> {
        match s {
            "classic" => Some(FormVariant::Classic),
            "numeric" => Some(FormVariant::Numeric),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            FormVariant::Classic => "classic",
            FormVariant::Numeric => "numeric",
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn title(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Parkinson's Disease Prediction",
        Locale::Id => "Prediksi Penyakit Parkinson",
    }
}

fn intro(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "Enter the patient's voice parameters to predict if they have Parkinson's disease."
        }
        Locale::Id => {
            "Masukkan parameter suara pasien untuk memprediksi apakah pasien mengidap penyakit Parkinson."
        }
    }
}

fn submit_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Parkinson's Test Result",
        Locale::Id => "Hasil Tes Parkinson",
    }
}

/// User-visible warning for an invalid submission
pub fn invalid_input_warning(fields: &str, locale: Locale) -> String {
    match locale {
        Locale::En => format!("Invalid or missing value for: {fields}"),
        Locale::Id => format!("Nilai tidak valid atau kosong untuk: {fields}"),
    }
}

const PAGE_STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em auto; max-width: 960px; background: #f5f5f5; color: #333; }
h1 { color: #333; }
.intro { color: #555; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 0.75em 1.5em; }
.field label { display: block; font-size: 0.85em; color: #555; margin-bottom: 0.25em; }
.field input { width: 100%; padding: 0.4em; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box; }
.warning { background: #fef3c7; border: 1px solid #f59e0b; border-radius: 6px; padding: 1em; margin: 1em 0; }
.result { border-radius: 6px; padding: 1.5em; margin: 1em 0; font-size: 1.2em; font-weight: bold; }
.result.negative { background: #d1fae5; border: 1px solid #10b981; }
.result.positive { background: #fee2e2; border: 1px solid #ef4444; }
button { margin-top: 1.5em; padding: 0.6em 1.5em; background: #2563eb; color: white; border: none; border-radius: 6px; font-size: 1em; cursor: pointer; }
.variants { font-size: 0.85em; color: #777; margin-bottom: 1.5em; }
.variants a { color: #2563eb; margin-right: 0.75em; }
"#;

/// Render the full form page. `prefill` carries the previous submission so
/// an invalid submit does not wipe the user's values; the numeric variant
/// falls back to typical dataset defaults.
pub fn render_form(
    variant: FormVariant,
    locale: Locale,
    prefill: Option<&BTreeMap<String, String>>,
    warning: Option<&str>,
) -> String {
    let mut fields = String::new();
    for feature in Feature::ALL {
        let key = feature.form_key();
        let submitted = prefill.and_then(|p| p.get(key)).map(|s| escape(s));
        let (input_type, value, step) = match variant {
            FormVariant::Classic => (
                "text",
                submitted.unwrap_or_default(),
                String::new(),
            ),
            FormVariant::Numeric => (
                "number",
                submitted.unwrap_or_else(|| feature.default_value().to_string()),
                r#" step="any""#.to_string(),
            ),
        };
        fields.push_str(&format!(
            r#"<div class="field"><label for="{key}">{label}</label><input type="{input_type}" id="{key}" name="{key}" value="{value}"{step}></div>
"#,
            label = escape(&feature.label(locale)),
        ));
    }

    let warning_block = warning
        .map(|w| format!(r#"<div class="warning">{}</div>"#, escape(w)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<p class="intro">{intro}</p>
<div class="variants">
<a href="/form/classic?lang=en">classic / en</a>
<a href="/form/classic?lang=id">classic / id</a>
<a href="/form/numeric?lang=en">numeric / en</a>
<a href="/form/numeric?lang=id">numeric / id</a>
</div>
{warning_block}
<form method="post" action="/predict">
<input type="hidden" name="variant" value="{variant}">
<input type="hidden" name="lang" value="{lang}">
<div class="grid">
{fields}</div>
<button type="submit">{submit}</button>
</form>
</body>
</html>"#,
        lang = locale.code(),
        title = title(locale),
        style = PAGE_STYLE,
        variant = variant.slug(),
        submit = submit_label(locale),
        intro = intro(locale),
    )
}

/// Render the result page after a successful prediction
pub fn render_result(diagnosis: Diagnosis, variant: FormVariant, locale: Locale) -> String {
    let back = match locale {
        Locale::En => "Back to form",
        Locale::Id => "Kembali ke formulir",
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<div class="result {css}">{message}</div>
<a href="/form/{variant}?lang={lang}">{back}</a>
</body>
</html>"#,
        lang = locale.code(),
        title = title(locale),
        style = PAGE_STYLE,
        css = diagnosis.css_class(),
        message = diagnosis.message(locale),
        variant = variant.slug(),
    )
}
