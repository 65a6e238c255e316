//! Command-line interface
//!
//! `serve` runs the web form, `predict` classifies a single measurement set
//! from the terminal, `features` prints the canonical input schema.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::*;

use crate::error::ScreeningError;
use crate::features::{Feature, FeatureVector, Locale, FEATURE_COUNT};
use crate::inference::InferenceEngine;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_run(msg: &str) {
    print!("  {} {}... ", "›".truecolor(120, 170, 255), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn line_box(lines: &[String]) {
    let border = "─".repeat(59);
    println!("  {}", dim(&format!("┌{border}┐")));
    for line in lines {
        let visible = strip_ansi(line).chars().count();
        let pad = 56usize.saturating_sub(visible);
        println!("  {}  {}{} {}", dim("│"), line, " ".repeat(pad), dim("│"));
    }
    println!("  {}", dim(&format!("└{border}┘")));
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
            continue;
        }
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
            continue;
        }
        out.push(c);
    }
    out
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "parkinsons-voice",
    about = "Parkinson's disease screening from 22 voice measurements",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web form and prediction API
    Serve {
        /// Bind address (default: API_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (default: API_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Classifier artifact (default: MODEL_PATH or models/parkinsons_model.json)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Classify one set of measurements from the terminal
    Predict {
        /// Classifier artifact (overrides MODEL_PATH)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// 22 comma-separated values in canonical schema order
        #[arg(short, long)]
        values: Option<String>,

        /// JSON file mapping feature names to values
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Message language (en, id)
        #[arg(long, default_value = "en")]
        lang: String,
    },

    /// Print the canonical 22-feature input schema
    Features,
}

fn resolve_model_path(flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var("MODEL_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("models/parkinsons_model.json"))
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

/// Apply explicit flags on top of the env-driven defaults
fn resolve_server_config(
    host: Option<&str>,
    port: Option<u16>,
    model: Option<&Path>,
) -> crate::server::ServerConfig {
    let mut config = crate::server::ServerConfig::default();
    if let Some(host) = host {
        config.host = host.to_string();
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model_path = model.to_path_buf();
    }
    config
}

pub async fn cmd_serve(
    host: Option<&str>,
    port: Option<u16>,
    model: Option<&Path>,
) -> anyhow::Result<()> {
    use crate::server::run_server;

    let config = resolve_server_config(host, port, model);
    let (host, port) = (config.host.clone(), config.port);

    println!();
    line_box(&[
        String::new(),
        format!("{}", "Parkinson's Voice Screening".white().bold()),
        format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))),
        String::new(),
        kv("Form   ", &format!("http://{host}:{port}")),
        kv("API    ", &format!("http://{host}:{port}/api/predict")),
        kv("Health ", &format!("http://{host}:{port}/api/health")),
        String::new(),
        format!("{}", dim("ctrl+c to stop")),
        String::new(),
    ]);
    println!();

    run_server(config).await
}

// ─── Predict ───────────────────────────────────────────────────────────────────

pub fn cmd_predict(
    model: Option<&Path>,
    values: Option<&str>,
    input: Option<&Path>,
    lang: &str,
) -> anyhow::Result<()> {
    section("Predict");
    let locale = Locale::parse(lang);

    step_run("Loading classifier");
    let model_path = resolve_model_path(model);
    let engine = InferenceEngine::load(&model_path)?;
    step_done(&model_path.display().to_string());

    let parsed = match (values, input) {
        (Some(csv), _) => parse_csv_values(csv),
        (None, Some(path)) => {
            let json = std::fs::read_to_string(path)?;
            let named: BTreeMap<String, f64> = serde_json::from_str(&json)?;
            FeatureVector::from_named(&named).map_err(Into::into)
        }
        (None, None) => {
            anyhow::bail!("provide --values (22 comma-separated floats) or --input <file.json>")
        }
    };

    let vector = match parsed {
        Ok(v) => v,
        Err(err) => {
            // Invalid input is recoverable from the user's point of view:
            // warn, don't dump a stack of context
            println!("  {} {}", "⚠".yellow(), err.to_string().yellow());
            anyhow::bail!("invalid input");
        }
    };

    let diagnosis = engine.diagnose(&vector)?;

    println!();
    println!("  {} {}", ok("✓"), diagnosis.message(locale).white().bold());
    println!();
    Ok(())
}

fn parse_csv_values(csv: &str) -> anyhow::Result<FeatureVector> {
    let parsed: Vec<f64> = csv
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| ScreeningError::InvalidInput(format!("cannot parse '{}'", s.trim())))
        })
        .collect::<Result<_, _>>()?;
    Ok(FeatureVector::from_slice(&parsed)?)
}

// ─── Features ──────────────────────────────────────────────────────────────────

pub fn cmd_features() -> anyhow::Result<()> {
    section("Feature Schema");

    println!(
        "  {:>3}  {:<18} {:<12} {}",
        muted("#"),
        muted("Name"),
        muted("Default"),
        muted("Description")
    );
    println!("  {}", dim(&"─".repeat(72)));

    for (i, feature) in Feature::ALL.iter().enumerate() {
        println!(
            "  {:>3}  {:<18} {:<12} {}",
            i,
            feature.name(),
            format!("{}", feature.default_value()).truecolor(140, 140, 140),
            dim(feature.description())
        );
    }

    println!();
    println!(
        "  {} features, order must match the model's training-time columns",
        FEATURE_COUNT
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_values() {
        let csv = (0..22).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        let vector = parse_csv_values(&csv).unwrap();
        assert_eq!(vector.as_slice()[21], 21.0);
    }

    #[test]
    fn test_parse_csv_rejects_text() {
        let mut parts: Vec<String> = (0..22).map(|i| i.to_string()).collect();
        parts[4] = "abc".to_string();
        assert!(parse_csv_values(&parts.join(",")).is_err());
    }

    #[test]
    fn test_parse_csv_rejects_wrong_count() {
        assert!(parse_csv_values("1,2,3").is_err());
    }

    #[test]
    fn test_resolve_server_config_flags_override_defaults() {
        let config = resolve_server_config(
            Some("127.0.0.1"),
            Some(9001),
            Some(Path::new("/tmp/other-model.json")),
        );
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9001);
        assert_eq!(config.model_path, PathBuf::from("/tmp/other-model.json"));
    }

    #[test]
    fn test_resolve_server_config_falls_back_to_defaults() {
        let defaults = crate::server::ServerConfig::default();
        let config = resolve_server_config(None, None, None);
        assert_eq!(config.host, defaults.host);
        assert_eq!(config.port, defaults.port);
        assert_eq!(config.model_path, defaults.model_path);
    }

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}", "hello".truecolor(1, 2, 3));
        assert_eq!(strip_ansi(&colored), "hello");
    }
}
