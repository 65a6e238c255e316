//! Voice-measurement feature schema
//!
//! The classifier consumes exactly 22 numeric voice measurements in the
//! column order used at training time. That order is load-bearing: the model
//! has no way to detect a permuted vector, so the schema lives in one place
//! as an enum and every construction path goes through validation.

use std::collections::BTreeMap;
use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreeningError};

/// Number of features the classifier expects
pub const FEATURE_COUNT: usize = 22;

/// One of the 22 voice measurements, in canonical training-time order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    Fo,
    Fhi,
    Flo,
    JitterPercent,
    JitterAbs,
    Rap,
    Ppq,
    JitterDdp,
    Shimmer,
    ShimmerDb,
    ShimmerApq3,
    ShimmerApq5,
    Apq,
    ShimmerDda,
    Nhr,
    Hnr,
    Rpde,
    Dfa,
    Spread1,
    Spread2,
    D2,
    Ppe,
}

impl Feature {
    /// All features in canonical order. Index into this array is the
    /// position of the feature in the model's input vector.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Fo,
        Feature::Fhi,
        Feature::Flo,
        Feature::JitterPercent,
        Feature::JitterAbs,
        Feature::Rap,
        Feature::Ppq,
        Feature::JitterDdp,
        Feature::Shimmer,
        Feature::ShimmerDb,
        Feature::ShimmerApq3,
        Feature::ShimmerApq5,
        Feature::Apq,
        Feature::ShimmerDda,
        Feature::Nhr,
        Feature::Hnr,
        Feature::Rpde,
        Feature::Dfa,
        Feature::Spread1,
        Feature::Spread2,
        Feature::D2,
        Feature::Ppe,
    ];

    /// Position of this feature in the model's input vector
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Dataset column name, exactly as recorded in the training data
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Fo => "MDVP:Fo(Hz)",
            Feature::Fhi => "MDVP:Fhi(Hz)",
            Feature::Flo => "MDVP:Flo(Hz)",
            Feature::JitterPercent => "MDVP:Jitter(%)",
            Feature::JitterAbs => "MDVP:Jitter(Abs)",
            Feature::Rap => "MDVP:RAP",
            Feature::Ppq => "MDVP:PPQ",
            Feature::JitterDdp => "Jitter:DDP",
            Feature::Shimmer => "MDVP:Shimmer",
            Feature::ShimmerDb => "MDVP:Shimmer(dB)",
            Feature::ShimmerApq3 => "Shimmer:APQ3",
            Feature::ShimmerApq5 => "Shimmer:APQ5",
            Feature::Apq => "MDVP:APQ",
            Feature::ShimmerDda => "Shimmer:DDA",
            Feature::Nhr => "NHR",
            Feature::Hnr => "HNR",
            Feature::Rpde => "RPDE",
            Feature::Dfa => "DFA",
            Feature::Spread1 => "spread1",
            Feature::Spread2 => "spread2",
            Feature::D2 => "D2",
            Feature::Ppe => "PPE",
        }
    }

    /// Stable HTML form field name
    pub fn form_key(&self) -> &'static str {
        match self {
            Feature::Fo => "fo",
            Feature::Fhi => "fhi",
            Feature::Flo => "flo",
            Feature::JitterPercent => "jitter_percent",
            Feature::JitterAbs => "jitter_abs",
            Feature::Rap => "rap",
            Feature::Ppq => "ppq",
            Feature::JitterDdp => "jitter_ddp",
            Feature::Shimmer => "shimmer",
            Feature::ShimmerDb => "shimmer_db",
            Feature::ShimmerApq3 => "shimmer_apq3",
            Feature::ShimmerApq5 => "shimmer_apq5",
            Feature::Apq => "apq",
            Feature::ShimmerDda => "shimmer_dda",
            Feature::Nhr => "nhr",
            Feature::Hnr => "hnr",
            Feature::Rpde => "rpde",
            Feature::Dfa => "dfa",
            Feature::Spread1 => "spread1",
            Feature::Spread2 => "spread2",
            Feature::D2 => "d2",
            Feature::Ppe => "ppe",
        }
    }

    /// Short English description of the measurement
    pub fn description(&self) -> &'static str {
        match self {
            Feature::Fo => "Average vocal fundamental frequency",
            Feature::Fhi => "Maximum vocal fundamental frequency",
            Feature::Flo => "Minimum vocal fundamental frequency",
            Feature::JitterPercent => "Variation in fundamental frequency",
            Feature::JitterAbs => "Absolute variation in fundamental frequency",
            Feature::Rap => "Relative Average Perturbation",
            Feature::Ppq => "Five-point Period Perturbation Quotient",
            Feature::JitterDdp => "Average absolute difference of differences between cycles",
            Feature::Shimmer => "Variation in amplitude",
            Feature::ShimmerDb => "Shimmer in decibels",
            Feature::ShimmerApq3 => "Three-point Amplitude Perturbation Quotient",
            Feature::ShimmerApq5 => "Five-point Amplitude Perturbation Quotient",
            Feature::Apq => "Amplitude variation relative to average amplitude",
            Feature::ShimmerDda => "Average absolute difference between consecutive amplitude differences",
            Feature::Nhr => "Noise-to-Harmonics Ratio",
            Feature::Hnr => "Harmonics-to-Noise Ratio",
            Feature::Rpde => "Recurrence Period Density Entropy",
            Feature::Dfa => "Detrended Fluctuation Analysis",
            Feature::Spread1 => "Nonlinear measure of fundamental frequency variation",
            Feature::Spread2 => "Nonlinear measure of fundamental frequency variation",
            Feature::D2 => "Correlation Dimension",
            Feature::Ppe => "Pitch Period Entropy",
        }
    }

    /// Human-readable field label for the given locale
    pub fn label(&self, locale: Locale) -> String {
        match locale {
            Locale::En => format!("{} ({})", self.name(), self.description()),
            Locale::Id => format!("{} ({})", self.name(), self.description_id()),
        }
    }

    fn description_id(&self) -> &'static str {
        match self {
            Feature::Fo => "Frekuensi dasar vokal rata-rata",
            Feature::Fhi => "Frekuensi dasar vokal maksimum",
            Feature::Flo => "Frekuensi dasar vokal minimum",
            Feature::JitterPercent => "Variasi frekuensi dasar",
            Feature::JitterAbs => "Variasi absolut frekuensi dasar",
            Feature::Rap => "Perturbasi rata-rata relatif",
            Feature::Ppq => "Kuosien perturbasi periode lima titik",
            Feature::JitterDdp => "Rata-rata selisih absolut antar siklus",
            Feature::Shimmer => "Variasi amplitudo",
            Feature::ShimmerDb => "Shimmer dalam desibel",
            Feature::ShimmerApq3 => "Kuosien perturbasi amplitudo tiga titik",
            Feature::ShimmerApq5 => "Kuosien perturbasi amplitudo lima titik",
            Feature::Apq => "Variasi amplitudo terhadap amplitudo rata-rata",
            Feature::ShimmerDda => "Rata-rata selisih absolut antar selisih amplitudo",
            Feature::Nhr => "Rasio derau terhadap harmonik",
            Feature::Hnr => "Rasio harmonik terhadap derau",
            Feature::Rpde => "Entropi kepadatan periode rekurensi",
            Feature::Dfa => "Analisis fluktuasi tanpa tren",
            Feature::Spread1 => "Ukuran nonlinier variasi frekuensi dasar",
            Feature::Spread2 => "Ukuran nonlinier variasi frekuensi dasar",
            Feature::D2 => "Dimensi korelasi",
            Feature::Ppe => "Entropi periode nada",
        }
    }

    /// Typical dataset value, used to pre-fill the numeric form variant
    pub fn default_value(&self) -> f64 {
        match self {
            Feature::Fo => 154.229,
            Feature::Fhi => 197.105,
            Feature::Flo => 116.325,
            Feature::JitterPercent => 0.00622,
            Feature::JitterAbs => 0.00004,
            Feature::Rap => 0.00331,
            Feature::Ppq => 0.00345,
            Feature::JitterDdp => 0.00994,
            Feature::Shimmer => 0.02971,
            Feature::ShimmerDb => 0.28225,
            Feature::ShimmerApq3 => 0.01566,
            Feature::ShimmerApq5 => 0.01788,
            Feature::Apq => 0.02408,
            Feature::ShimmerDda => 0.04699,
            Feature::Nhr => 0.02485,
            Feature::Hnr => 21.886,
            Feature::Rpde => 0.49854,
            Feature::Dfa => 0.71817,
            Feature::Spread1 => -5.68443,
            Feature::Spread2 => 0.22651,
            Feature::D2 => 2.38183,
            Feature::Ppe => 0.20655,
        }
    }

    /// Look up a feature by its dataset column name or form key
    pub fn from_name(name: &str) -> Option<Feature> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name || f.form_key() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// UI language for labels and diagnosis messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    pub fn parse(s: &str) -> Locale {
        match s.to_ascii_lowercase().as_str() {
            "id" | "in" => Locale::Id,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }
}

/// Validated, fixed-order input vector for the classifier
///
/// Deliberately not deserializable: every construction path
/// ([`FeatureVector::from_slice`], [`FeatureVector::parse`],
/// [`FeatureVector::from_named`]) enforces the length and finiteness
/// invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build a vector from values already in canonical order
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(ScreeningError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }

        let non_finite: Vec<&str> = Feature::ALL
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| !v.is_finite())
            .map(|(f, _)| f.name())
            .collect();
        if !non_finite.is_empty() {
            return Err(ScreeningError::InvalidInput(format!(
                "non-finite value for: {}",
                non_finite.join(", ")
            )));
        }

        let mut arr = [0.0; FEATURE_COUNT];
        arr.copy_from_slice(values);
        Ok(Self { values: arr })
    }

    /// Parse raw form fields (form key -> submitted text) into a vector.
    ///
    /// Every missing, blank, or unparseable field is collected so the user
    /// sees the full list in one warning instead of fixing fields one at a
    /// time. Unknown keys are ignored (forms carry variant/lang fields too).
    pub fn parse(raw: &BTreeMap<String, String>) -> Result<Self> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut bad: Vec<&str> = Vec::new();

        for (i, feature) in Feature::ALL.iter().enumerate() {
            match raw.get(feature.form_key()).map(|s| s.trim()) {
                None | Some("") => bad.push(feature.name()),
                Some(text) => match text.parse::<f64>() {
                    Ok(v) if v.is_finite() => values[i] = v,
                    _ => bad.push(feature.name()),
                },
            }
        }

        if !bad.is_empty() {
            return Err(ScreeningError::InvalidInput(bad.join(", ")));
        }
        Ok(Self { values })
    }

    /// Build a vector from a name -> value map (dataset column names or
    /// form keys). All 22 features must be present and finite; unknown
    /// names are rejected rather than silently dropped.
    pub fn from_named(named: &BTreeMap<String, f64>) -> Result<Self> {
        if let Some(unknown) = named.keys().find(|k| Feature::from_name(k).is_none()) {
            return Err(ScreeningError::InvalidInput(format!(
                "unknown feature: {unknown}"
            )));
        }

        let mut values = [0.0; FEATURE_COUNT];
        let mut missing: Vec<&str> = Vec::new();
        for (i, feature) in Feature::ALL.iter().enumerate() {
            let value = named
                .get(feature.name())
                .or_else(|| named.get(feature.form_key()));
            match value {
                Some(v) if v.is_finite() => values[i] = *v,
                _ => missing.push(feature.name()),
            }
        }
        if !missing.is_empty() {
            return Err(ScreeningError::InvalidInput(missing.join(", ")));
        }
        Ok(Self { values })
    }

    /// Value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Convert to an ndarray vector for the classifier
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_form() -> BTreeMap<String, String> {
        Feature::ALL
            .iter()
            .map(|f| (f.form_key().to_string(), f.default_value().to_string()))
            .collect()
    }

    #[test]
    fn test_schema_has_22_features() {
        assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_canonical_order() {
        assert_eq!(Feature::ALL[0].name(), "MDVP:Fo(Hz)");
        assert_eq!(Feature::ALL[7].name(), "Jitter:DDP");
        assert_eq!(Feature::ALL[15].name(), "HNR");
        assert_eq!(Feature::ALL[21].name(), "PPE");
    }

    #[test]
    fn test_form_keys_unique() {
        let mut keys: Vec<&str> = Feature::ALL.iter().map(|f| f.form_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_from_name_roundtrip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
            assert_eq!(Feature::from_name(feature.form_key()), Some(feature));
        }
        assert_eq!(Feature::from_name("MDVP_RAP"), None);
    }

    #[test]
    fn test_from_slice_valid() {
        let values: Vec<f64> = (0..22).map(|i| i as f64).collect();
        let vector = FeatureVector::from_slice(&values).unwrap();
        assert_eq!(vector.get(Feature::Fo), 0.0);
        assert_eq!(vector.get(Feature::Ppe), 21.0);
        assert_eq!(vector.to_array().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_from_slice_wrong_length() {
        let err = FeatureVector::from_slice(&[1.0; 21]).unwrap_err();
        assert!(matches!(
            err,
            ScreeningError::FeatureCount { expected: 22, actual: 21 }
        ));
    }

    #[test]
    fn test_from_slice_rejects_nan() {
        let mut values = [1.0; 22];
        values[3] = f64::NAN;
        let err = FeatureVector::from_slice(&values).unwrap_err();
        match err {
            ScreeningError::InvalidInput(msg) => assert!(msg.contains("MDVP:Jitter(%)")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let vector = FeatureVector::parse(&full_form()).unwrap();
        assert!((vector.get(Feature::Hnr) - 21.886).abs() < 1e-9);
        assert!((vector.get(Feature::Spread1) - (-5.68443)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_reports_all_bad_fields() {
        let mut form = full_form();
        form.insert("fo".to_string(), "abc".to_string());
        form.remove("ppe");
        let err = FeatureVector::parse(&form).unwrap_err();
        match err {
            ScreeningError::InvalidInput(msg) => {
                assert!(msg.contains("MDVP:Fo(Hz)"));
                assert!(msg.contains("PPE"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_blank_field() {
        let mut form = full_form();
        form.insert("nhr".to_string(), "   ".to_string());
        let err = FeatureVector::parse(&form).unwrap_err();
        assert!(err.to_string().contains("NHR"));
    }

    #[test]
    fn test_parse_ignores_extra_keys() {
        let mut form = full_form();
        form.extend(raw_form(&[("variant", "classic"), ("lang", "id")]));
        assert!(FeatureVector::parse(&form).is_ok());
    }

    #[test]
    fn test_parse_order_matches_schema() {
        let mut form = BTreeMap::new();
        for (i, feature) in Feature::ALL.iter().enumerate() {
            form.insert(feature.form_key().to_string(), i.to_string());
        }
        let vector = FeatureVector::parse(&form).unwrap();
        for (i, value) in vector.as_slice().iter().enumerate() {
            assert_eq!(*value, i as f64);
        }
    }

    #[test]
    fn test_from_named_by_column_name() {
        let named: BTreeMap<String, f64> = Feature::ALL
            .iter()
            .map(|f| (f.name().to_string(), f.default_value()))
            .collect();
        let vector = FeatureVector::from_named(&named).unwrap();
        assert!((vector.get(Feature::D2) - 2.38183).abs() < 1e-9);
    }

    #[test]
    fn test_from_named_rejects_unknown() {
        let mut named: BTreeMap<String, f64> = Feature::ALL
            .iter()
            .map(|f| (f.name().to_string(), 1.0))
            .collect();
        named.insert("MDVP_RAP".to_string(), 1.0);
        let err = FeatureVector::from_named(&named).unwrap_err();
        assert!(err.to_string().contains("unknown feature"));
    }

    #[test]
    fn test_from_named_reports_missing() {
        let mut named: BTreeMap<String, f64> = Feature::ALL
            .iter()
            .map(|f| (f.name().to_string(), 1.0))
            .collect();
        named.remove("DFA");
        let err = FeatureVector::from_named(&named).unwrap_err();
        assert!(err.to_string().contains("DFA"));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("id"), Locale::Id);
        assert_eq!(Locale::parse("EN"), Locale::En);
        assert_eq!(Locale::parse("fr"), Locale::En);
    }
}
