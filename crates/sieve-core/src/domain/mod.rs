pub mod errors;

pub use errors::{SieveError, SieveErrorCategory, SieveResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Standard laboratory sieve stack in millimeters, coarsest first,
/// terminated by the pan entry (size 0, catches all finer material).
pub const STANDARD_SIEVE_OPENINGS_MM: [f64; 8] =
    [4.75, 2.36, 1.18, 0.600, 0.300, 0.150, 0.075, 0.0];

pub const PAN_OPENING_MM: f64 = 0.0;

/// D10 below this is fine soil, in millimeters.
pub const FINE_SOIL_MAX_D10_MM: f64 = 0.075;
/// D10 below this (and at least the fine-soil bound) is sand.
pub const SAND_MAX_D10_MM: f64 = 2.0;

pub const WELL_GRADED_MIN_CU: f64 = 4.0;
pub const WELL_GRADED_MIN_CC: f64 = 1.0;
pub const WELL_GRADED_MAX_CC: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SieveSpec {
    openings_mm: Vec<f64>,
}

impl SieveSpec {
    pub fn new(openings_mm: Vec<f64>) -> SieveResult<Self> {
        if openings_mm.len() < 3 {
            return Err(SieveError::internal(
                "SYS.SIEVE_SPEC",
                "sieve spec requires at least two sieve openings and a pan entry",
            ));
        }

        let pan = *openings_mm.last().unwrap_or(&f64::NAN);
        if pan != PAN_OPENING_MM {
            return Err(SieveError::internal(
                "SYS.SIEVE_SPEC",
                format!("sieve spec must end in a pan entry of size 0, got {}", pan),
            ));
        }

        let strictly_decreasing = openings_mm
            .windows(2)
            .all(|window| window[0].is_finite() && window[0] > window[1]);
        if !strictly_decreasing {
            return Err(SieveError::internal(
                "SYS.SIEVE_SPEC",
                "sieve openings must be finite and strictly decreasing",
            ));
        }

        Ok(Self { openings_mm })
    }

    pub fn standard() -> Self {
        Self {
            openings_mm: STANDARD_SIEVE_OPENINGS_MM.to_vec(),
        }
    }

    pub fn openings_mm(&self) -> &[f64] {
        &self.openings_mm
    }

    /// Number of weight values a request must supply, pan included.
    pub fn expected_count(&self) -> usize {
        self.openings_mm.len()
    }

    /// Openings above the pan, ascending: the chart reference ticks.
    pub fn reference_ticks_mm(&self) -> Vec<f64> {
        let mut ticks: Vec<f64> = self
            .openings_mm
            .iter()
            .copied()
            .filter(|opening| *opening > PAN_OPENING_MM)
            .collect();
        ticks.reverse();
        ticks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradationRow {
    pub sieve_size_mm: f64,
    pub weight_retained_g: f64,
    pub percent_retained: f64,
    pub cumulative_percent_retained: f64,
    pub percent_passing: f64,
}

impl GradationRow {
    pub fn is_pan(&self) -> bool {
        self.sieve_size_mm == PAN_OPENING_MM
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradationTable {
    pub rows: Vec<GradationRow>,
    pub total_weight_g: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicDiameters {
    pub d10_mm: f64,
    pub d30_mm: f64,
    pub d60_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(with = "metric_sentinel")]
    pub cu: f64,
    #[serde(with = "metric_sentinel")]
    pub cc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilClass {
    #[serde(rename = "fine soil")]
    FineSoil,
    #[serde(rename = "sand")]
    Sand,
    #[serde(rename = "gravel")]
    Gravel,
}

impl SoilClass {
    pub fn from_d10(d10_mm: f64) -> Self {
        if d10_mm < FINE_SOIL_MAX_D10_MM {
            Self::FineSoil
        } else if d10_mm < SAND_MAX_D10_MM {
            Self::Sand
        } else {
            Self::Gravel
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FineSoil => "fine soil",
            Self::Sand => "sand",
            Self::Gravel => "gravel",
        }
    }
}

impl Display for SoilClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grading {
    #[serde(rename = "well-graded")]
    WellGraded,
    #[serde(rename = "poorly-graded")]
    PoorlyGraded,
}

impl Grading {
    pub fn from_coefficients(cu: f64, cc: f64) -> Self {
        if cu > WELL_GRADED_MIN_CU && cc > WELL_GRADED_MIN_CC && cc < WELL_GRADED_MAX_CC {
            Self::WellGraded
        } else {
            Self::PoorlyGraded
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WellGraded => "well-graded",
            Self::PoorlyGraded => "poorly-graded",
        }
    }
}

impl Display for Grading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub soil_class: SoilClass,
    pub grading: Grading,
}

/// Complete output bundle of one analysis request. Built once by the
/// calculator; the report layer formats it without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradationAnalysis {
    pub table: GradationTable,
    pub diameters: CharacteristicDiameters,
    pub metrics: DerivedMetrics,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub sample_id: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}

impl AnalysisRequest {
    pub fn new(
        sample_id: impl Into<String>,
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sample_id: sample_id.into(),
            input_path: input_path.into(),
            output_dir: output_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub relative_path: PathBuf,
}

impl ReportArtifact {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }
}

/// Serializes the +inf coefficient sentinel as the string "inf" so the
/// JSON artifact stays parseable; finite values stay plain numbers.
mod metric_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MetricRepr {
        Finite(f64),
        Sentinel(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str("inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match MetricRepr::deserialize(deserializer)? {
            MetricRepr::Finite(value) => Ok(value),
            MetricRepr::Sentinel(text) if text == "inf" => Ok(f64::INFINITY),
            MetricRepr::Sentinel(text) => Err(serde::de::Error::custom(format!(
                "unsupported metric sentinel '{}'",
                text
            ))),
        }
    }
}
