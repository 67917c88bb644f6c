use crate::domain::{
    CharacteristicDiameters, Classification, DerivedMetrics, GradationAnalysis, GradationRow,
    GradationTable, Grading, SieveError, SieveResult, SieveSpec, SoilClass,
};
use crate::numerics::{cumulative_sum, interpolate_linear, stable_sum};

pub const D10_TARGET_PERCENT: f64 = 10.0;
pub const D30_TARGET_PERCENT: f64 = 30.0;
pub const D60_TARGET_PERCENT: f64 = 60.0;

/// Pure gradation analysis: sieve spec + validated weights in, complete
/// result bundle out. Owns no state; safe to call concurrently for
/// independent requests.
pub fn analyze(spec: &SieveSpec, weights: &[f64]) -> SieveResult<GradationAnalysis> {
    if weights.len() != spec.expected_count() {
        return Err(SieveError::CountMismatch {
            expected: spec.expected_count(),
            actual: weights.len(),
        });
    }

    let total_weight_g = stable_sum(weights);
    if total_weight_g <= 0.0 {
        return Err(SieveError::DegenerateInput);
    }

    let percent_retained: Vec<f64> = weights
        .iter()
        .map(|weight| weight / total_weight_g * 100.0)
        .collect();
    let cumulative = cumulative_sum(&percent_retained);

    let rows: Vec<GradationRow> = spec
        .openings_mm()
        .iter()
        .zip(weights)
        .zip(percent_retained.iter().zip(&cumulative))
        .map(
            |((&sieve_size_mm, &weight_retained_g), (&percent_retained, &cumulative_retained))| {
                GradationRow {
                    sieve_size_mm,
                    weight_retained_g,
                    percent_retained,
                    cumulative_percent_retained: cumulative_retained,
                    percent_passing: 100.0 - cumulative_retained,
                }
            },
        )
        .collect();

    let diameters = characteristic_diameters(&rows)?;
    let metrics = derived_metrics(&diameters);
    let classification = Classification {
        soil_class: SoilClass::from_d10(diameters.d10_mm),
        grading: Grading::from_coefficients(metrics.cu, metrics.cc),
    };

    Ok(GradationAnalysis {
        table: GradationTable {
            rows,
            total_weight_g,
        },
        diameters,
        metrics,
        classification,
    })
}

/// Reads D10/D30/D60 off the passing curve. The pan contributes mass to
/// the cumulative sums but has no opening size, so it is excluded from
/// the interpolation domain; the curve is viewed in ascending-passing
/// (finest-to-coarsest) order and clamps outside the observed range.
fn characteristic_diameters(rows: &[GradationRow]) -> SieveResult<CharacteristicDiameters> {
    let mut passing = Vec::with_capacity(rows.len());
    let mut sizes = Vec::with_capacity(rows.len());
    for row in rows.iter().rev() {
        if !row.is_pan() {
            passing.push(row.percent_passing);
            sizes.push(row.sieve_size_mm);
        }
    }

    Ok(CharacteristicDiameters {
        d10_mm: diameter_at_passing(D10_TARGET_PERCENT, &passing, &sizes)?,
        d30_mm: diameter_at_passing(D30_TARGET_PERCENT, &passing, &sizes)?,
        d60_mm: diameter_at_passing(D60_TARGET_PERCENT, &passing, &sizes)?,
    })
}

fn diameter_at_passing(percent: f64, passing: &[f64], sizes: &[f64]) -> SieveResult<f64> {
    interpolate_linear(percent, passing, sizes).ok_or_else(|| {
        SieveError::internal(
            "SYS.PASSING_CURVE",
            format!(
                "passing curve with {} points is not interpolable at {}%",
                passing.len(),
                percent
            ),
        )
    })
}

fn derived_metrics(diameters: &CharacteristicDiameters) -> DerivedMetrics {
    let cu = if diameters.d10_mm == 0.0 {
        f64::INFINITY
    } else {
        diameters.d60_mm / diameters.d10_mm
    };
    let cc = if diameters.d10_mm == 0.0 || diameters.d60_mm == 0.0 {
        f64::INFINITY
    } else {
        diameters.d30_mm * diameters.d30_mm / (diameters.d10_mm * diameters.d60_mm)
    };

    DerivedMetrics { cu, cc }
}
