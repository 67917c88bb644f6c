mod serialization;

pub use serialization::{
    format_coefficient, format_fixed_f64, normalize_text_artifact, write_text_artifact,
};

use crate::domain::{GradationAnalysis, ReportArtifact, SieveError, SieveResult, SieveSpec};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const REPORT_TITLE: &str = "Sieve Analysis Report";
pub const CURVE_TITLE: &str = "Particle Size Distribution Curve";

pub const TABLE_ARTIFACT: &str = "gradation.dat";
pub const CURVE_ARTIFACT: &str = "curve.dat";
pub const INTERPRETATION_ARTIFACT: &str = "interpretation.dat";
pub const DOCUMENT_ARTIFACT: &str = "report.txt";
pub const JSON_ARTIFACT: &str = "analysis.json";

pub const REPORT_ARTIFACTS: [&str; 5] = [
    TABLE_ARTIFACT,
    CURVE_ARTIFACT,
    INTERPRETATION_ARTIFACT,
    DOCUMENT_ARTIFACT,
    JSON_ARTIFACT,
];

/// Formats and stages every report artifact for one finished analysis.
/// Performs no numerical computation; every value is already in the
/// analysis bundle.
pub fn write_report_artifacts(
    sample_id: &str,
    spec: &SieveSpec,
    analysis: &GradationAnalysis,
    output_dir: &Path,
) -> SieveResult<Vec<ReportArtifact>> {
    fs::create_dir_all(output_dir).map_err(|source| {
        SieveError::io_system(
            "IO.REPORT_OUTPUT_DIRECTORY",
            format!(
                "failed to create report output directory '{}': {}",
                output_dir.display(),
                source
            ),
        )
    })?;

    let artifacts: Vec<ReportArtifact> = REPORT_ARTIFACTS
        .iter()
        .copied()
        .map(ReportArtifact::new)
        .collect();

    for artifact in &artifacts {
        let artifact_name = artifact.relative_path.to_string_lossy().replace('\\', "/");
        let contents = render_artifact(&artifact_name, sample_id, spec, analysis)?;
        let output_path = output_dir.join(&artifact.relative_path);

        write_text_artifact(&output_path, &contents).map_err(|source| {
            SieveError::io_system(
                "IO.REPORT_WRITE",
                format!(
                    "failed to write report artifact '{}': {}",
                    output_path.display(),
                    source
                ),
            )
        })?;
    }

    Ok(artifacts)
}

fn render_artifact(
    artifact_name: &str,
    sample_id: &str,
    spec: &SieveSpec,
    analysis: &GradationAnalysis,
) -> SieveResult<String> {
    match artifact_name {
        TABLE_ARTIFACT => Ok(render_gradation_table(sample_id, analysis)),
        CURVE_ARTIFACT => Ok(render_passing_curve(sample_id, spec, analysis)),
        INTERPRETATION_ARTIFACT => Ok(render_interpretation(sample_id, analysis)),
        DOCUMENT_ARTIFACT => Ok(render_report_document(sample_id, spec, analysis)),
        JSON_ARTIFACT => render_analysis_json(sample_id, analysis),
        other => Err(SieveError::internal(
            "SYS.REPORT_CONTRACT",
            format!("unsupported report artifact '{}'", other),
        )),
    }
}

pub fn render_gradation_table(sample_id: &str, analysis: &GradationAnalysis) -> String {
    let mut lines = Vec::with_capacity(analysis.table.rows.len() + 4);

    lines.push("# sieve gradation table".to_string());
    lines.push(format!("# sample: {}", sample_id));
    lines.push(format!(
        "# total_weight_g: {}",
        format_fixed_f64(analysis.table.total_weight_g, 10, 2).trim()
    ));
    lines.push(
        "# columns: sieve_size_mm weight_retained_g pct_retained cum_pct_retained pct_passing"
            .to_string(),
    );

    for row in &analysis.table.rows {
        lines.push(format!(
            "{} {} {} {} {}",
            size_label(row.sieve_size_mm),
            format_fixed_f64(row.weight_retained_g, 10, 2),
            format_fixed_f64(row.percent_retained, 10, 2),
            format_fixed_f64(row.cumulative_percent_retained, 10, 2),
            format_fixed_f64(row.percent_passing, 10, 2),
        ));
    }

    lines.join("\n")
}

pub fn render_passing_curve(
    sample_id: &str,
    spec: &SieveSpec,
    analysis: &GradationAnalysis,
) -> String {
    let mut lines = Vec::with_capacity(analysis.table.rows.len() + 6);

    lines.push(format!("# {}", CURVE_TITLE));
    lines.push(format!("# sample: {}", sample_id));
    lines.push("# x_axis: sieve_size_mm, log scale, pan excluded".to_string());
    lines.push("# y_axis: pct_passing, linear, 0 to 100".to_string());
    lines.push(format!(
        "# reference_ticks_mm: {}",
        spec.reference_ticks_mm()
            .iter()
            .map(|tick| format!("{:.3}", tick))
            .collect::<Vec<_>>()
            .join(" ")
    ));
    lines.push("# columns: sieve_size_mm pct_passing".to_string());

    for row in analysis.table.rows.iter().filter(|row| !row.is_pan()) {
        lines.push(format!(
            "{} {}",
            format_fixed_f64(row.sieve_size_mm, 11, 3),
            format_fixed_f64(row.percent_passing, 10, 2),
        ));
    }

    lines.join("\n")
}

pub fn render_interpretation(sample_id: &str, analysis: &GradationAnalysis) -> String {
    let mut lines = Vec::with_capacity(10);

    lines.push("sieve gradation interpretation".to_string());
    lines.push(format!("sample = {}", sample_id));
    lines.push(format!("d10_mm = {:.3}", analysis.diameters.d10_mm));
    lines.push(format!("d30_mm = {:.3}", analysis.diameters.d30_mm));
    lines.push(format!("d60_mm = {:.3}", analysis.diameters.d60_mm));
    lines.push(format!("cu = {}", format_coefficient(analysis.metrics.cu, 2)));
    lines.push(format!("cc = {}", format_coefficient(analysis.metrics.cc, 2)));
    lines.push(format!(
        "grading = {}",
        analysis.classification.grading.as_str()
    ));
    lines.push(format!(
        "soil_class = {}",
        analysis.classification.soil_class.as_str()
    ));

    lines.join("\n")
}

pub fn render_report_document(
    sample_id: &str,
    spec: &SieveSpec,
    analysis: &GradationAnalysis,
) -> String {
    let mut lines = Vec::new();

    lines.push(REPORT_TITLE.to_string());
    lines.push(format!("sample = {}", sample_id));
    lines.push(String::new());

    lines.push("[gradation table]".to_string());
    lines.push(render_gradation_table(sample_id, analysis));
    lines.push(String::new());

    lines.push(format!("[{}]", CURVE_TITLE.to_ascii_lowercase()));
    lines.push(format!(
        "log-scale sieve size (mm) vs cumulative percent passing; data in {}",
        CURVE_ARTIFACT
    ));
    lines.push(format!(
        "reference ticks (mm): {}",
        spec.reference_ticks_mm()
            .iter()
            .map(|tick| format!("{:.3}", tick))
            .collect::<Vec<_>>()
            .join(" ")
    ));
    lines.push(String::new());

    lines.push("[interpretation]".to_string());
    lines.push(format!("D10 = {:.3} mm", analysis.diameters.d10_mm));
    lines.push(format!("D30 = {:.3} mm", analysis.diameters.d30_mm));
    lines.push(format!("D60 = {:.3} mm", analysis.diameters.d60_mm));
    lines.push(format!(
        "Uniformity Coefficient (Cu) = {}",
        format_coefficient(analysis.metrics.cu, 2)
    ));
    lines.push(format!(
        "Coefficient of Curvature (Cc) = {}",
        format_coefficient(analysis.metrics.cc, 2)
    ));
    lines.push(format!(
        "Gradation: {}",
        analysis.classification.grading.as_str()
    ));
    lines.push(format!(
        "Soil classification: {}",
        analysis.classification.soil_class.as_str()
    ));

    lines.join("\n")
}

pub fn render_human_summary(sample_id: &str, analysis: &GradationAnalysis) -> String {
    let mut lines = Vec::with_capacity(6);

    lines.push(format!("Sieve analysis for sample {}", sample_id));
    lines.push(format!(
        "  total weight: {:.2} g",
        analysis.table.total_weight_g
    ));
    lines.push(format!(
        "  D10 = {:.3} mm, D30 = {:.3} mm, D60 = {:.3} mm",
        analysis.diameters.d10_mm, analysis.diameters.d30_mm, analysis.diameters.d60_mm
    ));
    lines.push(format!(
        "  Cu = {}, Cc = {}",
        format_coefficient(analysis.metrics.cu, 2),
        format_coefficient(analysis.metrics.cc, 2)
    ));
    lines.push(format!(
        "  gradation: {}",
        analysis.classification.grading.as_str()
    ));
    lines.push(format!(
        "  soil class: {}",
        analysis.classification.soil_class.as_str()
    ));

    lines.join("\n")
}

fn render_analysis_json(sample_id: &str, analysis: &GradationAnalysis) -> SieveResult<String> {
    #[derive(Serialize)]
    struct AnalysisDocument<'a> {
        sample: &'a str,
        #[serde(flatten)]
        analysis: &'a GradationAnalysis,
    }

    serde_json::to_string_pretty(&AnalysisDocument {
        sample: sample_id,
        analysis,
    })
    .map_err(|source| {
        SieveError::internal(
            "SYS.REPORT_JSON",
            format!("failed to serialize analysis document: {}", source),
        )
    })
}

fn size_label(sieve_size_mm: f64) -> String {
    if sieve_size_mm == crate::domain::PAN_OPENING_MM {
        format!("{:>11}", "Pan")
    } else {
        format_fixed_f64(sieve_size_mm, 11, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        render_gradation_table, render_human_summary, render_interpretation, render_passing_curve,
        render_report_document,
    };
    use crate::domain::SieveSpec;
    use crate::gradation::analyze;

    fn worked_example() -> crate::domain::GradationAnalysis {
        let spec = SieveSpec::standard();
        let weights = [0.0, 50.0, 100.0, 150.0, 150.0, 100.0, 50.0, 0.0];
        analyze(&spec, &weights).expect("worked example should analyze")
    }

    #[test]
    fn table_labels_pan_row_and_fixes_precision() {
        let rendered = render_gradation_table("S-01", &worked_example());

        assert!(rendered.contains("# sample: S-01"));
        assert!(rendered.contains("# total_weight_g: 600.00"));
        assert!(rendered.contains("      4.750       0.00       0.00       0.00     100.00"));
        assert!(rendered.contains("        Pan       0.00       0.00     100.00       0.00"));
    }

    #[test]
    fn curve_excludes_pan_and_lists_reference_ticks() {
        let spec = SieveSpec::standard();
        let rendered = render_passing_curve("S-01", &spec, &worked_example());

        assert!(
            rendered.contains("# reference_ticks_mm: 0.075 0.150 0.300 0.600 1.180 2.360 4.750")
        );
        assert!(!rendered.contains("Pan"));
        assert_eq!(
            rendered.lines().count(),
            6 + 7,
            "curve should hold one point per non-pan sieve"
        );
    }

    #[test]
    fn interpretation_carries_labels_without_rederiving() {
        let rendered = render_interpretation("S-01", &worked_example());

        assert!(rendered.contains("d10_mm = 0.165"));
        assert!(rendered.contains("d30_mm = 0.360"));
        assert!(rendered.contains("d60_mm = 0.832"));
        assert!(rendered.contains("cu = 5.04"));
        assert!(rendered.contains("cc = 0.94"));
        assert!(rendered.contains("grading = poorly-graded"));
        assert!(rendered.contains("soil_class = sand"));
    }

    #[test]
    fn report_document_combines_all_sections() {
        let spec = SieveSpec::standard();
        let rendered = render_report_document("S-01", &spec, &worked_example());

        assert!(rendered.starts_with("Sieve Analysis Report"));
        assert!(rendered.contains("[gradation table]"));
        assert!(rendered.contains("[particle size distribution curve]"));
        assert!(rendered.contains("[interpretation]"));
        assert!(rendered.contains("Uniformity Coefficient (Cu) = 5.04"));
        assert!(rendered.contains("Coefficient of Curvature (Cc) = 0.94"));
    }

    #[test]
    fn human_summary_is_single_screen() {
        let rendered = render_human_summary("S-01", &worked_example());
        assert_eq!(rendered.lines().count(), 6);
        assert!(rendered.contains("soil class: sand"));
    }
}
