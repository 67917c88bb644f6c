mod model;

pub use model::{D10_TARGET_PERCENT, D30_TARGET_PERCENT, D60_TARGET_PERCENT, analyze};

use crate::domain::{
    AnalysisRequest, GradationAnalysis, ReportArtifact, SieveError, SieveResult, SieveSpec,
};
use crate::input::parse_weights;
use crate::report;
use std::fs;
use std::path::Path;

pub const REQUIRED_INPUTS: [&str; 1] = ["weights.dat"];

/// One analysis request per invocation: read the weights artifact,
/// validate, compute, stage the report artifacts. No state survives a
/// request.
pub struct AnalysisPipeline {
    spec: SieveSpec,
}

impl AnalysisPipeline {
    pub fn standard() -> Self {
        Self {
            spec: SieveSpec::standard(),
        }
    }

    pub fn new(spec: SieveSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &SieveSpec {
        &self.spec
    }

    pub fn analyze_text(&self, source: &str) -> SieveResult<GradationAnalysis> {
        let weights = parse_weights(source, &self.spec)?;
        analyze(&self.spec, &weights)
    }

    pub fn analyze_file(&self, input_path: &Path) -> SieveResult<GradationAnalysis> {
        let source = read_weights_source(input_path)?;
        self.analyze_text(&source)
    }

    pub fn execute(&self, request: &AnalysisRequest) -> SieveResult<Vec<ReportArtifact>> {
        let analysis = self.analyze_file(&request.input_path)?;
        report::write_report_artifacts(
            &request.sample_id,
            &self.spec,
            &analysis,
            &request.output_dir,
        )
    }
}

fn read_weights_source(path: &Path) -> SieveResult<String> {
    fs::read_to_string(path).map_err(|source| {
        SieveError::io_system(
            "IO.WEIGHTS_READ",
            format!("failed to read weights input '{}': {}", path.display(), source),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::AnalysisPipeline;
    use crate::domain::{AnalysisRequest, SieveError, SieveErrorCategory};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn analyze_text_runs_validator_then_calculator() {
        let pipeline = AnalysisPipeline::standard();

        let analysis = pipeline
            .analyze_text("0, 50, 100, 150, 150, 100, 50, 0")
            .expect("valid input should analyze");
        assert_eq!(analysis.table.rows.len(), 8);

        let error = pipeline
            .analyze_text("0, 50, 100")
            .expect_err("short input should fail validation");
        assert_eq!(
            error,
            SieveError::CountMismatch {
                expected: 8,
                actual: 3,
            }
        );

        let error = pipeline
            .analyze_text("0, 0, 0, 0, 0, 0, 0, 0")
            .expect_err("zero mass should fail computation");
        assert_eq!(error, SieveError::DegenerateInput);
    }

    #[test]
    fn execute_rejects_missing_weights_input() {
        let temp = TempDir::new().expect("tempdir should be created");
        let request = AnalysisRequest::new(
            "S-404",
            temp.path().join("weights.dat"),
            temp.path().join("out"),
        );

        let error = AnalysisPipeline::standard()
            .execute(&request)
            .expect_err("missing input should fail");
        assert_eq!(error.category(), SieveErrorCategory::IoSystemError);
        assert_eq!(error.placeholder(), "IO.WEIGHTS_READ");
        assert!(
            !temp.path().join("out").exists(),
            "no artifacts should be staged for a failed request"
        );
    }

    #[test]
    fn execute_emits_nothing_for_invalid_weights() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_path = temp.path().join("weights.dat");
        fs::write(&input_path, "0, 50, bad, 150, 150, 100, 50, 0").expect("input staged");

        let request = AnalysisRequest::new("S-400", &input_path, temp.path().join("out"));
        let error = AnalysisPipeline::standard()
            .execute(&request)
            .expect_err("invalid token should fail");

        assert_eq!(error.placeholder(), "INPUT.WEIGHT_TOKEN");
        assert!(!temp.path().join("out").exists());
    }
}
