use super::CliError;
use super::helpers::load_sieve_spec;
use sieve_core::domain::PAN_OPENING_MM;
use sieve_core::gradation::{AnalysisPipeline, REQUIRED_INPUTS};
use sieve_core::report;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct AnalyzeArgs {
    /// Comma-separated retained weights in grams, coarsest sieve first,
    /// pan last
    #[arg(long, conflicts_with = "input")]
    weights: Option<String>,

    /// Weights artifact to read instead of --weights (defaults to
    /// weights.dat in the current directory)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output directory for the report artifacts
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Sample identifier stamped into the report headers
    #[arg(long, default_value = "SAMPLE-001")]
    sample: String,

    #[command(flatten)]
    spec: SpecFlags,
}

#[derive(clap::Args)]
pub(super) struct SpecFlags {
    /// JSON sieve spec file overriding the standard stack
    #[arg(long = "spec")]
    spec_path: Option<PathBuf>,
}

impl SpecFlags {
    fn into_pipeline(self) -> Result<AnalysisPipeline, CliError> {
        match self.spec_path {
            Some(path) => Ok(AnalysisPipeline::new(load_sieve_spec(&path)?)),
            None => Ok(AnalysisPipeline::standard()),
        }
    }
}

pub(super) fn run_analyze_command(args: AnalyzeArgs) -> Result<i32, CliError> {
    let pipeline = args.spec.into_pipeline()?;

    let analysis = match &args.weights {
        Some(weights_text) => pipeline
            .analyze_text(weights_text)
            .map_err(CliError::Compute)?,
        None => {
            let input_path = args
                .input
                .unwrap_or_else(|| PathBuf::from(REQUIRED_INPUTS[0]));
            tracing::debug!(input = %input_path.display(), "reading weights artifact");
            pipeline
                .analyze_file(&input_path)
                .map_err(CliError::Compute)?
        }
    };

    tracing::info!(
        sample = %args.sample,
        total_weight_g = analysis.table.total_weight_g,
        "gradation analysis complete"
    );

    let artifacts =
        report::write_report_artifacts(&args.sample, pipeline.spec(), &analysis, &args.output)
            .map_err(CliError::Compute)?;

    println!("{}", report::render_human_summary(&args.sample, &analysis));
    for artifact in &artifacts {
        let path = args.output.join(&artifact.relative_path);
        println!("wrote {}", path.display());
    }

    Ok(0)
}

pub(super) fn run_spec_command(args: SpecFlags) -> Result<i32, CliError> {
    let pipeline = args.into_pipeline()?;

    for &opening in pipeline.spec().openings_mm() {
        if opening == PAN_OPENING_MM {
            println!("Pan");
        } else {
            println!("{:.3} mm", opening);
        }
    }

    Ok(0)
}
