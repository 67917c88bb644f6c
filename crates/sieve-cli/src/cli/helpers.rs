use super::CliError;
use anyhow::Context;
use serde::Deserialize;
use sieve_core::domain::{SieveResult, SieveSpec};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub(super) struct SieveSpecFile {
    #[serde(rename = "openingsMm")]
    pub(super) openings_mm: Vec<f64>,
}

/// Loads a custom sieve stack from a JSON spec file. The openings are
/// validated by the same constructor the standard stack uses.
pub(super) fn load_sieve_spec(path: &Path) -> Result<SieveSpec, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read sieve spec '{}'", path.display()))?;
    let spec_file = serde_json::from_str::<SieveSpecFile>(&content)
        .with_context(|| format!("failed to parse sieve spec '{}'", path.display()))?;

    into_spec(spec_file).map_err(CliError::Compute)
}

fn into_spec(spec_file: SieveSpecFile) -> SieveResult<SieveSpec> {
    SieveSpec::new(spec_file.openings_mm)
}
