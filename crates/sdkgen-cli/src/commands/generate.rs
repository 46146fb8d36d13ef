use std::path::PathBuf;

use anyhow::Context;
use sdkgen_compiler::FileConfig;
use sdkgen_compiler::frontend::{load_documents, load_schema};
use sdkgen_compiler::package::Package;

pub struct GenerateOptions {
    pub config_path: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub check: bool,
}

/// Where a run left its output.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Package written to this directory
    Written(PathBuf),
    /// Generation succeeded; `--check` kept it in memory
    Checked,
}

pub fn run(options: GenerateOptions) -> anyhow::Result<Outcome> {
    let file = FileConfig::load(&options.config_path)
        .with_context(|| format!("loading config `{}`", options.config_path.display()))?;
    let package = build(&file)?;

    if options.check {
        tracing::info!(package = %package.name, "check passed, nothing written");
        return Ok(Outcome::Checked);
    }

    let out_dir = options.out_dir.unwrap_or(file.target_package_path);
    let root = package
        .write(&out_dir)
        .with_context(|| format!("writing package `{}`", package.name))?;
    Ok(Outcome::Written(root))
}

/// Read every input and generate the package without touching the output directory.
fn build(file: &FileConfig) -> anyhow::Result<Package> {
    let config = file.generator_config();
    let schema = load_schema(&file.schema_path)
        .with_context(|| format!("reading schema `{}`", file.schema_path.display()))?;
    let document = load_documents(&file.queries_path)
        .with_context(|| format!("reading operations `{}`", file.queries_path.display()))?;
    tracing::debug!(
        types = schema.types().count(),
        operations = document.operations.len(),
        fragments = document.fragments.len(),
        "inputs loaded"
    );

    Ok(sdkgen_compiler::generate(&schema, &document, &config)?)
}
