//! # Validate Command
//!
//! Builds a [`ValidatorConfig`] from the config file, the environment and
//! the flags (in that order of precedence, flags last), then validates each
//! file in its own session.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use spdxv_validator::{SpdxValidator, ValidatorConfig, ViolationPolicy};

/// Every file passed.
pub const EXIT_OK: u8 = 0;
/// At least one file failed validation.
pub const EXIT_INVALID: u8 = 1;
/// The validator could not be configured.
pub const EXIT_ERROR: u8 = 2;

/// Arguments for validating one or more manifests.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Manifest files to validate (JSON or YAML).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Follow DYNAMIC_LINK relationships into referenced manifests.
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory searched for referenced manifests. Repeatable.
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// JSON Schema file to use instead of the built-in SPDX 2.2 schema.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// SPDX version to validate against.
    #[arg(long, value_name = "VERSION")]
    pub spdx_version: Option<String>,

    /// Report low-level causes of file and parse errors.
    #[arg(long)]
    pub debug: bool,

    /// Stop at the first failing file and report only the first schema
    /// violation.
    #[arg(long)]
    pub fail_fast: bool,

    /// Print each validated root manifest as JSON.
    #[arg(long)]
    pub print: bool,

    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Layer the flags over the config file and environment.
    pub fn to_config(&self) -> Result<ValidatorConfig> {
        let base = match &self.config {
            Some(path) => ValidatorConfig::from_yaml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ValidatorConfig::default(),
        };
        let mut config = base.with_env_overrides();

        if !self.dirs.is_empty() {
            config.spdx_dirs = self.dirs.clone();
        }
        if let Some(schema) = &self.schema {
            config.schema_file = Some(schema.clone());
        }
        if let Some(version) = &self.spdx_version {
            config.spdx_version = version.clone();
        }
        if self.debug {
            config.debug = true;
        }
        if self.fail_fast {
            config.violation_policy = ViolationPolicy::First;
        }
        Ok(config)
    }
}

/// Run the command, writing one `OK:` or `FAIL:` line per file to `out`.
///
/// Returns the process exit code. Setup failures are returned as errors.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let config = args.to_config()?;
    tracing::debug!(?config, "effective configuration");
    let validator = SpdxValidator::new(&config).context("failed to set up validator")?;

    let mut failed = false;
    for file in &args.files {
        match validator.validate_file(file, args.recursive) {
            Ok(manifest) => {
                writeln!(out, "OK: {}", file.display())?;
                if args.print {
                    writeln!(out, "{}", serde_json::to_string_pretty(manifest.raw())?)?;
                }
            }
            Err(e) => {
                tracing::info!(file = %file.display(), kind = e.kind(), "validation failed");
                writeln!(out, "FAIL: {} — {}", file.display(), e)?;
                failed = true;
                if args.fail_fast {
                    break;
                }
            }
        }
    }

    Ok(if failed { EXIT_INVALID } else { EXIT_OK })
}
