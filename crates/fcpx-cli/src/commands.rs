//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use fcpx_convert::{Conversion, ConvertOptions, Packaging, convert_with_options};
use fcpx_io::{BUNDLE_EXTENSION, load_path, save_bundle, save_path};
use fcpx_model::{DocumentValidationReport, Version};
use fcpx_standards::changes_at;
use fcpx_validate::perform_validation;
use tracing::info;

use crate::cli::{ConvertArgs, ValidateArgs};

/// A failed subcommand, tagged with the process exit code it maps to.
///
/// Exit code 1 means the operation itself refused (validation findings map
/// to 1 in `main`, conversion preconditions here); 2 means the request never
/// got that far (unreadable input, unwritable output, a target that is not
/// even a version string).
#[derive(Debug)]
pub struct CommandFailure {
    pub exit_code: i32,
    pub error: anyhow::Error,
}

impl CommandFailure {
    fn usage(error: anyhow::Error) -> Self {
        Self {
            exit_code: 2,
            error,
        }
    }

    fn operation(error: anyhow::Error) -> Self {
        Self {
            exit_code: 1,
            error,
        }
    }
}

type CommandResult<T> = Result<T, CommandFailure>;

/// Load the input and run both validation passes.
pub fn run_validate(args: &ValidateArgs) -> CommandResult<DocumentValidationReport> {
    let document = load_path(&args.input)
        .with_context(|| format!("load {}", args.input.display()))
        .map_err(CommandFailure::usage)?;
    let report = perform_validation(&document);
    info!(
        input = %args.input.display(),
        errors = report.error_count(),
        "Validation finished"
    );
    Ok(report)
}

/// A finished conversion and where its output landed.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub conversion: Conversion,
    pub output: PathBuf,
}

/// Load the input, convert it, and write the result.
pub fn run_convert(args: &ConvertArgs) -> CommandResult<ConvertOutcome> {
    let target: Version = args
        .to
        .parse()
        .map_err(|_| CommandFailure::usage(anyhow!("`{}` is not a version string", args.to)))?;
    let document = load_path(&args.input)
        .with_context(|| format!("load {}", args.input.display()))
        .map_err(CommandFailure::usage)?;
    let options = ConvertOptions {
        packaging: if args.bundle {
            Packaging::Bundle
        } else {
            Packaging::Xml
        },
    };
    let conversion = convert_with_options(&document, target, &options)
        .map_err(|error| CommandFailure::operation(error.into()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, target, args.bundle));
    let write_result = if args.bundle {
        save_bundle(&conversion.document, &output)
    } else {
        save_path(&conversion.document, &output)
    };
    write_result
        .with_context(|| format!("write {}", output.display()))
        .map_err(CommandFailure::usage)?;
    info!(
        source = %conversion.source,
        target = %conversion.target,
        changes = conversion.changes.len(),
        output = %output.display(),
        "Conversion finished"
    );
    Ok(ConvertOutcome { conversion, output })
}

fn default_output_path(input: &Path, target: Version, bundle: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("converted");
    let extension = if bundle { BUNDLE_EXTENSION } else { "fcpxml" };
    input.with_file_name(format!("{stem}-{target}.{extension}"))
}

/// One row of the `versions` listing.
pub struct VersionRow {
    pub version: Version,
    /// Features first carried at this version.
    pub introduced: usize,
    /// Features this version dropped or renamed away.
    pub retired: usize,
    pub is_latest: bool,
}

/// Known schema versions with their feature-table churn, oldest first.
pub fn version_rows() -> Vec<VersionRow> {
    Version::KNOWN
        .iter()
        .map(|&version| {
            let introduced = changes_at(version)
                .filter(|row| row.introduced_at == Some(version))
                .count();
            let retired = changes_at(version)
                .filter(|row| row.removed_at == Some(version))
                .count();
            VersionRow {
                version,
                introduced,
                retired,
                is_latest: version == Version::latest(),
            }
        })
        .collect()
}
