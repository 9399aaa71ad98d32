//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fcpxkit",
    version,
    about = "FCPX Kit - validate and convert FCPXML documents",
    long_about = "Validate FCPXML documents against their declared schema version\n\
                  and convert them between schema versions 1.5 through 1.14.\n\
                  Reads plain .fcpxml files and .fcpxmld bundle directories."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a document and report every violation found.
    Validate(ValidateArgs),

    /// Convert a document to another schema version.
    Convert(ConvertArgs),

    /// List the known schema versions.
    Versions,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to a .fcpxml file or .fcpxmld bundle.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to a .fcpxml file or .fcpxmld bundle.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Target schema version, e.g. 1.9 or 1.13.
    #[arg(long = "to", value_name = "VERSION")]
    pub to: String,

    /// Where to write the converted document
    /// (default: <INPUT> with a -<VERSION> suffix).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a .fcpxmld bundle instead of a plain file.
    ///
    /// Bundles require a target schema version of 1.10 or later; asking for
    /// one below that fails before anything is written.
    #[arg(long = "bundle")]
    pub bundle: bool,

    /// List every change the conversion applied.
    #[arg(long = "changes")]
    pub changes: bool,

    /// Change-log format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

/// CLI output format choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_parses_its_flags() {
        let cli = Cli::try_parse_from([
            "fcpxkit", "convert", "in.fcpxml", "--to", "1.9", "-o", "out.fcpxml", "--changes",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.to, "1.9");
        assert!(args.changes);
        assert!(!args.bundle);
    }
}
