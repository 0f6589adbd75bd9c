//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::{Path, PathBuf};

/// borough_complaints - count complaints by type and borough for a date range
///
/// Reads a service-request CSV (no header row), keeps rows whose creation
/// date falls inside [start, end] inclusive, and prints
/// `complaint type,borough,count` lines sorted by type then borough.
///
/// Examples:
///   borough_complaints -i complaints.csv -s 01/01/2020 -e 01/31/2020
///   borough_complaints -i complaints.csv -s 01/01/2020 -e 12/31/2020 -o counts.csv
///   borough_complaints --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input CSV file
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "init_config"
    )]
    pub input: Option<PathBuf>,

    /// Start date in MM/DD/YYYY format
    #[arg(
        short = 's',
        long = "start_date",
        alias = "start-date",
        value_name = "MM/DD/YYYY",
        required_unless_present = "init_config"
    )]
    pub start_date: Option<String>,

    /// End date in MM/DD/YYYY format
    #[arg(
        short = 'e',
        long = "end_date",
        alias = "end-date",
        value_name = "MM/DD/YYYY",
        required_unless_present = "init_config"
    )]
    pub end_date: Option<String>,

    /// Output file (optional)
    ///
    /// Overwritten if it exists. When absent the report goes to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .borough_complaints.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "BOROUGH_COMPLAINTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .borough_complaints.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Input path; empty when only `--init-config` was given.
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or(Path::new(""))
    }

    pub fn start(&self) -> &str {
        self.start_date.as_deref().unwrap_or("")
    }

    pub fn end(&self) -> &str {
        self.end_date.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("complaints.csv")),
            start_date: Some("01/01/2020".to_string()),
            end_date: Some("01/31/2020".to_string()),
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_short_flags() {
        let args = Args::try_parse_from([
            "borough_complaints",
            "-i",
            "in.csv",
            "-s",
            "01/01/2020",
            "-e",
            "02/01/2020",
            "-o",
            "out.csv",
        ])
        .unwrap();

        assert_eq!(args.input_path(), Path::new("in.csv"));
        assert_eq!(args.start(), "01/01/2020");
        assert_eq!(args.end(), "02/01/2020");
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Args::try_parse_from([
            "borough_complaints",
            "--input",
            "in.csv",
            "--start_date",
            "01/01/2020",
            "--end-date",
            "02/01/2020",
        ])
        .unwrap();

        assert_eq!(args.start(), "01/01/2020");
        assert_eq!(args.end(), "02/01/2020");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_missing_required_flag() {
        let result = Args::try_parse_from([
            "borough_complaints",
            "-i",
            "in.csv",
            "-s",
            "01/01/2020",
        ]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_init_config_needs_no_other_flags() {
        let args = Args::try_parse_from(["borough_complaints", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
