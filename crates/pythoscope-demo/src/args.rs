//! CLI argument definitions for pythoscope-demo.

use std::path::PathBuf;

use clap::Parser;
use pythoscope_log::Level;

/// Emits a few pythoscope-style log lines, optionally redirecting part of
/// them to a file.
#[derive(Parser, Debug)]
#[command(name = "pythoscope-demo", version)]
pub struct Cli {
    /// Debug level: extended lines with time, module and line number
    #[arg(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Error level: only errors are printed
    #[arg(long)]
    pub quiet: bool,

    /// File that receives the log while the demo pretends to collect modules
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn level(&self) -> Level {
        if self.debug {
            Level::Debug
        } else if self.quiet {
            Level::Error
        } else {
            Level::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pythoscope-demo").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_info() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.level(), Level::Info);
        assert!(cli.output.is_none());
    }

    #[test]
    fn level_flags() {
        assert_eq!(parse(&["--debug"]).unwrap().level(), Level::Debug);
        assert_eq!(parse(&["--quiet"]).unwrap().level(), Level::Error);
    }

    #[test]
    fn debug_and_quiet_conflict() {
        let err = parse(&["--debug", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn output_accepts_both_spellings() {
        let cli = parse(&["--output", "run.log"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("run.log")));
        let cli = parse(&["--output=run.log"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn unknown_argument_rejected() {
        let err = parse(&["--verbose"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
