//! the args for running quillc

use clap::{value_parser, ArgAction};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(version, about = "Parses quill source into a diagnosable syntax tree")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to check
    #[clap(value_name="source file", value_hint=clap::ValueHint::FilePath, required_unless_present = "worker")]
    pub files: Vec<PathBuf>,

    /// Print the parsed tree back out in the requested form
    #[clap(long, value_enum)]
    pub emit: Option<EmitKind>,

    /// Read lines from stdin and run the whole pipeline once per line
    #[clap(long, conflicts_with = "files")]
    pub worker: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

/// What to write to stdout after a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitKind {
    /// Canonical quill source
    Pretty,
    /// Naive JavaScript
    Js,
}

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2 => LevelFilter::TRACE,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "quillc file.quill";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files[0], Path::new("file.quill"));
        assert_eq!(args.emit, None);
    }

    #[test]
    fn test_emit_mode() {
        let test = "quillc --emit js file.quill";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.emit, Some(EmitKind::Js));
    }

    #[test]
    fn test_worker_mode_requires_no_files() {
        let args = Args::try_parse_from("quillc --worker".split(" "))
            .expect("could not parse test string");
        assert!(args.worker);
        assert!(args.files.is_empty());
        assert!(Args::try_parse_from(["quillc"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = Args::try_parse_from("quillc -vv file.quill".split(" ")).unwrap();
        assert_eq!(args.logging().log_level_filter(), LevelFilter::TRACE);
        let args = Args::try_parse_from("quillc -q file.quill".split(" ")).unwrap();
        assert_eq!(args.logging().log_level_filter(), LevelFilter::ERROR);
    }
}
