use crate::args::{Args, EmitKind};
use clap::Parser;
use eyre::WrapErr;
use quill_ast::decl::ModuleRoot;
use quill_ast_parsing::parse_tolerant;
use quill_emit::{JsTranspiler, PrettyPrinter};
use quill_tokens::diagnostics::Severity;
use std::io;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting quillc with args: {args:?}");
    debug!("quillc version: {}", env!("CARGO_PKG_VERSION"));

    if args.worker {
        return run_worker(args.emit);
    }

    let mut failed = false;
    for path in &args.files {
        failed |= !check_file(path, args.emit)?;
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Parses one file, printing diagnostics to stderr and any requested emit
/// output to stdout. Returns whether the file was free of errors.
fn check_file(path: &Path, emit: Option<EmitKind>) -> eyre::Result<bool> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    let (root, messages) = parse_tolerant(&text);
    for message in &messages {
        eprintln!("{}:{}", path.display(), message);
    }
    if let Some(emit) = emit {
        print!("{}", emit_output(&root, emit));
    }
    let ok = messages
        .iter()
        .all(|message| message.severity() != Severity::Error);
    if ok {
        info!("{}: ok", path.display());
    }
    Ok(ok)
}

fn emit_output(root: &ModuleRoot, emit: EmitKind) -> String {
    match emit {
        EmitKind::Pretty => PrettyPrinter::print(root),
        EmitKind::Js => JsTranspiler::transpile(root),
    }
}

/// The line-buffered worker mode: every stdin line runs the entire
/// synchronous pipeline and answers with exactly one result line. Malformed
/// input never ends the loop.
fn run_worker(emit: Option<EmitKind>) -> eyre::Result<()> {
    info!("entering worker mode");
    let stdin = io::stdin();
    let stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.wrap_err("could not read from stdin")?;
        let (root, messages) = parse_tolerant(&line);
        let mut out = stdout.lock();
        let first_error = messages
            .iter()
            .find(|message| message.severity() == Severity::Error);
        match first_error {
            Some(error) => writeln!(out, "err {} {}", messages.len(), error)?,
            None => match emit {
                Some(emit) => writeln!(
                    out,
                    "ok {}",
                    emit_output(&root, emit).trim_end().replace('\n', "\\n")
                )?,
                None => writeln!(out, "ok {} declaration(s)", root.declarations.len())?,
            },
        }
        out.flush()?;
    }
    Ok(())
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
