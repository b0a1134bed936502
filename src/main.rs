use std::io::{self, Write};
use std::{error, fs::File, path::Path, process::ExitCode};

use emu::cpu::processor::Processor;
use emu::program::Program;
use emu::report::TextReporter;
use tracing_subscriber::EnvFilter;

mod config;

use config::RunConfig;

/// Recovered instruction failures already go to stderr through the reporter,
/// so only fatal problems are logged unless `RUST_LOG` asks for more.
const DEFAULT_LOG_FILTER: &str = "error";

fn main() -> ExitCode {
    init_tracing();

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(usage) => {
            println!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    let program = match load_program(&config.source, &mut io::stdout(), &mut io::stderr()) {
        Ok(Some(program)) => program,
        Ok(None) => return ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("cannot write to the console: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut processor = Processor::with_labels(program.labels().clone());
    let mut reporter = TextReporter::new(io::stdout(), io::stderr());
    processor.run(program.instructions(), &mut reporter);

    if let Some(path) = &config.snapshot {
        if let Err(e) = write_snapshot(&processor, path) {
            tracing::error!("cannot write snapshot to {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        tracing::info!("snapshot written to {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Logs go to stderr so the state dumps on stdout stay untouched.
/// Verbosity is controlled by `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the source file. An unreadable file is reported on `err` whatever
/// the log filter, then handled like an empty program: `Ok(None)` means there
/// is nothing to run.
fn load_program<O: Write, E: Write>(
    path: &Path,
    out: &mut O,
    err: &mut E,
) -> io::Result<Option<Program>> {
    let program = match Program::from_file(path) {
        Ok(program) => program,
        Err(e) => {
            tracing::error!("{e}");
            writeln!(err, "{e}")?;
            Program::default()
        }
    };

    if program.is_empty() {
        writeln!(out, "No instructions to execute.")?;
        return Ok(None);
    }

    tracing::info!("loaded {} instructions from {}", program.len(), path.display());
    Ok(Some(program))
}

fn write_snapshot(processor: &Processor, path: &Path) -> Result<(), Box<dyn error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, processor)?;

    Ok(())
}
