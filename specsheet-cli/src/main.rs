mod cli;
mod error;
mod ops;
mod paths;
mod render;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use specsheet_lib::document::{SpecDocument, sample_document};
use specsheet_lib::id::SequentialIds;
use specsheet_lib::{TableConfig, TableEditor};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::ops::LogHooks;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to the cache directory. Problems are reported on stderr and the run
/// continues without a log file.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let Some(dir) = paths::cache_dir() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    let path = match paths::rotate_logs(&dir, paths::KEPT_RUN_LOGS) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Warning: cannot prepare log directory {}: {}", dir.display(), e);
            return;
        }
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("Warning: logger already initialised: {}", e);
    }
}

fn load_config(cli: &Cli) -> Result<TableConfig, CliError> {
    if let Some(path) = &cli.config {
        return Ok(TableConfig::load(path)?);
    }
    match paths::config_file() {
        Some(path) if path.exists() => {
            debug!("Using config {}", path.display());
            Ok(TableConfig::load(&path)?)
        }
        _ => Ok(TableConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Show { doc } => {
            let document = match doc {
                Some(path) => SpecDocument::load(path)?,
                None => sample_document(),
            };
            let name = document.document_name.clone();
            let editor = TableEditor::from_document(document, SequentialIds::new(), LogHooks, config)?;
            print!("{}", render::render(&name, editor.model()));
        }
        Command::Sample { out } => {
            sample_document().save(&out)?;
            println!("Wrote {}", out.display());
        }
        Command::Apply { doc, out, ops } => {
            let document = SpecDocument::load(&doc)?;
            let name = document.document_name.clone();
            let mut editor = TableEditor::from_document(document, SequentialIds::new(), LogHooks, config)?;
            for op in &ops {
                debug!("Applying {:?}", op);
                op.apply(&mut editor)?;
            }
            info!("Applied {} operations to '{}'", ops.len(), name);

            if let Some(out) = out {
                SpecDocument::from_model(name.as_str(), editor.model()).save(&out)?;
            }
            print!("{}", render::render(&name, editor.model()));
        }
    }
    Ok(())
}
