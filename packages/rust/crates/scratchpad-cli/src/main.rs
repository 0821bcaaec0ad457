//! scratchpad CLI: batch maintenance of reasoning-framework YAML records.
//!
//! Tree passes (`backfill`, `normalize`, `convert`, `markers`) resolve their
//! directory from the argument, then `$SCRATCHPAD_DIR/frameworks`, then
//! `./frameworks`.
//!
//! Logging: set `RUST_LOG=scratchpad_frameworks=debug` (or `warn`, `info`) to
//! override the `--verbose` / `--quiet` defaults. Logs go to stderr.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scratchpad_frameworks::{
    BatchReport, CodexConfig, RewriteConfig, ValidateOptions, backfill_tree, convert_tree,
    mark_tree, normalize_tree, scan_inventory, validate_all, write_docs, yaml_inputs,
};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides; otherwise --verbose => debug, --quiet => warn, else info.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand; `Ok(false)` when some file failed.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Backfill { dir } => {
            let config = CodexConfig::from_env(dir);
            Ok(summarize("backfill", &backfill_tree(&config)?))
        }
        Command::Normalize { dir } => {
            let config = CodexConfig::from_env(dir);
            Ok(summarize("normalize", &normalize_tree(&config)?))
        }
        Command::Convert {
            dir,
            sentinel,
            keep_content,
        } => {
            let config = CodexConfig::from_env(dir);
            let rewrite = RewriteConfig {
                sentinel_tag: sentinel,
                drop_raw_content: !keep_content,
            };
            Ok(summarize("convert", &convert_tree(&config, &rewrite)?))
        }
        Command::Markers { dir } => {
            let config = CodexConfig::from_env(dir);
            Ok(summarize("markers", &mark_tree(&config)?))
        }
        Command::Validate { files, strict } => Ok(validate(&files, strict)),
        Command::Docs { base, out } => {
            let mut config = base.map_or_else(|| CodexConfig::from_env(None), CodexConfig::from_base);
            if let Some(out) = out {
                config = config.with_docs_dir(out);
            }
            let report = write_docs(&config, chrono::Utc::now())
                .with_context(|| format!("generating docs into {}", config.docs_dir.display()))?;
            println!(
                "Documented {} frameworks: {}, {}",
                report.frameworks,
                report.reference.display(),
                report.comparison.display()
            );
            Ok(true)
        }
        Command::Inventory { dir } => {
            let report = scan_inventory(&dir)?;
            println!("{}", report.to_json()?);
            Ok(true)
        }
    }
}

fn summarize(pass: &str, report: &BatchReport) -> bool {
    for path in &report.modified_files {
        println!("Updated {}", path.display());
    }
    for (path, message) in &report.errors {
        eprintln!("[FAIL] {}: {message}", path.display());
    }
    println!(
        "{pass}: {} processed, {} changed, {} skipped, {} errors",
        report.processed,
        report.changed,
        report.skipped,
        report.errors.len()
    );
    !report.has_errors()
}

fn validate(files: &[PathBuf], strict: bool) -> bool {
    if yaml_inputs(files).is_empty() {
        eprintln!("No YAML files provided to parse.");
        return false;
    }

    let options = ValidateOptions {
        strict,
        ..ValidateOptions::default()
    };
    let verdicts = validate_all(files, options);
    let mut ok = true;
    for verdict in &verdicts {
        match &verdict.result {
            Ok(_) => println!("[OK] {}", verdict.path.display()),
            Err(err) => {
                eprintln!("[FAIL] {}: {err}", verdict.path.display());
                ok = false;
            }
        }
    }
    info!(files = verdicts.len(), ok, "validation finished");
    ok
}
