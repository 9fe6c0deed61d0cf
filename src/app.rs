//! Application orchestrator.
//! Merges config, initializes logging, installs the signal handler, validates
//! paths, and drives the extraction run.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use crate::cli::Args;
use crate::config::{self, Config, SOURCE_BASE_DEFAULT};
use crate::errors::GatherError;
use crate::extract;
use crate::fingerprint::Algorithm;
use crate::logging::init_tracing;
use crate::output as out;
use crate::shutdown;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("GATHER_CONFIG") {
            out::print_info(&format!("Using GATHER_CONFIG (explicit):\n  {}\n", cfg_env));
            out::print_info("To override, unset GATHER_CONFIG or set it to another file.");
            return Ok(());
        }
        match config::default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default gather config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. A template is created on the first run.",
                    );
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    let cfg = build_config(&args)?;

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file then stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .context("failed to install signal handler")?;
    }

    if let Some(p) = args.prefix_length
        && p < 0
    {
        warn!(
            requested = p,
            effective = p.unsigned_abs(),
            "negative prefix length treated as its absolute value"
        );
    }

    debug!("Starting gather: {:?}", args);

    let result = (|| -> Result<extract::RunStats> {
        cfg.validate()?;
        extract::run_extract(&cfg)
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    match result {
        Ok(stats) => {
            if cfg.dry_run {
                out::print_info("Dry-run: no files were copied or moved.");
            }
            out::print_user(&format!(
                "Processed {} file(s) into '{}'",
                stats.processed,
                cfg.target_dir.display()
            ));
            if stats.failed > 0 {
                out::print_warn(&format!(
                    "{} file(s) failed and were skipped; see the log for details",
                    stats.failed
                ));
            }
            Ok(())
        }
        Err(e) => {
            if let Some(ge) = e.downcast_ref::<GatherError>() {
                error!(code = ge.code(), error = %ge, "run aborted");
            } else {
                error!(error = %e, "run aborted");
            }
            out::print_error(&format!("{e:#}"));
            Err(e)
        }
    }
}

/// Build the effective Config: built-in defaults, then the XML config file,
/// then CLI flags (CLI wins). Fatal configuration errors surface here, before
/// any file is processed.
fn build_config(args: &Args) -> Result<Config> {
    let settings = config::load_settings().unwrap_or_default();

    let target_dir = args
        .target_dir
        .clone()
        .ok_or_else(|| anyhow::anyhow!("a TARGET_DIR is required"))?;
    let extension = args
        .extension
        .clone()
        .ok_or_else(|| anyhow::anyhow!("an extension to match is required (-E/--extension)"))?;
    let source_dir = settings
        .source_base
        .clone()
        .unwrap_or_else(|| PathBuf::from(SOURCE_BASE_DEFAULT));

    let mut cfg = Config::new(source_dir, target_dir, extension);

    if let Some(a) = settings.algorithm {
        cfg.algorithm = a;
    }
    if let Some(p) = settings.prefix_length {
        cfg.prefix_length = p.unsigned_abs();
    }
    if let Some(c) = settings.case_sensitive {
        cfg.case_sensitive = c;
    }
    if let Some(l) = settings.log_level {
        cfg.log_level = l;
    }
    cfg.log_file = settings.log_file;

    // Algorithm names are validated once here: every file in the run would
    // fail identically, so an unknown name is a configuration error.
    if let Some(name) = args.algorithm.as_deref() {
        cfg.algorithm = Algorithm::parse(name)?;
    }

    args.apply_overrides(&mut cfg);
    Ok(cfg)
}
