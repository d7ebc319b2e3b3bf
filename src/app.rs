//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the interrupt handler,
//! validates the roots, runs the walk and prints the summary.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use photo_copier::cli::Args;
use photo_copier::fs_ops::{Confirm, ConsolePrompt, NeverOverwrite, Walker};
use photo_copier::output as out;
use photo_copier::{default_config_path, load_config, validate_and_normalize, Config, CopierError};

use crate::logging::init_tracing;

/// Exit status used when the process is interrupted.
const INTERRUPTED_EXIT: i32 = 130;

fn print_config_location() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("photo_copier config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info(
                    "No config file there yet. Example:\n\n<config>\n  <source_root>/path/to/camera-dump</source_root>\n  <destination_root>/path/to/archive</destination_root>\n  <timezone>utc</timezone>\n</config>\n",
                );
            }
        }
        None => out::print_error("Could not determine a config path (no config dir or HOME)."),
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // XML first, CLI wins.
    let mut cfg = match load_config() {
        Ok(Some((_, cfg))) => cfg,
        Ok(None) => Config::default(),
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return Err(e);
        }
    };
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // There is no in-walk cancellation: flush logs and leave.
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; exiting.");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            std::process::exit(INTERRUPTED_EXIT);
        })?;
    }

    debug!(?args, "starting photo_copier");

    let result = (|| -> Result<()> {
        if let Err(e) = validate_and_normalize(&mut cfg) {
            match e.downcast_ref::<CopierError>() {
                Some(ce) => error!(code = ce.code(), kind = ce.kind(), error = %ce, "Invalid roots"),
                None => error!(error = %e, "Invalid roots"),
            }
            return Err(e);
        }

        out::print_user(&format!(
            "Copying files from {} -> {}",
            cfg.source_root.display(),
            cfg.destination_root.display()
        ));

        let confirm: Box<dyn Confirm> = if args.no_clobber {
            Box::new(NeverOverwrite)
        } else {
            Box::new(ConsolePrompt)
        };
        let mut walker = Walker::new(confirm, cfg.walk_options());
        let summary = walker.walk_summary(&cfg.source_root, &cfg.destination_root);

        out::print_success(&format!(
            "Copied {} file(s) ({} skipped, {} failed, {} unreadable)",
            summary.copied, summary.skipped, summary.failed, summary.visit_errors
        ));
        Ok(())
    })();

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}
