use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::{debug, warn};

use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, init_with_overrides};

pub fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        let _ = env::set_current_dir(&cwd);
    }
    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    // Build CLI overrides for config precedence
    let cli_overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
    };

    // Initialize configuration (files, then CLI overrides)
    init_with_overrides(&cli_overrides);

    // Initialize logging after config so level/color are applied
    init_logging();

    // One generator drives the whole run; a fixed seed reproduces it
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);

    ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, cleaning up..");
        running_ctrlc.store(false, Ordering::SeqCst);
    })
    .expect("Error creating a Ctrl-C handler");

    // Dispatch to appropriate command
    let exit_code = match args.command {
        Commands::Init => {
            cmds::execute_init()?;
            0
        }
        Commands::Deploy(deploy_args) => {
            cmds::execute_deploy(deploy_args, &cwd, running, &mut rng)?
        }
        Commands::Verify(verify_args) => {
            cmds::execute_verify(verify_args, &cwd)?;
            0
        }
        Commands::Status(status_args) => {
            cmds::execute_status(status_args, &cwd)?;
            0
        }
        Commands::Print {
            command: print_args,
        } => {
            match print_args {
                PrintArgs::Config(args) => cmds::execute_print_config(&args.format)?,
                PrintArgs::Ledger(args) => cmds::execute_print_ledger(&args.format, &cwd)?,
            }
            0
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
