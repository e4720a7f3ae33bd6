//! Groupthink CLI Library
//!
//! This crate provides the command-line interface for groupthink. It parses
//! arguments, builds the configuration once, hands it to the bundle manager
//! and turns every outcome into exactly one line of output.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`output`]: Rendering of outcomes, listings and errors
//! - [`suggest`]: "Did you mean" suggestions for mistyped names
//!
//! # Examples
//!
//! ```bash
//! # Install an organization's scripts as a command
//! groupthink install dcgov
//!
//! # Install under another name
//! groupthink install sample-org --alias sample
//!
//! # Check every installed command for updates, then apply them
//! groupthink update
//! groupthink upgrade
//!
//! # Remove a command
//! groupthink uninstall sample
//! ```

use std::process::ExitCode;

use groupthink_core::config::{self, Config};
use groupthink_core::error::{Error, Result};
use groupthink_core::file_handling;
use groupthink_core::manager::{BundleManager, BundleReport, Outcome};
use groupthink_core::probe::HttpProbe;
use groupthink_core::vcs::GitClient;
use log::debug;

use crate::cli_args::{Args, Command};

pub mod cli_args;
pub mod output;
pub mod suggest;

/// Builds the configuration from the settings file and global flags.
///
/// # Errors
///
/// Returns an error if an explicitly requested settings file is missing, or
/// if the settings file cannot be read or parsed.
pub fn load_config(args: &Args) -> Result<Config> {
    let (settings_path, explicit) = config::get_settings_path(&args.config_path);
    debug!("Settings path: `{}`", settings_path);

    let settings = file_handling::get_settings(&settings_path, explicit)?;
    let config = Config::resolve(&settings, &args.overrides());
    debug!("Resolved configuration: {:?}", config);

    Ok(config)
}

/// Runs the parsed command, printing its outcome. Returns whether every
/// operation succeeded.
///
/// # Errors
///
/// Returns an error for failures that stop the whole run, such as an
/// unreadable settings file or storage root. Failures of individual bundle
/// operations are printed and reflected in the returned flag instead.
pub fn execute(args: &Args) -> Result<bool> {
    let config = load_config(args)?;
    let git = GitClient::new();
    let manager = BundleManager::new(&config, &git);

    let succeeded = match &args.command {
        Command::Install { org, alias } => {
            let probe = HttpProbe::new();
            let manager = manager.with_probe(&probe);
            report(&manager, manager.install(org, alias.as_deref()))
        }
        Command::Uninstall { alias } => report(&manager, manager.uninstall(alias)),
        Command::Update { alias: Some(alias) } => report(&manager, manager.check_update(alias)),
        Command::Update { alias: None } => report_all(manager.check_update_all()?),
        Command::Upgrade { alias: Some(alias) } => report(&manager, manager.upgrade(alias)),
        Command::Upgrade { alias: None } => report_all(manager.upgrade_all()?),
        Command::List => {
            println!("{}", output::format_installed(&manager.list_installed()?));
            true
        }
    };

    Ok(succeeded)
}

fn report(manager: &BundleManager<'_>, result: Result<Outcome>) -> bool {
    match result {
        Ok(outcome) => {
            println!("{outcome}");
            true
        }
        Err(e) => {
            let installed = manager.list_installed().unwrap_or_default();
            let suggestion = match &e {
                Error::NotInstalled { alias } => suggest::closest_match(alias, &installed),
                _ => None,
            };
            output::print_error(&e, suggestion);
            false
        }
    }
}

fn report_all(reports: Vec<BundleReport>) -> bool {
    if reports.is_empty() {
        println!("{}", output::format_installed(&[]));
        return true;
    }

    let mut succeeded = true;
    for BundleReport { alias, result } in reports {
        debug!("Reporting on `{alias}`");
        match result {
            Ok(outcome) => println!("{outcome}"),
            Err(e) => {
                output::print_bundle_error(&alias, &e);
                succeeded = false;
            }
        }
    }

    succeeded
}

/// Runs the parsed command and maps the result to the process exit code:
/// 0 when everything succeeded, 1 otherwise.
pub fn run(args: &Args) -> ExitCode {
    match execute(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::print_error(&e, None);
            ExitCode::FAILURE
        }
    }
}
