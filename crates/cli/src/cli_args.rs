//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate and turns global flags into configuration overrides.

use clap::{Parser, Subcommand};
use groupthink_core::config::Overrides;

/// Command-line arguments for the groupthink CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use groupthink_cli::cli_args::{Args, Command};
///
/// let args = Args::parse_from(["groupthink", "install", "dcgov", "--alias", "dc"]);
/// assert!(matches!(args.command, Command::Install { .. }));
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "groupthink",
    version,
    about = "Install, update, and manage an organization's command line scripts, \
             as defined at https://github.com/<org>/<org>-cli",
    term_width = 0
)]
pub struct Args {
    /// Directory on your PATH where commands are installed.
    ///
    /// If not provided, defaults to `/usr/local/bin` (`~/bin` on Windows).
    #[arg(long, short = 'd', global = true)]
    pub dest: Option<String>,

    /// Directory where organization repositories are cloned.
    ///
    /// If not provided, defaults to `~/.groupthink`.
    #[arg(long, short = 's', global = true)]
    pub storage: Option<String>,

    /// Path to a YAML settings file.
    ///
    /// If not provided, `~/.groupthink/config.yml` is used when it exists.
    #[arg(long = "config", short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Host that `<org>/<org>-cli` repositories are cloned from.
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Skip asking the host whether a repository exists when a clone fails.
    #[arg(long, global = true, action)]
    pub no_probe: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Provided an organization name, installs that organization's CLI scripts.
    Install {
        /// The organization whose command you want to install
        org: String,

        /// Set a name for this command
        #[arg(long, short = 'a')]
        alias: Option<String>,
    },

    /// Removes an installed command.
    Uninstall {
        /// The command to uninstall
        alias: String,
    },

    /// Checks for updates to installed commands.
    Update {
        /// The command to check. Leave empty to check all commands.
        alias: Option<String>,
    },

    /// Upgrades installed commands.
    Upgrade {
        /// The command to upgrade. Leave empty to upgrade all commands.
        alias: Option<String>,
    },

    /// Lists all installed commands.
    #[command(visible_alias = "installed")]
    List,
}

impl Args {
    /// Global flags that take precedence over the settings file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            storage: self.storage.clone(),
            dest: self.dest.clone(),
            host: self.host.clone(),
            no_probe: self.no_probe,
        }
    }
}
