//! Groupthink Core Library
//!
//! This crate provides the core functionality for groupthink, a package
//! manager for Git-hosted organization CLI bundles. Given an organization
//! name, it clones that organization's `<org>-cli` repository into a local
//! storage root and links a dispatcher onto the `PATH` so the organization's
//! scripts can be invoked as a single named command.
//!
//! # Key Features
//!
//! - **Bundle Management**: Install, uninstall, update check, upgrade and list
//! - **Aliasing**: Install an organization's command under another name
//! - **Filesystem as Source of Truth**: Installed bundles are derived from the
//!   storage root on every query, with no manifest to drift out of sync
//! - **Pluggable Collaborators**: Version control and remote probing sit
//!   behind traits so they can be swapped out
//!
//! # Examples
//!
//! Listing installed bundles:
//!
//! ```no_run
//! use groupthink_core::config::{Config, Overrides, Settings};
//! use groupthink_core::manager::BundleManager;
//! use groupthink_core::vcs::GitClient;
//!
//! let config = Config::resolve(&Settings::default(), &Overrides::default());
//! let git = GitClient::new();
//! let manager = BundleManager::new(&config, &git);
//!
//! for name in manager.list_installed()? {
//!     println!("{name}");
//! }
//! # Ok::<(), groupthink_core::error::Error>(())
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod manager;
pub mod probe;
pub mod vcs;
