//! Bundle state transitions: install, uninstall, update check, upgrade and
//! listing.
//!
//! There is no manifest. Whether a bundle is installed is decided by
//! [`BundleManager::is_installed`], which looks for a `<alias>-cli` directory
//! in the storage root every time it is asked.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::{debug, info};

use crate::config::Config;
use crate::dispatcher::render_dispatcher;
use crate::error::{Error, Result};
use crate::file_handling::{
    ensure_dir, list_bundle_names, remove_dir_if_present, remove_file_if_present, validate_name,
    write_executable, BUNDLE_DIR_SUFFIX,
};
use crate::probe::{ProbeOutcome, RemoteProbe};
use crate::vcs::{FetchStatus, PullStatus, VersionControl};

/// Where an organization's bundle lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub canonical_name: String,
    pub alias: String,
    pub repo_path: PathBuf,
    pub dispatcher_path: PathBuf,
}

impl Bundle {
    pub fn new(config: &Config, canonical_name: &str, alias: &str) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            alias: alias.to_string(),
            repo_path: config
                .storage_root
                .join(format!("{alias}{BUNDLE_DIR_SUFFIX}")),
            dispatcher_path: config.bin_root.join(alias),
        }
    }

    /// An installed bundle only remembers its alias.
    pub fn installed(config: &Config, alias: &str) -> Self {
        Self::new(config, alias, alias)
    }
}

/// Successful result of a bundle operation, one user-facing line each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed { canonical: String },
    InstalledAs { canonical: String, alias: String },
    Uninstalled { alias: String },
    UpdatesAvailable { alias: String },
    UpToDate { alias: String },
    Upgraded { alias: String },
}

impl Display for Outcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Installed { canonical } => {
                write!(formatter, "Installed {canonical} command.")
            }
            Outcome::InstalledAs { canonical, alias } => write!(
                formatter,
                "Installed {canonical} command under the alias {alias}."
            ),
            Outcome::Uninstalled { alias } => write!(formatter, "Removed {alias} command."),
            Outcome::UpdatesAvailable { alias } => write!(
                formatter,
                "There are updates to the {alias} command. Use the upgrade subcommand to add them."
            ),
            Outcome::UpToDate { alias } => {
                write!(formatter, "Your {alias} command is already up to date.")
            }
            Outcome::Upgraded { alias } => write!(formatter, "Upgraded {alias} command."),
        }
    }
}

/// Result for one bundle when an operation runs over every installed bundle.
#[derive(Debug)]
pub struct BundleReport {
    pub alias: String,
    pub result: Result<Outcome>,
}

pub struct BundleManager<'a> {
    config: &'a Config,
    vcs: &'a dyn VersionControl,
    probe: Option<&'a dyn RemoteProbe>,
}

impl<'a> BundleManager<'a> {
    pub fn new(config: &'a Config, vcs: &'a dyn VersionControl) -> Self {
        Self {
            config,
            vcs,
            probe: None,
        }
    }

    #[must_use]
    pub fn with_probe(mut self, probe: &'a dyn RemoteProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Names of installed bundles, in directory enumeration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage root exists but cannot be read.
    pub fn list_installed(&self) -> Result<Vec<String>> {
        list_bundle_names(&self.config.storage_root)
    }

    /// # Errors
    ///
    /// Returns an error if the storage root exists but cannot be read.
    pub fn is_installed(&self, alias: &str) -> Result<bool> {
        Ok(self.list_installed()?.iter().any(|name| name == alias))
    }

    /// Clones `{host}/{canonical}/{canonical}-cli` and links a dispatcher
    /// for it under `alias`, which defaults to the canonical name.
    ///
    /// A failure after the clone leaves the working copy in place; it can be
    /// cleaned up with [`BundleManager::uninstall`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either name is invalid
    /// - A bundle is already installed under `alias`
    /// - An unrelated file already sits at the dispatcher path
    /// - The remote does not exist or cannot be cloned; a configured probe
    ///   is only asked after a failed clone, to name a missing remote
    /// - The storage or bin root, or the dispatcher, cannot be written
    pub fn install(&self, canonical_name: &str, alias: Option<&str>) -> Result<Outcome> {
        validate_name(canonical_name)?;
        let alias = alias.unwrap_or(canonical_name);
        validate_name(alias)?;

        if self.is_installed(alias)? {
            return Err(Error::already_installed(alias));
        }

        let bundle = Bundle::new(self.config, canonical_name, alias);

        if bundle.dispatcher_path.symlink_metadata().is_ok() {
            return Err(Error::NameCollision {
                alias: alias.to_string(),
                canonical: canonical_name.to_string(),
                path: bundle.dispatcher_path.display().to_string(),
            });
        }

        ensure_dir(&self.config.storage_root)?;
        ensure_dir(&self.config.bin_root)?;

        let url = self.config.remote_url(canonical_name);
        self.vcs
            .clone_repo(&url, &bundle.repo_path)
            .map_err(|e| self.explain_clone_failure(&url, e))?;

        let dispatcher = render_dispatcher(&self.config.storage_root)?;
        write_executable(&bundle.dispatcher_path, &dispatcher)?;

        info!(
            "Installed `{}` as `{}` in `{}`",
            canonical_name,
            alias,
            bundle.repo_path.display()
        );

        if alias == canonical_name {
            Ok(Outcome::Installed {
                canonical: canonical_name.to_string(),
            })
        } else {
            Ok(Outcome::InstalledAs {
                canonical: canonical_name.to_string(),
                alias: alias.to_string(),
            })
        }
    }

    /// Narrows a generic clone failure to `RemoteNotFound` when the probe
    /// reports the remote as missing. The probe never overrides a clone.
    fn explain_clone_failure(&self, url: &str, error: Error) -> Error {
        if !matches!(error, Error::CloneFailed { .. })
            || !self.config.probe_remote
            || !self.config.host_is_http()
        {
            return error;
        }

        let Some(probe) = self.probe else {
            return error;
        };

        match probe.probe(url) {
            ProbeOutcome::Missing => Error::RemoteNotFound {
                url: url.to_string(),
            },
            outcome => {
                debug!("Probe of {url}: {outcome:?}");
                error
            }
        }
    }

    /// Removes the working copy and the dispatcher for `alias`. Either piece
    /// being absent already is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, no bundle is installed under
    /// it, or a piece exists but cannot be removed.
    pub fn uninstall(&self, alias: &str) -> Result<Outcome> {
        let bundle = self.require_installed(alias)?;

        remove_dir_if_present(&bundle.repo_path)?;
        remove_file_if_present(&bundle.dispatcher_path)?;

        info!("Uninstalled `{alias}`");
        Ok(Outcome::Uninstalled {
            alias: alias.to_string(),
        })
    }

    /// Fetches remote changes for `alias` and reports whether any are waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is not installed or the fetch fails.
    pub fn check_update(&self, alias: &str) -> Result<Outcome> {
        let bundle = self.require_installed(alias)?;
        let alias = alias.to_string();

        Ok(match self.vcs.fetch(&bundle.repo_path)? {
            FetchStatus::UpdatesAvailable => Outcome::UpdatesAvailable { alias },
            FetchStatus::UpToDate => Outcome::UpToDate { alias },
        })
    }

    /// Fast-forwards the working copy for `alias` to its upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is not installed or the pull fails.
    pub fn upgrade(&self, alias: &str) -> Result<Outcome> {
        let bundle = self.require_installed(alias)?;
        let alias = alias.to_string();

        Ok(match self.vcs.pull(&bundle.repo_path)? {
            PullStatus::Upgraded => Outcome::Upgraded { alias },
            PullStatus::UpToDate => Outcome::UpToDate { alias },
        })
    }

    /// Runs [`BundleManager::check_update`] for every installed bundle.
    ///
    /// # Errors
    ///
    /// Only fails if the installed bundles cannot be listed; per-bundle
    /// failures are reported in the returned sequence.
    pub fn check_update_all(&self) -> Result<Vec<BundleReport>> {
        self.for_each_installed(|alias| self.check_update(alias))
    }

    /// Runs [`BundleManager::upgrade`] for every installed bundle.
    ///
    /// # Errors
    ///
    /// Only fails if the installed bundles cannot be listed; per-bundle
    /// failures are reported in the returned sequence.
    pub fn upgrade_all(&self) -> Result<Vec<BundleReport>> {
        self.for_each_installed(|alias| self.upgrade(alias))
    }

    fn for_each_installed<F>(&self, operation: F) -> Result<Vec<BundleReport>>
    where
        F: Fn(&str) -> Result<Outcome>,
    {
        let reports = self
            .list_installed()?
            .into_iter()
            .map(|alias| {
                let result = operation(&alias);
                if let Err(e) = &result {
                    debug!("`{alias}` failed: {e}");
                }
                BundleReport { alias, result }
            })
            .collect();

        Ok(reports)
    }

    fn require_installed(&self, alias: &str) -> Result<Bundle> {
        validate_name(alias)?;

        if !self.is_installed(alias)? {
            return Err(Error::not_installed(alias));
        }

        Ok(Bundle::installed(self.config, alias))
    }
}
