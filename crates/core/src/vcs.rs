//! Version control client used to clone, fetch and pull bundle repositories.
//!
//! Outcomes are judged from exit status and from comparing revisions rather
//! than from the wording of `git` output. Diagnostic text is only used to pick
//! the most specific error for a failed clone.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::execution::{capture_command, CommandOutput};

/// Result of checking a working copy against its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    UpdatesAvailable,
    UpToDate,
}

/// Result of fast-forwarding a working copy to its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullStatus {
    Upgraded,
    UpToDate,
}

pub trait VersionControl {
    /// Clones `url` into `destination`, which must not exist yet.
    fn clone_repo(&self, url: &str, destination: &Path) -> Result<()>;

    /// Downloads remote changes without applying them.
    fn fetch(&self, repo: &Path) -> Result<FetchStatus>;

    /// Applies remote changes with a fast-forward merge.
    fn pull(&self, repo: &Path) -> Result<PullStatus>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitClient {
    program: String,
}

impl Default for GitClient {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn git(&self, repo: Option<&Path>, args: &[&str]) -> Result<CommandOutput> {
        let mut command = Command::new(&self.program);
        if let Some(repo) = repo {
            command.arg("-C").arg(repo);
        }
        command.args(args);

        // Never block on a credential prompt, and keep diagnostics in English.
        let mut environment = HashMap::new();
        environment.insert("GIT_TERMINAL_PROMPT".to_string(), "0".to_string());
        environment.insert("LC_ALL".to_string(), "C".to_string());

        capture_command(command, Some(environment))
    }

    fn run_in(&self, repo: &Path, operation: &str, args: &[&str]) -> Result<String> {
        let output = self.git(Some(repo), args)?;
        if output.success {
            Ok(output.stdout)
        } else {
            Err(Error::vcs_error(
                operation,
                repo,
                failure_detail(&output.stderr),
            ))
        }
    }

    fn head(&self, repo: &Path) -> Result<String> {
        let head = self.run_in(repo, "rev-parse", &["rev-parse", "HEAD"])?;
        Ok(head.trim().to_string())
    }
}

impl VersionControl for GitClient {
    fn clone_repo(&self, url: &str, destination: &Path) -> Result<()> {
        info!("Cloning {url} into `{}`", destination.display());

        let destination = destination.to_string_lossy().into_owned();
        let output = self.git(None, &["clone", "--quiet", url, destination.as_str()])?;

        if output.success {
            return Ok(());
        }

        let detail = failure_detail(&output.stderr);
        debug!("Clone of {url} failed: {detail}");

        if reports_missing_remote(&detail) {
            Err(Error::RemoteNotFound {
                url: url.to_string(),
            })
        } else {
            Err(Error::CloneFailed {
                url: url.to_string(),
                detail,
            })
        }
    }

    fn fetch(&self, repo: &Path) -> Result<FetchStatus> {
        self.run_in(repo, "fetch", &["fetch", "--quiet"])?;

        let behind = self.run_in(
            repo,
            "rev-list",
            &["rev-list", "--count", "HEAD..@{upstream}"],
        )?;
        let behind = behind.trim();
        let behind: u64 = behind.parse().map_err(|_| {
            Error::vcs_error("rev-list", repo, format!("unexpected output `{behind}`"))
        })?;

        debug!("`{}` is {behind} commit(s) behind upstream", repo.display());

        if behind > 0 {
            Ok(FetchStatus::UpdatesAvailable)
        } else {
            Ok(FetchStatus::UpToDate)
        }
    }

    fn pull(&self, repo: &Path) -> Result<PullStatus> {
        let before = self.head(repo)?;
        self.run_in(repo, "pull", &["pull", "--ff-only", "--quiet"])?;
        let after = self.head(repo)?;

        if before == after {
            Ok(PullStatus::UpToDate)
        } else {
            info!("`{}` moved from {before} to {after}", repo.display());
            Ok(PullStatus::Upgraded)
        }
    }
}

/// The first `fatal:` diagnostic in `git` error output, without its marker.
pub fn fatal_diagnostic(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .find_map(|line| line.trim().strip_prefix("fatal:"))
        .map(str::trim)
}

fn failure_detail(stderr: &str) -> String {
    fatal_diagnostic(stderr)
        .or_else(|| stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("no diagnostic output")
        .to_string()
}

/// Whether a clone diagnostic means the remote repository does not exist.
///
/// Hosts that hide private repositories answer a missing one with an
/// authentication challenge, which fails immediately with prompts disabled.
pub fn reports_missing_remote(diagnostic: &str) -> bool {
    let diagnostic = diagnostic.to_lowercase();
    let repository_not_found = diagnostic
        .strip_prefix("repository '")
        .is_some_and(|rest| rest.ends_with("' not found"));

    repository_not_found
        || [
            "does not appear to be a git repository",
            "could not read username",
        ]
        .iter()
        .any(|marker| diagnostic.contains(marker))
}
