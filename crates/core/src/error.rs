use std::path::Path;

use thiserror::Error;

use crate::config::PROGRAM_NAME;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{}` command already installed.", .alias)]
    AlreadyInstalled { alias: String },

    #[error("`{}` command not installed.", .alias)]
    NotInstalled { alias: String },

    #[error("A script is already installed with the name `{}` at `{}`.", .alias, .path)]
    NameCollision {
        alias: String,
        canonical: String,
        path: String,
    },

    #[error("Could not find a repository at {}.", .url)]
    RemoteNotFound { url: String },

    #[error("Could not clone {}: {}", .url, .detail)]
    CloneFailed { url: String, detail: String },

    #[error("`git {}` failed in `{}`: {}", .operation, .path, .detail)]
    VcsOperationFailed {
        operation: String,
        path: String,
        detail: String,
    },

    #[error("Could not {} `{}`: {}", .action, .path, .original)]
    Io {
        action: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error reading settings file at `{}`: {}", .path, .original)]
    Yaml {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error rendering dispatcher template: {}", .0)]
    Template(String),

    #[error("Invalid name: name may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: name may not contain whitespace", .0)]
    NameWithWhitespace(String),

    #[error("Invalid name `{}`: name may not contain a path separator", .0)]
    NameWithSeparator(String),

    #[error("Invalid name `{}`: name is reserved", .0)]
    ReservedName(String),
}

impl Error {
    pub fn already_installed(alias: &str) -> Self {
        Self::AlreadyInstalled {
            alias: alias.to_string(),
        }
    }

    pub fn not_installed(alias: &str) -> Self {
        Self::NotInstalled {
            alias: alias.to_string(),
        }
    }

    pub fn io_error(action: &str, path: &Path, original: std::io::Error) -> Self {
        Self::Io {
            action: action.to_string(),
            path: path.display().to_string(),
            original,
        }
    }

    pub fn vcs_error(operation: &str, path: &Path, detail: impl Into<String>) -> Self {
        Self::VcsOperationFailed {
            operation: operation.to_string(),
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }

    /// The command a user should run next to get out of this state, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::AlreadyInstalled { alias } => Some(format!(
                "You can check for updates with:\n\n  {PROGRAM_NAME} update {alias}"
            )),
            Self::NotInstalled { alias } => Some(format!(
                "You can try to install it with:\n\n  {PROGRAM_NAME} install {alias}"
            )),
            Self::NameCollision { canonical, .. } => Some(format!(
                "You can try to install {canonical}-cli under a different name, with:\n\n  \
                 {PROGRAM_NAME} install {canonical} --alias <alias>"
            )),
            Self::RemoteNotFound { url } | Self::CloneFailed { url, .. } => {
                Some(format!("Please make sure {url} exists."))
            }
            Self::VcsOperationFailed { path, .. } => Some(format!(
                "Inspect the working copy with:\n\n  git -C {path} status"
            )),
            _ => None,
        }
    }
}
