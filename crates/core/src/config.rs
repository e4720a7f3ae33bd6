//! Configuration for groupthink.
//!
//! This module resolves where bundles are stored, where dispatchers are
//! linked, and which host remote repositories are cloned from. Values come
//! from command-line overrides, then the optional settings file, then the
//! built-in defaults below. Shell expansions like `~` are resolved.

use std::path::PathBuf;

use serde::Deserialize;

/// Name of the executable, used in remediation hints.
pub const PROGRAM_NAME: &str = "groupthink";

/// Default directory holding the cloned `<alias>-cli` repositories
const DEFAULT_STORAGE_PATH: &str = "~/.groupthink";
/// Default path of the optional settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.groupthink/config.yml";

/// Default host that `<org>/<org>-cli` repositories are resolved against
pub const DEFAULT_HOST: &str = "https://github.com";

#[cfg(windows)]
const DEFAULT_BIN_PATH: &str = "~/bin";
#[cfg(not(windows))]
const DEFAULT_BIN_PATH: &str = "/usr/local/bin";

/// Contents of the optional YAML settings file.
///
/// Every key is optional; absent keys fall back to the built-in defaults.
///
/// ```yaml
/// storage: ~/.groupthink
/// dest: ~/bin
/// host: https://gitlab.com
/// probe: false
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub storage: Option<String>,
    pub dest: Option<String>,
    pub host: Option<String>,
    pub probe: Option<bool>,
}

/// Values given on the command line, which win over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub storage: Option<String>,
    pub dest: Option<String>,
    pub host: Option<String>,
    pub no_probe: bool,
}

/// Process-wide configuration, built once at start and passed to every
/// bundle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one `<alias>-cli` working copy per bundle.
    pub storage_root: PathBuf,
    /// Directory on the `PATH` holding one dispatcher per bundle.
    pub bin_root: PathBuf,
    /// Base URL that remote repositories are resolved against.
    pub host: String,
    /// Whether to ask the host if a remote exists after a failed clone.
    pub probe_remote: bool,
}

impl Config {
    pub fn new(storage_root: impl Into<PathBuf>, bin_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            bin_root: bin_root.into(),
            host: DEFAULT_HOST.to_string(),
            probe_remote: true,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe_remote: bool) -> Self {
        self.probe_remote = probe_remote;
        self
    }

    /// Merges command-line overrides, the settings file and the defaults.
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> Self {
        let storage = pick(&overrides.storage, &settings.storage, DEFAULT_STORAGE_PATH);
        let dest = pick(&overrides.dest, &settings.dest, DEFAULT_BIN_PATH);
        let host = pick(&overrides.host, &settings.host, DEFAULT_HOST);

        let probe_remote = !overrides.no_probe && settings.probe.unwrap_or(true);

        Self {
            storage_root: expand_path(storage),
            bin_root: expand_path(dest),
            host: host.to_string(),
            probe_remote,
        }
    }

    /// Remote repository for an organization: `{host}/{org}/{org}-cli`.
    pub fn remote_url(&self, canonical_name: &str) -> String {
        format!(
            "{}/{canonical_name}/{canonical_name}-cli",
            self.host.trim_end_matches('/')
        )
    }

    /// Whether the host speaks HTTP, and can therefore be probed.
    pub fn host_is_http(&self) -> bool {
        self.host.starts_with("https://") || self.host.starts_with("http://")
    }
}

fn pick<'a>(flag: &'a Option<String>, setting: &'a Option<String>, default: &'a str) -> &'a str {
    flag.as_deref().or(setting.as_deref()).unwrap_or(default)
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Resolves the settings file path.
///
/// Returns the expanded path and whether it was explicitly requested. A
/// missing file is only an error when it was explicitly requested.
///
/// # Examples
///
/// ```
/// use groupthink_core::config::get_settings_path;
///
/// let (path, explicit) = get_settings_path(&None);
/// assert!(path.ends_with("config.yml"));
/// assert!(!explicit);
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> (String, bool) {
    match settings_path_arg {
        Some(path) => (shellexpand::tilde(path).to_string(), true),
        None => (shellexpand::tilde(DEFAULT_SETTINGS_PATH).to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(&Settings::default(), &Overrides::default());

        assert!(config.storage_root.ends_with(".groupthink"));
        assert!(!config.storage_root.to_string_lossy().starts_with('~'));
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.probe_remote);

        #[cfg(not(windows))]
        assert_eq!(config.bin_root, PathBuf::from("/usr/local/bin"));
        #[cfg(windows)]
        assert!(config.bin_root.ends_with("bin"));
    }

    #[test]
    fn test_settings_override_defaults() {
        let settings = Settings {
            storage: Some("/srv/bundles".to_string()),
            dest: Some("/opt/bin".to_string()),
            host: Some("https://gitlab.com".to_string()),
            probe: Some(false),
        };
        let config = Config::resolve(&settings, &Overrides::default());

        assert_eq!(config.storage_root, PathBuf::from("/srv/bundles"));
        assert_eq!(config.bin_root, PathBuf::from("/opt/bin"));
        assert_eq!(config.host, "https://gitlab.com");
        assert!(!config.probe_remote);
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            storage: Some("/srv/bundles".to_string()),
            dest: Some("/opt/bin".to_string()),
            host: None,
            probe: Some(true),
        };
        let overrides = Overrides {
            storage: Some("/tmp/storage".to_string()),
            dest: Some("~/bin".to_string()),
            host: Some("file:///tmp/remotes".to_string()),
            no_probe: true,
        };
        let config = Config::resolve(&settings, &overrides);

        assert_eq!(config.storage_root, PathBuf::from("/tmp/storage"));
        assert!(config.bin_root.ends_with("bin"));
        assert!(!config.bin_root.to_string_lossy().starts_with('~'));
        assert_eq!(config.host, "file:///tmp/remotes");
        assert!(!config.probe_remote);
    }

    #[test]
    fn test_remote_url_follows_naming_convention() {
        let config = Config::new("/s", "/b");
        assert_eq!(
            config.remote_url("dcgov"),
            "https://github.com/dcgov/dcgov-cli"
        );

        let config = config.with_host("https://gitlab.example.com/");
        assert_eq!(
            config.remote_url("ops"),
            "https://gitlab.example.com/ops/ops-cli"
        );
    }

    #[test]
    fn test_host_is_http() {
        assert!(Config::new("/s", "/b").host_is_http());
        assert!(!Config::new("/s", "/b")
            .with_host("file:///tmp/remotes")
            .host_is_http());
    }

    #[test]
    fn test_get_settings_path() {
        let (path, explicit) = get_settings_path(&Some("/etc/groupthink.yml".to_string()));
        assert_eq!(path, "/etc/groupthink.yml");
        assert!(explicit);

        let (path, explicit) = get_settings_path(&None);
        assert!(!path.starts_with('~'));
        assert!(!explicit);
    }
}
