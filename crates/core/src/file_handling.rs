//! Filesystem handling for groupthink.
//!
//! The storage root is the only record of what is installed: a bundle exists
//! when a `<alias>-cli` directory exists under it. This module enumerates
//! those directories, validates names before they are turned into paths, and
//! provides the create/remove/write helpers the bundle manager relies on.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::config::Settings;
use crate::error::Error::{EmptyName, NameWithSeparator, NameWithWhitespace, ReservedName};
use crate::error::{Error, Result};

/// Suffix carried by every bundle directory in the storage root.
pub const BUNDLE_DIR_SUFFIX: &str = "-cli";

/// Checks that a canonical name or alias is safe to use as a path component.
///
/// # Errors
///
/// Returns an error if the name is empty, contains whitespace or a path
/// separator, is `.` or `..`, or starts with `-`.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(NameWithWhitespace(name.to_string()));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(NameWithSeparator(name.to_string()));
    }

    if name == "." || name == ".." || name.starts_with('-') {
        return Err(ReservedName(name.to_string()));
    }

    Ok(())
}

/// Returns the bundle name for a storage directory name, if it is one.
///
/// ```
/// use groupthink_core::file_handling::bundle_name_from_dir;
///
/// assert_eq!(bundle_name_from_dir("dcgov-cli"), Some("dcgov"));
/// assert_eq!(bundle_name_from_dir("-cli"), None);
/// assert_eq!(bundle_name_from_dir("notes"), None);
/// ```
pub fn bundle_name_from_dir(dir_name: &str) -> Option<&str> {
    dir_name
        .strip_suffix(BUNDLE_DIR_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Lists the names of bundle directories directly under `storage_root`,
/// in directory enumeration order.
///
/// A storage root that does not exist yet holds no bundles.
///
/// # Errors
///
/// Returns an error if the storage root exists but cannot be read.
pub fn list_bundle_names(storage_root: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(storage_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io_error("read", storage_root, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_error("read", storage_root, e))?;

        if !entry.path().is_dir() {
            continue;
        }

        let dir_name = entry.file_name();
        if let Some(name) = dir_name.to_str().and_then(bundle_name_from_dir) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Creates a directory and all of its parents.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io_error("create", path, e))
}

/// Recursively removes a directory. Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error for any failure other than the directory being absent.
pub fn remove_dir_if_present(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("`{}` already absent", path.display());
            Ok(false)
        }
        Err(e) => Err(Error::io_error("remove", path, e)),
    }
}

/// Removes a file. Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error for any failure other than the file being absent.
pub fn remove_file_if_present(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("`{}` already absent", path.display());
            Ok(false)
        }
        Err(e) => Err(Error::io_error("remove", path, e)),
    }
}

/// Writes an executable script, replacing whatever was at `path`.
///
/// The old file is removed first rather than renamed over, so the write also
/// works when the source and destination live on different devices.
///
/// # Errors
///
/// Returns an error if the old file cannot be removed, or the new file cannot
/// be written or made executable.
pub fn write_executable(path: &Path, contents: &str) -> Result<()> {
    remove_file_if_present(path)?;
    fs::write(path, contents).map_err(|e| Error::io_error("write", path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| Error::io_error("set permissions on", path, e))?;
    }

    Ok(())
}

/// Loads the YAML settings file.
///
/// A missing file yields the default settings unless `required` is set.
///
/// # Errors
///
/// Returns an error if:
/// - The file is required but does not exist
/// - The file exists but cannot be read
/// - The YAML is malformed or contains unknown keys
pub fn get_settings(settings_path: &str, required: bool) -> Result<Settings> {
    let path = Path::new(settings_path);

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            debug!("No settings file at `{settings_path}`, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => return Err(Error::io_error("read", path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| Error::Yaml {
        path: settings_path.to_string(),
        original: e,
    })
}
