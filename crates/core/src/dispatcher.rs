use std::collections::HashMap;
use std::path::Path;

use leon::Template;

use crate::error::{Error, Result};

/// Launcher script copied onto the `PATH` for every installed bundle.
pub const DISPATCHER_TEMPLATE: &str = include_str!("../assets/dispatcher.sh");

/// Renders the dispatcher for a given storage root.
///
/// The storage root is baked into the script so that bundles installed with
/// a non-default `--storage` can still be found when the dispatcher runs.
/// It lands inside a single-quoted shell string, so it is escaped first.
pub fn render_dispatcher(storage_root: &Path) -> Result<String> {
    let template =
        Template::parse(DISPATCHER_TEMPLATE).map_err(|e| Error::Template(e.to_string()))?;

    let mut values: HashMap<String, String> = HashMap::new();
    values.insert(
        "storage".to_string(),
        escape_single_quoted(&storage_root.display().to_string()),
    );

    template
        .render(&values)
        .map_err(|e| Error::Template(e.to_string()))
}

/// Escapes `value` for use between single quotes in a POSIX shell script.
///
/// ```
/// use groupthink_core::dispatcher::escape_single_quoted;
///
/// assert_eq!(escape_single_quoted("/home/o'brien"), r"/home/o'\''brien");
/// ```
pub fn escape_single_quoted(value: &str) -> String {
    value.replace('\'', r"'\''")
}
