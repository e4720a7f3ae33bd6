//! User-facing output: one line per outcome, errors with remediation hints.

use std::io::IsTerminal;

use crossterm::style::Stylize;
use groupthink_core::config::PROGRAM_NAME;
use groupthink_core::error::Error;
use itertools::Itertools;

/// Renders the `list` output for a set of installed bundle names, sorted.
pub fn format_installed(installed: &[String]) -> String {
    if installed.is_empty() {
        return format!(
            "You haven't installed any scripts. Install one with:\n\n  {PROGRAM_NAME} install <org>"
        );
    }

    let lines = installed
        .iter()
        .sorted()
        .map(|name| format!("  - {name}"))
        .join("\n");

    format!("You have installed these scripts:\n\n{lines}")
}

/// Renders an error, an optional "did you mean" suggestion, and the hint.
pub fn format_error(error: &Error, suggestion: Option<&str>, colored: bool) -> String {
    let prefix = if colored {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    };

    let mut message = format!("{prefix} {error}");

    if let Some(suggestion) = suggestion {
        message.push_str(&format!("\nDid you mean `{suggestion}`?"));
    }

    if let Some(hint) = error.hint() {
        message.push_str(&format!("\n\n{hint}"));
    }

    message
}

/// Renders an error from an operation over every installed bundle, led by
/// the alias so each line names its bundle.
pub fn format_bundle_error(alias: &str, error: &Error, colored: bool) -> String {
    format!("{alias}: {}", format_error(error, None, colored))
}

pub fn print_error(error: &Error, suggestion: Option<&str>) {
    let colored = std::io::stderr().is_terminal();
    eprintln!("{}", format_error(error, suggestion, colored));
}

pub fn print_bundle_error(alias: &str, error: &Error) {
    let colored = std::io::stderr().is_terminal();
    eprintln!("{}", format_bundle_error(alias, error, colored));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_installed_empty() {
        let output = format_installed(&[]);
        assert!(output.starts_with("You haven't installed any scripts."));
        assert!(output.ends_with("groupthink install <org>"));
    }

    #[test]
    fn test_format_installed_sorted() {
        let installed = vec!["gamma".to_string(), "alpha".to_string(), "beta".to_string()];
        assert_eq!(
            format_installed(&installed),
            "You have installed these scripts:\n\n  - alpha\n  - beta\n  - gamma"
        );
    }

    #[test]
    fn test_format_error_with_hint_and_suggestion() {
        let error = Error::not_installed("dcgo");
        let output = format_error(&error, Some("dcgov"), false);

        assert_eq!(
            output,
            "Error: `dcgo` command not installed.\n\
             Did you mean `dcgov`?\n\n\
             You can try to install it with:\n\n  groupthink install dcgo"
        );
    }

    #[test]
    fn test_format_error_without_hint() {
        let output = format_error(&Error::EmptyName, None, false);
        assert_eq!(output, "Error: Invalid name: name may not be empty");
    }

    #[test]
    fn test_format_error_colored_prefix() {
        let output = format_error(&Error::EmptyName, None, true);
        assert!(output.contains("Error:"));
        assert!(output.ends_with(" Invalid name: name may not be empty"));
    }

    #[test]
    fn test_format_bundle_error_names_bundle() {
        let error = Error::SubProcess(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));

        let alpha = format_bundle_error("alpha", &error, false);
        let beta = format_bundle_error("beta", &error, false);

        assert!(alpha.starts_with("alpha: Error: "));
        assert!(beta.starts_with("beta: Error: "));
        assert_ne!(alpha, beta);
    }
}
