//! Error types for lint checks.

use thiserror::Error;

/// Result type alias for lint module.
pub type Result<T> = std::result::Result<T, LintError>;

#[derive(Error, Debug)]
pub enum LintError {
    #[error("Required command '{command}' not found. {hint}")]
    MissingCommand { command: String, hint: String },

    #[error("One or more lint checks failed")]
    ChecksFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fails with an installation hint when `command --version` cannot run.
pub fn require_command(command: &str, hint: &str) -> Result<()> {
    let available = std::process::Command::new(command)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    if available {
        Ok(())
    } else {
        Err(LintError::MissingCommand {
            command: command.to_string(),
            hint: hint.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_command() {
        let err = require_command("sqla-definitely-not-installed", "install it").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required command 'sqla-definitely-not-installed' not found. install it"
        );
    }
}
