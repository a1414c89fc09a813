//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials and tools are available before
//! starting operations that would otherwise fail midway.

use crate::config::Credentials;
use crate::error::{LekseError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Processing requires the summarization credential.
    Process,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
/// Recoverable concerns (speech engine, YouTube key) are deliberately not
/// checked here; the pipeline degrades around them and `doctor` reports
/// them.
pub fn check(operation: Operation, credentials: &Credentials) -> Result<()> {
    match operation {
        Operation::Process => {
            if credentials.openrouter_api_key.is_none() {
                return Err(LekseError::MissingCredential(
                    "OPENROUTER_API_KEY".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(LekseError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LekseError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(LekseError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_requires_summarization_credential() {
        let missing = Credentials::default();
        assert!(check(Operation::Process, &missing).is_err());

        let present = Credentials {
            openrouter_api_key: Some("sk-or-test".to_string()),
            youtube_api_key: None,
        };
        assert!(check(Operation::Process, &present).is_ok());
    }

    #[test]
    fn test_check_tool_missing() {
        assert!(check_tool("lekse-no-such-tool").is_err());
    }
}
