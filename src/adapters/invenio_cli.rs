use crate::domain::model::CommandOutput;
use crate::domain::ports::{ConfigProvider, InvenioCli};
use crate::utils::error::{OpsError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs `invenio` subcommands as child processes. The child inherits the
/// caller's environment so `INVENIO_*` settings of the instance apply.
#[derive(Debug, Clone)]
pub struct ProcessInvenioCli {
    prefix: Vec<String>,
}

impl ProcessInvenioCli {
    pub fn new(prefix: Vec<String>) -> Result<Self> {
        if prefix.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(OpsError::ConfigValidationError {
                field: "invenio.command".to_string(),
                message: "command prefix must name a program".to_string(),
            });
        }
        tracing::info!("Invenio CLI runner initialized ({})", prefix.join(" "));
        Ok(Self { prefix })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.invenio_command().to_vec())
    }

    /// Command line for logs, with the `--password` value masked.
    pub fn display_command(&self, args: &[&str]) -> String {
        let mut parts: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        let mut mask_next = false;
        for arg in args {
            if mask_next {
                parts.push("********");
                mask_next = false;
                continue;
            }
            mask_next = *arg == "--password";
            parts.push(*arg);
        }
        parts.join(" ")
    }
}

#[async_trait]
impl InvenioCli for ProcessInvenioCli {
    async fn run(&self, args: &[&str], ignore_errors: bool) -> Result<CommandOutput> {
        let command_line = self.display_command(args);
        tracing::debug!("Running command: {}", command_line);

        let output = Command::new(&self.prefix[0])
            .args(&self.prefix[1..])
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            tracing::debug!("Command succeeded: {}", command_line);
            return Ok(CommandOutput::ok(stdout));
        }

        if !ignore_errors {
            tracing::error!(
                "Command failed: {} (return code {:?})",
                command_line,
                output.status.code()
            );
            tracing::error!("Error output: {}", stderr);
            return Err(OpsError::CommandError {
                command: command_line,
                code: output.status.code(),
                stderr,
            });
        }

        tracing::warn!("Command failed: {}", command_line);
        tracing::warn!("Error output: {}", stderr);
        Ok(CommandOutput::failed(stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(prefix: &[&str]) -> ProcessInvenioCli {
        ProcessInvenioCli::new(prefix.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn empty_prefix_is_rejected() {
        assert!(ProcessInvenioCli::new(vec![]).is_err());
        assert!(ProcessInvenioCli::new(vec![" ".to_string()]).is_err());
    }

    #[test]
    fn password_is_masked_in_display() {
        let cli = runner(&["pipenv", "run", "invenio"]);
        let shown = cli.display_command(&[
            "users",
            "create",
            "curator@turath-project.com",
            "--password",
            "s3cret!",
            "--active",
        ]);
        assert_eq!(
            shown,
            "pipenv run invenio users create curator@turath-project.com --password ******** --active"
        );
        assert!(!shown.contains("s3cret!"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_on_success() {
        let cli = runner(&["echo"]);
        let out = cli.run(&["roles", "list"], false).await.unwrap();
        assert!(out.success);
        assert_eq!(out.output, "roles list");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_is_tolerated_or_raised() {
        let cli = runner(&["sh", "-c", "echo 'Role already exists' >&2; exit 3"]);

        let tolerated = cli.run(&[], true).await.unwrap();
        assert!(!tolerated.success);
        assert_eq!(tolerated.output, "Role already exists");

        match cli.run(&[], false).await {
            Err(OpsError::CommandError { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "Role already exists");
            }
            other => panic!("expected command error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let cli = runner(&["definitely-not-an-installed-invenio-binary"]);
        let err = cli.run(&["users", "list"], true).await.unwrap_err();
        assert!(matches!(err, OpsError::IoError(_)));
    }
}
