// ABOUTME: Subprocess invocation with captured output.
// ABOUTME: The single place that spawns external commands; cwd is always explicit.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Trimmed stderr, falling back to stdout when the tool wrote its
    /// complaint there instead.
    pub fn failure_detail(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Run a command to completion in `cwd` and capture its output.
///
/// The working directory is passed to the child process; the caller's own
/// working directory is never changed.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> std::io::Result<CommandOutput> {
    tracing::debug!("exec: {} {} (in {})", program, args.join(" "), cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    Ok(CommandOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let out = run_command("sh", &["-c", "printf hello"], &PathBuf::from("."))
            .await
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "hello");
    }

    #[tokio::test]
    async fn reports_nonzero_exit() {
        let out = run_command("sh", &["-c", "echo oops >&2; exit 3"], &PathBuf::from("."))
            .await
            .unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.failure_detail(), "oops");
    }

    #[tokio::test]
    async fn failure_detail_falls_back_to_stdout() {
        let out = run_command("sh", &["-c", "echo why; exit 1"], &PathBuf::from("."))
            .await
            .unwrap();
        assert_eq!(out.failure_detail(), "why");
    }

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let result = run_command("definitely-not-a-program", &[], &PathBuf::from(".")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn runs_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_command("pwd", &[], dir.path()).await.unwrap();
        let reported = PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
