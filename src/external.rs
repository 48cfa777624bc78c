//! The external icon generator.
//!
//! The generator turns one PNG into every platform's icon formats and
//! overwrites the whole icon tree while doing so. It is only ever invoked
//! through [`IconGenerator`], one call at a time.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Something that expands a single PNG into platform icon assets.
pub trait IconGenerator {
    /// Generates all icon assets from `icon`.
    fn generate(&self, icon: &Path) -> Result<()>;
}

/// Runs the Tauri CLI's `icon` command.
#[derive(Debug, Clone)]
pub struct TauriIconCli {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl TauriIconCli {
    /// `npx tauri icon <png>`, run from the project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_command(project_root, "npx", ["tauri", "icon"])
    }

    /// Uses a custom program; the PNG path is appended after `args`.
    pub fn with_command<I, S>(
        project_root: impl Into<PathBuf>,
        program: impl Into<String>,
        args: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: project_root.into(),
        }
    }

    fn describe(&self, icon: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(icon.display().to_string());
        parts.join(" ")
    }
}

impl IconGenerator for TauriIconCli {
    fn generate(&self, icon: &Path) -> Result<()> {
        let command = self.describe(icon);
        tracing::info!(event = "icon_cli", command = %command, cwd = %self.working_dir.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(icon)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| Error::ToolLaunch {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(event = "icon_cli_stdout", output = %stdout.trim());
        }

        if !output.status.success() {
            return Err(Error::ExternalTool {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_description_appends_icon() {
        let cli = TauriIconCli::new("/project");
        assert_eq!(
            cli.describe(Path::new("/tmp/macos.png")),
            "npx tauri icon /tmp/macos.png"
        );
    }

    #[test]
    fn launch_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cli = TauriIconCli::with_command(
            dir.path(),
            "iconsmith-no-such-program",
            Vec::<String>::new(),
        );
        let err = cli.generate(Path::new("icon.png")).unwrap_err();
        assert!(matches!(err, Error::ToolLaunch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cli =
            TauriIconCli::with_command(dir.path(), "sh", ["-c", "echo broken >&2; exit 3", "sh"]);
        let err = cli.generate(Path::new("icon.png")).unwrap_err();
        match err {
            Error::ExternalTool { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn receives_icon_path_as_last_argument() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("arg.txt");
        let script = format!("printf '%s' \"$1\" > '{}'", record.display());
        let cli = TauriIconCli::with_command(
            dir.path(),
            "sh",
            ["-c".to_string(), script, "sh".to_string()],
        );

        cli.generate(Path::new("render/macos.png")).unwrap();

        assert_eq!(std::fs::read_to_string(record).unwrap(), "render/macos.png");
    }
}
