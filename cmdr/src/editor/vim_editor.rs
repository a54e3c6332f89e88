// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, WrapErr};
use vimgolf_keys::{ApplyOracle, Keys};

use super::{Run, build_replay_script};
use crate::{CmdrErrorCouldNot, CommonResult, command, try_create_temp_dir};

/// Passed to the editor on every run: restricted mode, no swap file, nocompatible, no
/// plugins, no fork, no viminfo, cursor on line 1, and no vimrc or gvimrc.
pub const VIM_BASE_ARGS: [&str; 12] = [
    "-Z",
    "-n",
    "-N",
    "--noplugin",
    "--nofork",
    "-i",
    "NONE",
    "+0",
    "-u",
    "NONE",
    "-U",
    "NONE",
];

/// Replays have no terminal, stdio is piped.
pub const VIM_NOT_A_TERM_ARG: &str = "--not-a-term";

/// Name of the `-s` script that replays one prefix.
pub const REPLAY_SCRIPT_FILE_STEM: &str = "replay";
pub const REPLAY_SCRIPT_FILE_EXT: &str = ".keys";

/// `<file_prefix><stem>NNN<ext>`, eg: `in.txt` and `7` → `in007.txt`.
#[must_use]
pub fn numbered_file_name(file_prefix: &str, input_path: &Path, index: usize) -> String {
    let stem = input_path
        .file_stem()
        .map(|it| it.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = input_path
        .extension()
        .map(|it| format!(".{}", it.to_string_lossy()))
        .unwrap_or_default();
    format!("{file_prefix}{stem}{index:03}{ext}")
}

/// Applies keystrokes by running the editor on a copy of the input file. Each prefix
/// gets its own copy and script in `workspace`, so prefixes can be replayed at the
/// same time.
#[derive(Debug, Clone)]
pub struct VimEditor {
    pub program: String,
    pub input_path: PathBuf,
    pub workspace: PathBuf,
}

impl VimEditor {
    pub fn new(
        program: impl Into<String>,
        input_path: impl Into<PathBuf>,
        workspace: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            input_path: input_path.into(),
            workspace: workspace.into(),
        }
    }

    /// Where the document for `prefix_index` is written.
    #[must_use]
    pub fn document_path(&self, prefix_index: usize) -> PathBuf {
        self.workspace
            .join(numbered_file_name("", &self.input_path, prefix_index))
    }

    #[must_use]
    pub fn script_path(&self, prefix_index: usize) -> PathBuf {
        self.workspace.join(format!(
            "{REPLAY_SCRIPT_FILE_STEM}{prefix_index:03}{REPLAY_SCRIPT_FILE_EXT}"
        ))
    }

    async fn try_apply(&self, prefix_index: usize, prefix: &Keys) -> CommonResult<Vec<u8>> {
        let document_path = self.document_path(prefix_index);
        let script_path = self.script_path(prefix_index);

        tokio::fs::copy(&self.input_path, &document_path)
            .await
            .into_diagnostic()
            .wrap_err(CmdrErrorCouldNot::CopyFile {
                from: self.input_path.display().to_string(),
                to: document_path.display().to_string(),
            })?;

        let script = build_replay_script(prefix)?;
        tokio::fs::write(&script_path, script)
            .await
            .into_diagnostic()
            .wrap_err(CmdrErrorCouldNot::WriteFile {
                path: script_path.display().to_string(),
            })?;

        command!(
            program => &self.program,
            items => VIM_BASE_ARGS,
            args => VIM_NOT_A_TERM_ARG, "-s", &script_path, &document_path,
        )
        .run()
        .await
        .wrap_err(CmdrErrorCouldNot::RunEditor {
            program: self.program.clone(),
            prefix_index,
        })?;

        let document = tokio::fs::read(&document_path)
            .await
            .into_diagnostic()
            .wrap_err(CmdrErrorCouldNot::ReadFile {
                path: document_path.display().to_string(),
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Editor applied prefix",
            prefix_index = %prefix_index,
            document_path = ?document_path,
            document_len = %document.len()
        );

        Ok(document)
    }
}

impl ApplyOracle for VimEditor {
    async fn apply(&self, prefix_index: usize, prefix: &Keys) -> miette::Result<Vec<u8>> {
        self.try_apply(prefix_index, prefix).await
    }
}

/// Replay all of `keys` against a copy of `input_path` in a throwaway workspace, and
/// return the resulting document. `input_path` itself is never modified.
///
/// # Errors
///
/// Returns an error if the workspace can't be set up, or if the editor fails.
#[tracing::instrument(skip(keys), fields(keys = %keys))]
pub async fn replay(program: &str, input_path: &Path, keys: &Keys) -> CommonResult<Vec<u8>> {
    let workspace = try_create_temp_dir()?;
    let editor = VimEditor::new(program, input_path, workspace.as_path());
    editor.apply(keys.len(), keys).await
}

/// Show `left` and `right` side by side, read only. Blocks until the user quits.
///
/// # Errors
///
/// Returns an error if the editor can't be run or exits with an error.
pub async fn open_diff_viewer(program: &str, left: &Path, right: &Path) -> CommonResult<()> {
    command!(
        program => program,
        args => "-d", "-R", "-n", left, right,
    )
    .run_interactive()
    .await
    .wrap_err(CmdrErrorCouldNot::OpenDiffViewer {
        program: program.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("in.txt", "", 0, "in000.txt")]
    #[test_case("/tmp/a/in.txt", "inspect-", 12, "inspect-in012.txt")]
    #[test_case("Makefile", "", 3, "Makefile003")]
    #[test_case("in.tar.gz", "", 1000, "in.tar1000.gz")]
    fn test_numbered_file_name(input: &str, file_prefix: &str, index: usize, expected: &str) {
        assert_eq!(
            numbered_file_name(file_prefix, Path::new(input), index),
            expected
        );
    }

    #[test]
    fn test_paths_are_in_workspace() {
        let editor = VimEditor::new("vim", "/challenge/in.txt", "/tmp/ws");
        assert_eq!(editor.document_path(2), PathBuf::from("/tmp/ws/in002.txt"));
        assert_eq!(editor.script_path(2), PathBuf::from("/tmp/ws/replay002.keys"));
    }

    /// A fake editor that appends its `-s` script to the file it was asked to edit.
    #[cfg(unix)]
    fn create_fake_editor(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-vim.sh");
        std::fs::write(
            &path,
            "#!/bin/sh\n\
             while [ \"$1\" != \"-s\" ]; do shift; done\n\
             cat \"$2\" >> \"$3\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_apply_with_fake_editor() {
        let dir = try_create_temp_dir().unwrap();
        let program = create_fake_editor(&dir);
        let input_path = dir.join("in.txt");
        std::fs::write(&input_path, "hello\n").unwrap();

        let workspace = try_create_temp_dir().unwrap();
        let editor = VimEditor::new(
            program.display().to_string(),
            &input_path,
            workspace.as_path(),
        );
        let keys = Keys::from_raw_bytes(b"A\xc3\xa9\x80\xfd\x99\x1b").unwrap();

        let document = editor.apply(4, &keys).await.unwrap();

        assert_eq!(
            document,
            b"hello\nA\xc3\xa9\x80\xfd\x99\x1b\x1b\x1b\x1b:\x15wqall\r".to_vec()
        );
        assert!(editor.script_path(4).exists());
        // The input file is never touched.
        assert_eq!(std::fs::read_to_string(&input_path).unwrap(), "hello\n");
    }

    /// Runs only where vim is installed.
    #[tokio::test]
    async fn test_replay_non_ascii_with_vim() {
        let vim_is_installed = std::process::Command::new("vim")
            .arg("--version")
            .output()
            .is_ok_and(|it| it.status.success());
        if !vim_is_installed {
            return;
        }

        let dir = try_create_temp_dir().unwrap();
        let input_path = dir.join("in.txt");
        std::fs::write(&input_path, "hello\n").unwrap();
        let keys = Keys::from_raw_bytes(b"A\xc3\xa9\x1b").unwrap();

        let document = replay("vim", &input_path, &keys).await.unwrap();

        assert_eq!(String::from_utf8(document).unwrap(), "helloé\n");
    }

    #[tokio::test]
    async fn test_apply_with_missing_editor() {
        let dir = try_create_temp_dir().unwrap();
        let input_path = dir.join("in.txt");
        std::fs::write(&input_path, "hello\n").unwrap();

        let editor =
            VimEditor::new("does_not_exist_vimgolf_editor", &input_path, dir.as_path());
        let result = editor.apply(0, &Keys::default()).await;

        let report = result.unwrap_err();
        assert_eq!(
            report.to_string(),
            "⚡ Could not run editor 'does_not_exist_vimgolf_editor' for prefix 0"
        );
    }

    #[tokio::test]
    async fn test_apply_with_missing_input() {
        let dir = try_create_temp_dir().unwrap();
        let editor = VimEditor::new("vim", dir.join("missing.txt"), dir.as_path());
        assert!(editor.apply(0, &Keys::default()).await.is_err());
    }
}
