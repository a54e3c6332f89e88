// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A local play session: the user edits a copy of the input file in the editor, with
//! every keystroke recorded by `vim -W`. When the editor exits, the result is compared
//! to the expected output and the keylog is decoded and scored.

use std::{fmt::Write as _,
          path::{Path, PathBuf}};

use miette::{IntoDiagnostic, WrapErr};
use vimgolf_keys::Keys;

use crate::{CmdrErrorCouldNot, CommonResult, Run, VIM_BASE_ARGS, command,
            open_diff_viewer, try_create_temp_dir, try_read_keylog};

/// Where `vim -W` writes the keystrokes, in the workspace.
pub const PLAY_KEYLOG_FILE_NAME: &str = "log";

/// Where the starting keystrokes are written, in the workspace.
pub const PLAY_START_SCRIPT_FILE_NAME: &str = "start.keys";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayOptions {
    /// Show the result and the expected output side by side when they differ.
    pub show_diff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub keys: Keys,
    /// `true` when the result is byte for byte the same as the expected output.
    pub correct: bool,
    pub document: Vec<u8>,
}

impl PlayOutcome {
    #[must_use]
    pub fn summary(&self) -> String {
        let mut acc = String::from("Here are your keystrokes:\n");
        // Writing to a String can't fail.
        writeln!(acc, "{}", self.keys.representation_string()).ok();
        if self.correct {
            writeln!(acc, "Success! Your output matches.").ok();
            writeln!(acc, "Your score: {}", self.keys.score()).ok();
        } else {
            writeln!(acc, "Uh oh, your output does not match the expected output.").ok();
            writeln!(acc, "Your score for this failed attempt: {}", self.keys.score()).ok();
        }
        acc
    }
}

/// Run one play session on a copy of `input_path`. `start_keys` are typed before the
/// editor hands control to the user.
///
/// # Errors
///
/// Returns an error if the workspace can't be set up, if the editor fails, or if the
/// keylog can't be decoded.
#[tracing::instrument(skip(start_keys))]
pub async fn run_play(
    program: &str,
    input_path: &Path,
    expected_path: &Path,
    start_keys: Option<&Keys>,
    options: PlayOptions,
) -> CommonResult<PlayOutcome> {
    let workspace = try_create_temp_dir()?;

    let file_name = input_path
        .file_name()
        .ok_or_else(|| miette::miette!("Input path has no file name: {input_path:?}"))?;
    let document_path = workspace.join(file_name);
    let keylog_path = workspace.join(PLAY_KEYLOG_FILE_NAME);

    tokio::fs::copy(input_path, &document_path)
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::CopyFile {
            from: input_path.display().to_string(),
            to: document_path.display().to_string(),
        })?;

    let mut command = command!(
        program => program,
        items => VIM_BASE_ARGS,
        args => "-W", &keylog_path,
    );
    if let Some(start_keys) = start_keys {
        let start_script_path = try_write_start_script(&workspace, start_keys).await?;
        command.arg("-s").arg(start_script_path);
    }
    command.arg(&document_path);

    command
        .run_interactive()
        .await
        .wrap_err(CmdrErrorCouldNot::RunEditorSession {
            program: program.to_string(),
        })?;

    let document = try_read(&document_path).await?;
    let expected = try_read(expected_path).await?;
    let correct = document == expected;
    let keys = try_read_keylog(&keylog_path).await?;

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Play session done",
        correct = %correct,
        score = %keys.score()
    );

    if !correct && options.show_diff {
        open_diff_viewer(program, &document_path, expected_path).await?;
    }

    Ok(PlayOutcome {
        keys,
        correct,
        document,
    })
}

async fn try_write_start_script(workspace: &Path, start_keys: &Keys) -> CommonResult<PathBuf> {
    let path = workspace.join(PLAY_START_SCRIPT_FILE_NAME);
    tokio::fs::write(&path, start_keys.raw_keys())
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::WriteFile {
            path: path.display().to_string(),
        })?;
    Ok(path)
}

async fn try_read(path: &Path) -> CommonResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::ReadFile {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// A fake editor that types `ix<Esc>:wq<CR>` into the keylog, adds a line to the
    /// document, and then appends the start script (if any) to the document.
    #[cfg(unix)]
    fn create_fake_editor(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-vim.sh");
        std::fs::write(
            &path,
            "#!/bin/sh\n\
             doc=''; log=''; script=''\n\
             while [ $# -gt 0 ]; do\n\
               case \"$1\" in\n\
                 -W) log=\"$2\"; shift ;;\n\
                 -s) script=\"$2\"; shift ;;\n\
                 *) doc=\"$1\" ;;\n\
               esac\n\
               shift\n\
             done\n\
             printf 'ix\\033:wq\\r' > \"$log\"\n\
             printf 'x\\n' >> \"$doc\"\n\
             if [ -n \"$script\" ]; then cat \"$script\" >> \"$doc\"; fi\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn setup(expected: &str) -> (crate::TempDir, String, PathBuf, PathBuf) {
        let dir = try_create_temp_dir().unwrap();
        let program = create_fake_editor(&dir).display().to_string();
        let input_path = dir.join("in.txt");
        std::fs::write(&input_path, "hello\n").unwrap();
        let expected_path = dir.join("out.txt");
        std::fs::write(&expected_path, expected).unwrap();
        (dir, program, input_path, expected_path)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_play_correct() {
        let (_dir, program, input_path, expected_path) = setup("hello\nx\n");

        let outcome = run_play(
            &program,
            &input_path,
            &expected_path,
            None,
            PlayOptions::default(),
        )
        .await
        .unwrap();

        assert!(outcome.correct);
        assert_eq!(outcome.keys.representation_string(), "ix<Esc>:wq<CR>");
        assert_eq!(
            outcome.summary(),
            "Here are your keystrokes:\nix<Esc>:wq<CR>\nSuccess! Your output matches.\n\
             Your score: 7\n"
        );
        // The input file is never touched.
        assert_eq!(std::fs::read_to_string(&input_path).unwrap(), "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_play_incorrect() {
        let (_dir, program, input_path, expected_path) = setup("goodbye\n");

        let outcome = run_play(
            &program,
            &input_path,
            &expected_path,
            None,
            PlayOptions::default(),
        )
        .await
        .unwrap();

        assert!(!outcome.correct);
        assert_eq!(outcome.document, b"hello\nx\n".to_vec());
        assert!(outcome.summary().contains("Your score for this failed attempt: 7"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_play_with_start_keys() {
        let (_dir, program, input_path, expected_path) = setup("hello\nx\ndd");
        let start_keys = Keys::from_raw_representation_string("dd", None, None).unwrap();

        let outcome = run_play(
            &program,
            &input_path,
            &expected_path,
            Some(&start_keys),
            PlayOptions::default(),
        )
        .await
        .unwrap();

        assert!(outcome.correct);
    }

    #[tokio::test]
    async fn test_play_with_missing_editor() {
        let dir = try_create_temp_dir().unwrap();
        let input_path = dir.join("in.txt");
        std::fs::write(&input_path, "hello\n").unwrap();

        let result = run_play(
            "does_not_exist_vimgolf_editor",
            &input_path,
            &input_path,
            None,
            PlayOptions::default(),
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "⛳ Could not run editor session 'does_not_exist_vimgolf_editor'"
        );
    }
}
