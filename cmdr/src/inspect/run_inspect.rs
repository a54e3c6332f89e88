// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Write as _,
          path::{Path, PathBuf}};

use miette::WrapErr;
use vimgolf_keys::{Keys, ReplayDiffOptions, ReplayDiffReport, replay_diff};

use super::{format_inspect_summary, write_inspect_files, write_inspect_pairs_script,
            write_inspect_script};
use crate::{CmdrErrorCouldNot, CommonResult, Run, VIM_BASE_ARGS, VimEditor, command,
            try_create_temp_dir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    pub max_workers: usize,
    /// Step through the interesting prefixes in the editor when done, two at a time in
    /// diff mode.
    pub view: bool,
    /// Leave the workspace on disk instead of deleting it.
    pub keep_workspace: bool,
}

#[derive(Debug)]
pub struct InspectOutcome {
    pub report: ReplayDiffReport,
    pub inspect_files: Vec<PathBuf>,
    pub pairs_script_path: PathBuf,
    pub inspect_script_path: PathBuf,
    /// Only set when [`InspectOptions::keep_workspace`] is.
    pub kept_workspace: Option<PathBuf>,
}

impl InspectOutcome {
    #[must_use]
    pub fn summary(&self) -> String {
        let mut acc = format_inspect_summary(&self.report);
        if let Some(workspace) = &self.kept_workspace {
            // Writing to a String can't fail.
            writeln!(acc, "Workspace: {}", workspace.display()).ok();
        }
        acc
    }
}

/// Replay every prefix of `keys` against `input_path` with the editor, and write the
/// inspect files for the interesting ones.
///
/// # Errors
///
/// Returns an error if the workspace can't be set up, if any prefix fails to replay, or
/// if the viewer fails.
#[tracing::instrument(skip(keys), fields(keys = %keys))]
pub async fn run_inspect(
    program: &str,
    input_path: &Path,
    keys: &Keys,
    options: InspectOptions,
) -> CommonResult<InspectOutcome> {
    let workspace = try_create_temp_dir()?;
    let editor = VimEditor::new(program, input_path, workspace.as_path());

    let report = replay_diff(
        keys,
        &editor,
        ReplayDiffOptions {
            max_workers: options.max_workers,
        },
    )
    .await?;

    let inspect_files = write_inspect_files(&workspace, input_path, &report).await?;
    let pairs_script_path =
        write_inspect_pairs_script(&workspace, &report, &inspect_files).await?;

    let inspect_script_path = write_inspect_script(&workspace).await?;

    if options.view {
        open_inspect_viewer(program, &inspect_script_path, &pairs_script_path).await?;
    }

    let kept_workspace = options.keep_workspace.then(|| workspace.keep());

    Ok(InspectOutcome {
        report,
        inspect_files,
        pairs_script_path,
        inspect_script_path,
        kept_workspace,
    })
}

/// Step through the inspect pairs in the editor. Blocks until the user quits.
///
/// # Errors
///
/// Returns an error if the editor can't be run or exits with an error.
pub async fn open_inspect_viewer(
    program: &str,
    inspect_script_path: &Path,
    pairs_script_path: &Path,
) -> CommonResult<()> {
    command!(
        program => program,
        items => VIM_BASE_ARGS,
        args => "-S", inspect_script_path, "-S", pairs_script_path,
    )
    .run_interactive()
    .await
    .wrap_err(CmdrErrorCouldNot::OpenDiffViewer {
        program: program.to_string(),
    })?;
    Ok(())
}
