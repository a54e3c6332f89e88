// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Files written for the diff viewer. Given `in.txt` and three interesting prefixes,
//! the workspace ends up with:
//!
//! ```text
//! inspect-in000.txt   (IN)
//! inspect-in001.txt   the first prefix that changed the document
//! inspect-in002.txt   the full sequence, labeled with " (OUT)"
//! inspect-pairs.vim   let g:inspectPairs = [[...000, ...001],[...001, ...002],[...000, ...002]]
//! inspect.vim         defines InspectCompare(), which steps through the pairs
//! ```
//!
//! The viewer is `vim -S inspect.vim -S inspect-pairs.vim`.

use std::{fmt::Write as _,
          path::{Path, PathBuf}};

use miette::{IntoDiagnostic, WrapErr};
use vimgolf_keys::ReplayDiffReport;

use crate::{CmdrErrorCouldNot, CommonResult, numbered_file_name};

pub const INSPECT_FILE_PREFIX: &str = "inspect-";
pub const INSPECT_PAIRS_FILE_NAME: &str = "inspect-pairs.vim";
pub const INSPECT_SCRIPT_FILE_NAME: &str = "inspect.vim";

/// Defines `InspectCompare()`, which shows each pair in `g:inspectPairs` side by side in
/// diff mode. `<Tab>` and `<S-Tab>` move between pairs.
pub const INSPECT_SCRIPT: &str = include_str!("inspect.vim");

/// Write one labeled file per interesting prefix. The returned paths are in the same
/// order as [`ReplayDiffReport::interesting`], and file `NNN` holds position `NNN`.
///
/// # Errors
///
/// Returns an error if a file can't be written.
pub async fn write_inspect_files(
    workspace: &Path,
    input_path: &Path,
    report: &ReplayDiffReport,
) -> CommonResult<Vec<PathBuf>> {
    let mut acc = Vec::with_capacity(report.interesting.len());

    for (position, block) in report.display_blocks().iter().enumerate() {
        let file_name = numbered_file_name(INSPECT_FILE_PREFIX, input_path, position);
        let path = workspace.join(file_name);
        tokio::fs::write(&path, block.to_bytes())
            .await
            .into_diagnostic()
            .wrap_err(CmdrErrorCouldNot::WriteFile {
                path: path.display().to_string(),
            })?;
        acc.push(path);
    }

    Ok(acc)
}

/// Quote `it` as a vimscript single quoted string, where `'` is written as `''`.
fn vim_single_quote(it: &Path) -> String {
    format!("'{}'", it.display().to_string().replace('\'', "''"))
}

/// The pairs of inspect files to compare side by side, from
/// [`ReplayDiffReport::pairs`]. `inspect_files` is what [`write_inspect_files`]
/// returned.
#[must_use]
pub fn build_inspect_pairs_script(
    report: &ReplayDiffReport,
    inspect_files: &[PathBuf],
) -> String {
    let path_of = |prefix_index: usize| {
        report
            .position_of(prefix_index)
            .and_then(|position| inspect_files.get(position))
    };

    let pairs = report
        .pairs
        .iter()
        .filter_map(|&(left, right)| {
            let (left, right) = (path_of(left)?, path_of(right)?);
            Some(format!("[{},{}]", vim_single_quote(left), vim_single_quote(right)))
        })
        .collect::<Vec<_>>()
        .join(",");

    format!("let g:inspectPairs = [{pairs}]\ncall InspectCompare()")
}

/// Write the pairs script next to the inspect files.
///
/// # Errors
///
/// Returns an error if the file can't be written.
pub async fn write_inspect_pairs_script(
    workspace: &Path,
    report: &ReplayDiffReport,
    inspect_files: &[PathBuf],
) -> CommonResult<PathBuf> {
    let path = workspace.join(INSPECT_PAIRS_FILE_NAME);
    tokio::fs::write(&path, build_inspect_pairs_script(report, inspect_files))
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::WriteFile {
            path: path.display().to_string(),
        })?;
    Ok(path)
}

/// Write [`INSPECT_SCRIPT`] next to the inspect files.
///
/// # Errors
///
/// Returns an error if the file can't be written.
pub async fn write_inspect_script(workspace: &Path) -> CommonResult<PathBuf> {
    let path = workspace.join(INSPECT_SCRIPT_FILE_NAME);
    tokio::fs::write(&path, INSPECT_SCRIPT)
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::WriteFile {
            path: path.display().to_string(),
        })?;
    Ok(path)
}

/// Text shown after an inspect run, one line per interesting prefix.
#[must_use]
pub fn format_inspect_summary(report: &ReplayDiffReport) -> String {
    let total = report.documents.len();
    let mut acc = format!(
        "{} of {total} prefixes are interesting\n",
        report.interesting.len()
    );
    for (prefix_index, label) in report.interesting.iter().zip(&report.labels) {
        // Writing to a String can't fail.
        writeln!(acc, "  [{prefix_index:>3}] {label}").ok();
    }
    acc
}
