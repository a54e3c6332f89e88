// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result},
          fs,
          path::PathBuf};

use dirs::cache_dir;
use miette::{IntoDiagnostic, WrapErr};

use crate::{CmdrErrorCouldNot, CommonResult};

/// Name of the environment variable that selects the editor executable.
pub const EDITOR_ENV_VAR: &str = "GOLF_VIM";

/// Used when [`EDITOR_ENV_VAR`] isn't set.
pub const DEFAULT_EDITOR: &str = "vim";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPaths {
    TopLevelFolderName,
    LogFolderName,
    LogFileName,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::TopLevelFolderName => "vimgolf",
            ConfigPaths::LogFolderName => "log",
            ConfigPaths::LogFileName => "vimgolf.log",
        };
        write!(f, "{path}")
    }
}

/// The editor to run, from [`EDITOR_ENV_VAR`]. An empty value is treated as unset.
#[must_use]
pub fn get_editor_program() -> String {
    match std::env::var(EDITOR_ENV_VAR) {
        Ok(it) if !it.trim().is_empty() => it,
        _ => DEFAULT_EDITOR.to_string(),
    }
}

/// This is where the log folder is, eg: `~/.cache/vimgolf/log` on Linux.
#[must_use]
pub fn try_get_log_folder_path() -> Option<PathBuf> {
    let it = cache_dir()?
        .join(ConfigPaths::TopLevelFolderName.to_string())
        .join(ConfigPaths::LogFolderName.to_string());
    Some(it)
}

/// Creates the log folder if needed, and returns the path to the log file in it.
///
/// # Errors
///
/// Returns an error if the user's cache folder can't be found, or if the log folder
/// can't be created.
pub fn try_get_log_file_path() -> CommonResult<PathBuf> {
    let log_folder_path = try_get_log_folder_path()
        .ok_or_else(|| miette::miette!("Could not access the cache folder"))?;

    fs::create_dir_all(&log_folder_path)
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::CreateLogFolder {
            path: log_folder_path.display().to_string(),
        })?;

    Ok(log_folder_path.join(ConfigPaths::LogFileName.to_string()))
}
