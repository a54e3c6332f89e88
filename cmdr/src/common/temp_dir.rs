// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter},
          ops::Deref,
          path::{Path, PathBuf}};

use miette::{IntoDiagnostic, WrapErr};

use crate::{CmdrErrorCouldNot, CommonResult};

/// Prefix of the folders created by [`try_create_temp_dir`], so stray ones are easy to
/// spot in the system temp folder.
pub const TEMP_DIR_PREFIX: &str = "vimgolf-";

/// A folder that holds the files for one replay or inspect run. The folder and
/// everything in it is deleted when this is dropped.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

/// Create a uniquely named folder inside the system temp folder.
///
/// # Errors
///
/// Returns an error if the folder can't be created, eg: due to permissions or a full
/// disk.
pub fn try_create_temp_dir() -> CommonResult<TempDir> {
    let root = std::env::temp_dir();
    let new_temp_dir = root.join(format!("{TEMP_DIR_PREFIX}{}", uuid::Uuid::new_v4()));
    std::fs::create_dir(&new_temp_dir)
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::CreateWorkspace {
            path: new_temp_dir.display().to_string(),
        })?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "Created workspace", path = ?new_temp_dir);

    Ok(TempDir {
        inner: new_temp_dir,
    })
}

impl TempDir {
    /// Keep the folder on disk after this is dropped, and return its path.
    #[must_use]
    pub fn keep(mut self) -> PathBuf {
        let path = std::mem::take(&mut self.inner);
        std::mem::forget(self);
        path
    }
}

/// Automatically delete the temporary directory when the [`TempDir`] struct is dropped.
impl Drop for TempDir {
    fn drop(&mut self) {
        // We don't care about the result of this operation.
        std::fs::remove_dir_all(&self.inner).ok();
    }
}

impl Deref for TempDir {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl AsRef<Path> for TempDir {
    fn as_ref(&self) -> &Path { &self.inner }
}

impl Display for TempDir {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}
