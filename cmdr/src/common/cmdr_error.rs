// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Type alias to make it easy to work with [`miette::Result`]. Every fallible function in
/// this crate returns this, and errors from [`vimgolf_keys`] convert into it with `?`.
pub type CommonResult<T> = miette::Result<T>;

/// Context attached to I/O and process errors with
/// [`miette::WrapErr::wrap_err`], so the report says what the app was trying to do.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum CmdrErrorCouldNot {
    #[error("📁 Could not create workspace folder: '{path}'")]
    CreateWorkspace { path: String },

    #[error("📁 Could not create log folder: '{path}'")]
    CreateLogFolder { path: String },

    #[error("🔼 Could not read file: '{path}'")]
    ReadFile { path: String },

    #[error("🔽 Could not write file: '{path}'")]
    WriteFile { path: String },

    #[error("📝 Could not copy '{from}' to '{to}'")]
    CopyFile { from: String, to: String },

    #[error("⚡ Could not run editor '{program}' for prefix {prefix_index}")]
    RunEditor { program: String, prefix_index: usize },

    #[error("⛳ Could not run editor session '{program}'")]
    RunEditorSession { program: String },

    #[error("🔍 Could not open diff viewer '{program}'")]
    OpenDiffViewer { program: String },
}
