// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use crate::CommonResult;

/// The log file is never rotated, every run appends to the same file. Note that if you
/// wrap this up in a non blocking writer, the logs are lost when the process exits
/// before the writer's guard is flushed.
///
/// # Errors
///
/// Returns an error if the path has no parent folder or no file name.
pub fn try_create(
    path: impl AsRef<Path>,
) -> CommonResult<tracing_appender::rolling::RollingFileAppender> {
    let path = path.as_ref();

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access the folder of log file {}. It might not exist, or you might not have the required permissions.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access the name of log file {}. It might not exist, or you might not have the required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::try_create_temp_dir;

    #[test]
    fn test_try_create() {
        let dir = try_create_temp_dir().unwrap();
        let appender = try_create(dir.join("vimgolf.log"));
        assert!(appender.is_ok());
    }

    #[test]
    fn test_try_create_without_file_name() {
        assert!(try_create("/").is_err());
    }
}
