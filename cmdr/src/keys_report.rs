// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};
use vimgolf_keys::Keys;

use crate::{CmdrErrorCouldNot, CommonResult};

/// What the `keys`, `log`, and `replay` commands print about a key sequence. The
/// `keys` field is stored as an array of representations, eg: `["i", "x", "<Esc>"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysReport {
    pub score: usize,
    pub representation: String,
    pub keys: Keys,
}

impl From<&Keys> for KeysReport {
    fn from(keys: &Keys) -> Self {
        Self {
            score: keys.score(),
            representation: keys.representation_string(),
            keys: keys.clone(),
        }
    }
}

impl KeysReport {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CommonResult<String> {
        serde_json::to_string_pretty(self).into_diagnostic()
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        format!("Score: {}\nKeys: {}\n", self.score, self.representation)
    }
}

/// Decode the keylog that `vim -W <file>` writes.
///
/// # Errors
///
/// Returns an error if the file can't be read, or if it ends in the middle of an
/// escape sequence.
#[tracing::instrument]
pub async fn try_read_keylog(path: &Path) -> CommonResult<Keys> {
    let raw_keys = tokio::fs::read(path)
        .await
        .into_diagnostic()
        .wrap_err(CmdrErrorCouldNot::ReadFile {
            path: path.display().to_string(),
        })?;

    let keys = Keys::from_raw_bytes(&raw_keys)?;

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Read keylog",
        raw_len = %raw_keys.len(),
        score = %keys.score()
    );

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::try_create_temp_dir;

    fn keys(input: &str) -> Keys {
        Keys::from_raw_representation_string(input, None, None).unwrap()
    }

    #[test]
    fn test_to_text() {
        let report = KeysReport::from(&keys("ix<esc>ZZ"));
        assert_eq!(report.to_text(), "Score: 5\nKeys: ix<Esc>ZZ\n");
    }

    #[test]
    fn test_to_json() {
        let report = KeysReport::from(&keys("x<CR>"));
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "score": 2,
                "representation": "x<CR>",
                "keys": ["x", "<CR>"],
            })
        );

        let parsed: KeysReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[tokio::test]
    async fn test_try_read_keylog() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join("keylog");
        // `ix<Esc>`, then a focus event, then `:wq<CR>`.
        std::fs::write(&path, b"ix\x1b\x80\xfd\x35:wq\r").unwrap();

        let keys = try_read_keylog(&path).await.unwrap();

        assert_eq!(keys.representation_string(), "ix<Esc>:wq<CR>");
        assert_eq!(keys.score(), 7);
    }

    #[tokio::test]
    async fn test_try_read_truncated_keylog() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join("keylog");
        std::fs::write(&path, b"ix\x80k").unwrap();

        assert!(try_read_keylog(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_try_read_missing_keylog() {
        let result = try_read_keylog(Path::new("/does/not/exist/keylog")).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "🔼 Could not read file: '/does/not/exist/keylog'"
        );
    }
}
