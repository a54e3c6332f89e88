// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias for results produced by the codec and the replay-diff engine. The error
/// type is a [`miette::Diagnostic`], so it converts into a [`miette::Report`] with `?`.
pub type KeysResult<T> = Result<T, KeysError>;

/// All the ways that parsing, encoding, or replaying keystrokes can fail.
///
/// Codec errors are deterministic. The same input always produces the same error, so
/// none of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum KeysError {
    /// Both literal substitutes for `<` and `>` were set to the same character.
    #[error("Literal substitutes for '<' and '>' must differ, both are '{literal}'")]
    #[diagnostic(
        code(vimgolf_keys::config_error),
        help("Pick two different characters, eg: '[' for '<' and ']' for '>'")
    )]
    ConfigError { literal: char },

    /// A `0x80` escape byte at `offset` was followed by fewer than two bytes.
    #[error(
        "Truncated escape sequence at byte offset {offset}: expected 2 bytes after 0x80, found {available}"
    )]
    #[diagnostic(
        code(vimgolf_keys::truncated_escape),
        help("The keylog is incomplete, it was probably cut off while vim was writing it")
    )]
    TruncatedEscape { offset: usize, available: usize },

    /// A token has no entry in the keycode table. `index` is the position of the token
    /// in its sequence, when known.
    #[error("Unknown key representation '{token}'{at}", at = display_index(*index))]
    #[diagnostic(
        code(vimgolf_keys::unknown_representation),
        help(
            "Use vim key notation like <Esc>, <CR>, <C-A>, or <F1>. Tokens rendered as \
             [\\xHH\\xHH] can't be converted back into keystrokes"
        )
    )]
    UnknownRepresentation { token: String, index: Option<usize> },

    /// The apply oracle failed for one prefix, which aborts the whole replay-diff.
    #[error("Could not apply keystroke prefix {prefix_index} to the document: {reason}")]
    #[diagnostic(code(vimgolf_keys::oracle_failure))]
    OracleFailure { prefix_index: usize, reason: String },
}

fn display_index(index: Option<usize>) -> String {
    match index {
        Some(index) => format!(" at token {index}"),
        None => String::new(),
    }
}

impl KeysError {
    /// Attach the position of the offending token, for errors raised by functions that
    /// only see a single token.
    #[must_use]
    pub fn at_index(self, at: usize) -> Self {
        match self {
            KeysError::UnknownRepresentation { token, .. } => {
                KeysError::UnknownRepresentation {
                    token,
                    index: Some(at),
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_display_messages() {
        let err = KeysError::ConfigError { literal: '1' };
        assert_eq2!(
            err.to_string(),
            "Literal substitutes for '<' and '>' must differ, both are '1'"
        );

        let err = KeysError::TruncatedEscape {
            offset: 4,
            available: 1,
        };
        assert_eq2!(
            err.to_string(),
            "Truncated escape sequence at byte offset 4: expected 2 bytes after 0x80, found 1"
        );

        let err = KeysError::UnknownRepresentation {
            token: "<Nope>".into(),
            index: None,
        };
        assert_eq2!(err.to_string(), "Unknown key representation '<Nope>'");
        assert_eq2!(
            err.at_index(3).to_string(),
            "Unknown key representation '<Nope>' at token 3"
        );
    }

    #[test]
    fn test_at_index_leaves_other_errors_alone() {
        let err = KeysError::ConfigError { literal: 'x' };
        assert_eq2!(err.clone().at_index(7), err);
    }

    #[test]
    fn test_converts_into_miette_report() {
        fn fails() -> miette::Result<()> {
            Err(KeysError::TruncatedEscape {
                offset: 0,
                available: 0,
            })?;
            Ok(())
        }
        let report = fails().unwrap_err();
        assert!(report.downcast_ref::<KeysError>().is_some());
    }
}
