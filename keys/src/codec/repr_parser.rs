// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parse key sequences typed by a human, eg: `<C-V>G$A;<Esc>ZZ`, into representation
//! tokens, and normalize the casing of bracketed tokens.
//!
//! ```text
//! "<C-V>G$A;<Esc>ZZ"  ──tokenize──►  ["<C-V>", "G", "$", "A", ";", "<Esc>", "Z", "Z"]
//! "<esc>"             ──normalize──► "<Esc>"
//! ```
//!
//! A key sequence that needs a literal `<` or `>` can name two substitute characters,
//! eg: with `{` and `}` as substitutes, `{CR}` is the 4 keystrokes `<`, `C`, `R`, `>`
//! rather than the single keystroke `<CR>`.

use super::KEYCODE_TABLE;
use crate::{KeysError, KeysResult};

/// `true` for tokens that start with `<` and end with `>`. Only these are normalized.
#[must_use]
pub fn is_bracketed(token: &str) -> bool {
    token.len() > 1 && token.starts_with('<') && token.ends_with('>')
}

/// Split a typed key sequence into representation tokens.
///
/// - `<` opens a bracketed token, and every character up to and including the next `>`
///   belongs to it (a second `<` inside it doesn't start a new one).
/// - Outside a bracketed token, `literal_lt` becomes a `<` token, `literal_gt` becomes a
///   `>` token, and any other character is a token by itself.
/// - An unterminated bracketed token at the end of the input is emitted as is. This
///   keeps partially typed input usable, and normalization will reject it later if it
///   is ever converted into keystrokes.
///
/// # Errors
///
/// Returns [`KeysError::ConfigError`] if both substitutes are given and are the same
/// character. This check happens before any parsing.
pub fn tokenize(
    input: &str,
    literal_lt: Option<char>,
    literal_gt: Option<char>,
) -> KeysResult<Vec<String>> {
    if let (Some(lt), Some(gt)) = (literal_lt, literal_gt)
        && lt == gt
    {
        return Err(KeysError::ConfigError { literal: lt });
    }

    let mut acc: Vec<String> = Vec::with_capacity(input.len());
    let mut maybe_open: Option<String> = None;

    for ch in input.chars() {
        if let Some(open) = maybe_open.as_mut() {
            open.push(ch);
            if ch == '>' {
                acc.extend(maybe_open.take());
            }
            continue;
        }

        match ch {
            '<' => maybe_open = Some(String::from('<')),
            _ if Some(ch) == literal_lt => acc.push("<".into()),
            _ if Some(ch) == literal_gt => acc.push(">".into()),
            _ => acc.push(ch.into()),
        }
    }

    // Unterminated bracket.
    acc.extend(maybe_open);

    Ok(acc)
}

/// Replace a bracketed token with its canonical casing, eg: `<cr>` → `<CR>`. Tokens
/// that aren't bracketed (see [`is_bracketed`]) are returned unchanged, including
/// partial ones like `<Z` or `z>`.
///
/// # Errors
///
/// Returns [`KeysError::UnknownRepresentation`] if a bracketed token doesn't match any
/// table entry, ignoring case.
pub fn normalize(token: &str) -> KeysResult<String> {
    if !is_bracketed(token) {
        return Ok(token.to_string());
    }
    KEYCODE_TABLE
        .canonical_representation(token)
        .map(str::to_string)
        .ok_or_else(|| KeysError::UnknownRepresentation {
            token: token.to_string(),
            index: None,
        })
}
