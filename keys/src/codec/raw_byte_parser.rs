// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Convert between the raw keys that `vim -W` writes and [`Keycode`]s.
//!
//! ```text
//! 5a            → 0x005a   (one byte, one keystroke)
//! 80 6b 31      → 0x6b31   (escape byte, then 2 bytes)
//! ```

use super::Keycode;
use crate::{KeysError, KeysResult};

/// The byte that vim uses to escape special keys in its keylogs (`K_SPECIAL`).
pub const ESCAPE_BYTE: u8 = 0x80;

/// A literal `0x80` byte can't be written as is since it would start an escape, so vim
/// writes it as this keycode (`KS_SPECIAL`, `KE_FILLER`).
pub const ESCAPED_LITERAL_ESCAPE_BYTE: Keycode = Keycode::from_pair(0xFE, 0x58);

/// Split raw keys into keycodes. Ignored keystrokes are kept here, they are dropped
/// when a [`crate::Keys`] is built.
///
/// # Errors
///
/// Returns [`KeysError::TruncatedEscape`] if an escape byte is followed by fewer than
/// two bytes.
pub fn parse_keycodes(raw_keys: &[u8]) -> KeysResult<Vec<Keycode>> {
    let mut acc = Vec::with_capacity(raw_keys.len());
    let mut offset = 0;

    while let Some(&byte) = raw_keys.get(offset) {
        if byte != ESCAPE_BYTE {
            acc.push(Keycode::from_byte(byte));
            offset += 1;
            continue;
        }

        match raw_keys.get(offset + 1..offset + 3) {
            Some(&[first, second]) => {
                acc.push(Keycode::from_pair(first, second));
                offset += 3;
            }
            _ => {
                return Err(KeysError::TruncatedEscape {
                    offset,
                    available: raw_keys.len() - offset - 1,
                });
            }
        }
    }

    Ok(acc)
}

/// Inverse of [`parse_keycodes`]. Keycodes with a zero high byte are written as a
/// single byte, the rest are written as an escape byte followed by their 2 bytes.
///
/// The only exception is `0x0080`, which is written as [`ESCAPED_LITERAL_ESCAPE_BYTE`].
#[must_use]
pub fn encode_keycodes(keycodes: &[Keycode]) -> Vec<u8> {
    let mut acc = Vec::with_capacity(keycodes.len() * 3);
    for &keycode in keycodes {
        let keycode = if keycode == Keycode::from_byte(ESCAPE_BYTE) {
            ESCAPED_LITERAL_ESCAPE_BYTE
        } else {
            keycode
        };
        let [high, low] = keycode.to_bytes();
        if keycode.is_single_byte() {
            acc.push(low);
        } else {
            acc.extend_from_slice(&[ESCAPE_BYTE, high, low]);
        }
    }
    acc
}
