// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editor replays keystrokes from a script file passed with `-s`, which vim reads
//! as if the bytes were typed. The script holds the same raw keys that `vim -W` writes,
//! so every keystroke vim can record can be replayed, including non-ASCII bytes and
//! special keys that have no name in the keycode table.
//!
//! The script ends with [`REPLAY_QUIT_KEYS`], so the editor writes every buffer and
//! exits no matter which mode the keystrokes left it in. For example, `ix<Esc>` becomes
//! the bytes `ix\x1b\x1b\x1b\x1b:\x15wqall\r`.

use vimgolf_keys::Keys;

use crate::CommonResult;

pub const REPLAY_QUIT_KEYS: &str = "<Esc><Esc><Esc>:<C-U>wqall<CR>";

/// Raw keys for [`REPLAY_QUIT_KEYS`].
///
/// # Errors
///
/// Returns an error if [`REPLAY_QUIT_KEYS`] has a name that isn't in the keycode table.
pub fn replay_quit_raw_keys() -> CommonResult<Vec<u8>> {
    let keys = Keys::from_raw_representation_string(REPLAY_QUIT_KEYS, None, None)?;
    Ok(keys.raw_keys().to_vec())
}

/// The `-s` script that types `keys`, and then [`REPLAY_QUIT_KEYS`].
///
/// # Errors
///
/// Returns an error if the quit keys can't be encoded.
pub fn build_replay_script(keys: &Keys) -> CommonResult<Vec<u8>> {
    let mut acc = keys.raw_keys().to_vec();
    acc.extend(replay_quit_raw_keys()?);
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_replay_quit_raw_keys() {
        assert_eq!(replay_quit_raw_keys().unwrap(), b"\x1b\x1b\x1b:\x15wqall\r");
    }

    #[test_case(b"", b"\x1b\x1b\x1b:\x15wqall\r")]
    #[test_case(b"ix\x1b", b"ix\x1b\x1b\x1b\x1b:\x15wqall\r")]
    #[test_case(b"A\xc3\xa9\x1b", b"A\xc3\xa9\x1b\x1b\x1b\x1b:\x15wqall\r")]
    #[test_case(b"\x80k1x", b"\x80k1x\x1b\x1b\x1b:\x15wqall\r")]
    fn test_build_replay_script(raw_keys: &[u8], expected: &[u8]) {
        let keys = Keys::from_raw_bytes(raw_keys).unwrap();
        assert_eq!(build_replay_script(&keys).unwrap(), expected);
    }

    #[test]
    fn test_unnamed_keycode_is_replayed_as_recorded() {
        let keys = Keys::from_raw_bytes(b"Ax\x80\xfd\x99\x1b").unwrap();
        assert_eq!(keys.representations()[2], "[\\xfd\\x99]");

        let script = build_replay_script(&keys).unwrap();

        assert!(script.starts_with(b"Ax\x80\xfd\x99\x1b"));
    }

    #[test]
    fn test_ignored_keystrokes_are_not_replayed() {
        let keys = Keys::from_raw_bytes(b"x\x80\xfd\x35y").unwrap();
        assert!(build_replay_script(&keys).unwrap().starts_with(b"xy\x1b"));
    }
}
