// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bidirectional mapping between [`Keycode`]s and their representations, eg:
//! `0x001b` ↔ `<Esc>`, `0x6b31` ↔ `<F1>`, `0x005a` ↔ `Z`.
//!
//! The table is built once, lazily, and never mutated (see [`KEYCODE_TABLE`]). It is
//! generated in this order, and later entries replace earlier ones for the same keycode:
//!
//! 1. `0x00..=0x1f` → `<C-@>`, `<C-A>`, ..., `<C-_>`.
//! 2. `0x20..=0x7e` → the printable character itself.
//! 3. `0x7f..=0xff` → `<0x7f>`, ..., `<0xff>`.
//! 4. Named control characters: `<Tab>`, `<NL>`, `<CR>`, `<Esc>`, `<Del>`.
//! 5. [`NAMED_KEYCODES`], vim's special keys (function keys, keypad, mouse, etc).
//!
//! The reverse map (representation → keycode) is derived from the forward map by
//! walking it in table order. Some representations are shared by more than one keycode,
//! and for those the keycode that comes **last in table order wins**. The shadowed
//! pairs are kept in [`KeycodeTable::collisions`]. This only affects parsing of those
//! names, rendering always uses the forward map.

use std::{borrow::Cow, collections::HashMap, fmt::Write as _, sync::LazyLock};

use super::{Keycode, is_bracketed};
use crate::{KeysError, KeysResult};

/// Process wide keycode table, built on first access.
pub static KEYCODE_TABLE: LazyLock<KeycodeTable> = LazyLock::new(KeycodeTable::build);

/// vim's internal names for special keys, as the two bytes that follow the `0x80`
/// escape in a keylog.
#[rustfmt::skip]
pub const NAMED_KEYCODES: &[(&[u8; 2], &str)] = &[
    (b"k1", "<F1>"), (b"k2", "<F2>"), (b"k3", "<F3>"), (b"k4", "<F4>"),
    (b"k5", "<F5>"), (b"k6", "<F6>"), (b"k7", "<F7>"), (b"k8", "<F8>"),
    (b"k9", "<F9>"), (b"k;", "<F10>"),
    (b"F1", "<F11>"), (b"F2", "<F12>"), (b"F3", "<F13>"), (b"F4", "<F14>"),
    (b"F5", "<F15>"), (b"F6", "<F16>"), (b"F7", "<F17>"), (b"F8", "<F18>"),
    (b"F9", "<F19>"),

    (b"%1", "<Help>"), (b"&8", "<Undo>"), (b"#2", "<S-Home>"), (b"*7", "<S-End>"),

    // Keypad.
    (b"K1", "<kHome>"), (b"K4", "<kEnd>"), (b"K3", "<kPageUp>"), (b"K5", "<kPageDown>"),
    (b"K6", "<kPlus>"), (b"K7", "<kMinus>"), (b"K8", "<kDivide>"), (b"K9", "<kMultiply>"),
    (b"KA", "<kEnter>"), (b"KB", "<kPoint>"),
    (b"KC", "<k0>"), (b"KD", "<k1>"), (b"KE", "<k2>"), (b"KF", "<k3>"), (b"KG", "<k4>"),
    (b"KH", "<k5>"), (b"KI", "<k6>"), (b"KJ", "<k7>"), (b"KK", "<k8>"), (b"KL", "<k9>"),

    (b"kP", "<PageUp>"), (b"kN", "<PageDown>"), (b"kh", "<Home>"), (b"@7", "<End>"),
    (b"kI", "<Insert>"), (b"kD", "<Del>"), (b"kb", "<BS>"),

    (b"ku", "<Up>"), (b"kd", "<Down>"), (b"kl", "<Left>"), (b"kr", "<Right>"),
    (b"#4", "<S-Left>"), (b"%i", "<S-Right>"),

    (b"kB", "<S-Tab>"),
    (b"\xffX", "<C-@>"),

    // A literal 0x80 byte typed by the player is itself escaped.
    (b"\xfeX", "<0x80>"),

    // Modifiers that vim records as a separate keystroke before the key they modify.
    (b"\xfc\x02", "<S->"), (b"\xfc\x04", "<C->"), (b"\xfc\x06", "<C-S->"),
    (b"\xfc\x08", "<A->"), (b"\xfc\x0a", "<A-S->"), (b"\xfc\x0c", "<C-A->"),
    (b"\xfc\x0e", "<C-A-S->"), (b"\xfc\x10", "<M->"), (b"\xfc\x12", "<M-S->"),
    (b"\xfc\x14", "<M-C->"), (b"\xfc\x16", "<M-C-S->"), (b"\xfc\x18", "<M-A->"),
    (b"\xfc\x1a", "<M-A-S->"), (b"\xfc\x1c", "<M-C-A->"), (b"\xfc\x1e", "<M-C-A-S->"),

    (b"\xfd\x04", "<S-Up>"), (b"\xfd\x05", "<S-Down>"),
    (b"\xfd\x06", "<S-F1>"), (b"\xfd\x07", "<S-F2>"), (b"\xfd\x08", "<S-F3>"),
    (b"\xfd\x09", "<S-F4>"), (b"\xfd\x0a", "<S-F5>"), (b"\xfd\x0b", "<S-F6>"),
    (b"\xfd\x0c", "<S-F7>"),
    // There is no <S-F8> here, 0xfd0e and 0xfd0f both render as <S-F10>.
    (b"\xfd\x0d", "<S-F9>"), (b"\xfd\x0e", "<S-F10>"), (b"\xfd\x0f", "<S-F10>"),
    (b"\xfd\x10", "<S-F11>"), (b"\xfd\x11", "<S-F12>"), (b"\xfd\x12", "<S-F13>"),
    (b"\xfd\x13", "<S-F14>"), (b"\xfd\x14", "<S-F15>"), (b"\xfd\x15", "<S-F16>"),
    (b"\xfd\x16", "<S-F17>"), (b"\xfd\x17", "<S-F18>"), (b"\xfd\x18", "<S-F19>"),
    (b"\xfd\x19", "<S-F20>"), (b"\xfd\x1a", "<S-F21>"), (b"\xfd\x1b", "<S-F22>"),
    (b"\xfd\x1c", "<S-F23>"), (b"\xfd\x1d", "<S-F24>"), (b"\xfd\x1e", "<S-F25>"),
    (b"\xfd\x1f", "<S-F26>"), (b"\xfd\x20", "<S-F27>"), (b"\xfd\x21", "<S-F28>"),
    (b"\xfd\x22", "<S-F29>"), (b"\xfd\x23", "<S-F30>"), (b"\xfd\x24", "<S-F31>"),
    (b"\xfd\x25", "<S-F32>"), (b"\xfd\x26", "<S-F33>"), (b"\xfd\x27", "<S-F34>"),
    (b"\xfd\x28", "<S-F35>"), (b"\xfd\x29", "<S-F36>"), (b"\xfd\x2a", "<S-F37>"),

    // Mouse.
    (b"\xfd\x2b", "<Mouse>"),
    (b"\xfd\x2c", "<LeftMouse>"), (b"\xfd\x2d", "<LeftDrag>"), (b"\xfd\x2e", "<LeftRelease>"),
    (b"\xfd\x2f", "<MiddleMouse>"), (b"\xfd\x30", "<MiddleDrag>"),
    (b"\xfd\x31", "<MiddleRelease>"),
    (b"\xfd\x32", "<RightMouse>"), (b"\xfd\x33", "<RightDrag>"),
    (b"\xfd\x34", "<RightRelease>"),

    (b"\xfd\x4b", "<ScrollWheelUp>"), (b"\xfd\x4c", "<ScrollWheelDown>"),
    (b"\xfd\x4d", "<ScrollWheelRight>"), (b"\xfd\x4e", "<ScrollWheelLeft>"),
    (b"\xfd\x4f", "<kInsert>"), (b"\xfd\x50", "<kDel>"),
    (b"\xfd\x55", "<C-Left>"), (b"\xfd\x56", "<C-Right>"),
    (b"\xfd\x57", "<C-Home>"), (b"\xfd\x58", "<C-End>"),
];

/// A representation that more than one keycode renders as. Parsing `representation`
/// yields `winner`, so `shadowed` can only be produced from raw keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub representation: String,
    pub shadowed: Keycode,
    pub winner: Keycode,
}

#[derive(Debug)]
pub struct KeycodeTable {
    /// Forward entries in table order.
    entries: Vec<(Keycode, String)>,
    /// Keycode → position in `entries`.
    forward: HashMap<Keycode, usize>,
    /// Canonical representation → keycode.
    reverse: HashMap<String, Keycode>,
    /// Lowercased bracketed representation → canonical representation.
    case_folded: HashMap<String, String>,
    collisions: Vec<Collision>,
}

impl KeycodeTable {
    fn build() -> Self {
        let mut entries: Vec<(Keycode, String)> =
            Vec::with_capacity(256 + NAMED_KEYCODES.len());
        let mut forward: HashMap<Keycode, usize> = HashMap::new();

        // A keycode keeps its original position when its representation is replaced.
        let mut insert = |keycode: Keycode, representation: String| {
            match forward.get(&keycode) {
                Some(&position) => entries[position].1 = representation,
                None => {
                    forward.insert(keycode, entries.len());
                    entries.push((keycode, representation));
                }
            }
        };

        for byte in 0x00..=0x1f_u8 {
            insert(Keycode::from_byte(byte), format!("<C-{}>", char::from(byte + 64)));
        }
        for byte in 0x20..=0x7e_u8 {
            insert(Keycode::from_byte(byte), char::from(byte).to_string());
        }
        for byte in 0x7f..=0xff_u8 {
            insert(Keycode::from_byte(byte), format!("<0x{byte:02x}>"));
        }

        let overrides = [
            (9, "<Tab>"),
            (10, "<NL>"),
            (13, "<CR>"),
            (27, "<Esc>"),
            (127, "<Del>"),
        ];
        for (byte, name) in overrides {
            insert(Keycode::from_byte(byte), name.to_string());
        }

        for (bytes, name) in NAMED_KEYCODES {
            insert(Keycode::from(**bytes), (*name).to_string());
        }

        let mut reverse: HashMap<String, Keycode> = HashMap::with_capacity(entries.len());
        let mut shadowed_pairs = vec![];
        for (keycode, representation) in &entries {
            if let Some(shadowed) = reverse.insert(representation.clone(), *keycode) {
                shadowed_pairs.push((representation.clone(), shadowed));
            }
        }

        let collisions: Vec<Collision> = shadowed_pairs
            .into_iter()
            .filter_map(|(representation, shadowed)| {
                let winner = *reverse.get(&representation)?;
                Some(Collision {
                    representation,
                    shadowed,
                    winner,
                })
            })
            .collect();

        // Only the winners of each representation get a case folded entry, again in
        // table order so the result doesn't depend on hash map iteration order.
        let mut case_folded = HashMap::new();
        for (keycode, representation) in &entries {
            if is_bracketed(representation) && reverse.get(representation) == Some(keycode) {
                case_folded.insert(representation.to_lowercase(), representation.clone());
            }
        }

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Built keycode table",
            entries = %entries.len(),
            collisions = ?collisions
        );

        Self {
            entries,
            forward,
            reverse,
            case_folded,
            collisions,
        }
    }

    /// Total: known keycodes render as their table entry, anything else renders as its
    /// hex escaped bytes in square brackets, eg: `[\xfd\x99]`.
    #[must_use]
    pub fn representation_for(&self, keycode: Keycode) -> Cow<'_, str> {
        match self.forward.get(&keycode) {
            Some(&position) => Cow::Borrowed(self.entries[position].1.as_str()),
            None => {
                let mut acc = String::from("[");
                for byte in keycode.to_bytes() {
                    // Writing to a String can't fail.
                    write!(acc, "\\x{byte:02x}").ok();
                }
                acc.push(']');
                Cow::Owned(acc)
            }
        }
    }

    /// Exact inverse of [`Self::representation_for`] for table entries. No case folding
    /// is done here, see [`Self::canonical_representation`].
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::UnknownRepresentation`] if there's no entry for
    /// `representation`. This includes the `[\xHH\xHH]` tokens rendered for unknown
    /// keycodes.
    pub fn keycode_for(&self, representation: &str) -> KeysResult<Keycode> {
        self.reverse.get(representation).copied().ok_or_else(|| {
            KeysError::UnknownRepresentation {
                token: representation.to_string(),
                index: None,
            }
        })
    }

    /// Case insensitive lookup of a bracketed representation, eg: `<esc>` → `<Esc>`.
    #[must_use]
    pub fn canonical_representation(&self, representation: &str) -> Option<&str> {
        self.case_folded
            .get(&representation.to_lowercase())
            .map(String::as_str)
    }

    /// Forward entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Keycode, &str)> {
        self.entries
            .iter()
            .map(|(keycode, representation)| (*keycode, representation.as_str()))
    }

    #[must_use]
    pub fn collisions(&self) -> &[Collision] { &self.collisions }
}

/// Render any keycode, see [`KeycodeTable::representation_for`].
#[must_use]
pub fn representation_for(keycode: Keycode) -> Cow<'static, str> {
    KEYCODE_TABLE.representation_for(keycode)
}

/// Look up the keycode for a canonical representation, see
/// [`KeycodeTable::keycode_for`].
///
/// # Errors
///
/// Returns [`KeysError::UnknownRepresentation`] if there's no entry for
/// `representation`.
pub fn keycode_for(representation: &str) -> KeysResult<Keycode> {
    KEYCODE_TABLE.keycode_for(representation)
}
