// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Display, Formatter, Result};

/// One keystroke, as a big-endian 2 byte integer.
///
/// | Raw keys (`vim -W`) | Keycode  |
/// |---------------------|----------|
/// | `5a`                | `0x005a` |
/// | `80 6b 31`          | `0x6b31` |
///
/// A single byte `b` is padded to `0x00b`. An escaped triple `0x80 b1 b2` drops the
/// escape byte and keeps `b1 b2`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Keycode(pub u16);

impl Keycode {
    /// A keycode for a single unescaped byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self { Self(byte as u16) }

    /// A keycode for the two bytes that follow a `0x80` escape.
    #[must_use]
    pub const fn from_pair(first: u8, second: u8) -> Self {
        Self(u16::from_be_bytes([first, second]))
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] { self.0.to_be_bytes() }

    #[must_use]
    pub const fn as_u16(self) -> u16 { self.0 }

    /// `true` when vim records this keycode as a single byte, ie: the high byte is zero.
    #[must_use]
    pub const fn is_single_byte(self) -> bool { self.0 <= 0xFF }
}

impl From<u16> for Keycode {
    fn from(value: u16) -> Self { Self(value) }
}

impl From<[u8; 2]> for Keycode {
    fn from([first, second]: [u8; 2]) -> Self { Self::from_pair(first, second) }
}

impl Debug for Keycode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "Keycode({:#06x})", self.0) }
}

impl Display for Keycode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{:#06x}", self.0) }
}

/// Keystrokes that vim records for events that aren't typed by the player. They are
/// dropped when raw keys are parsed, so they never count toward the score.
pub const IGNORED_KEYSTROKES: [Keycode; 5] = [
    // KE_IGNORE.
    Keycode::from_pair(0xFD, 0x35),
    // KE_CURSORHOLD. Also triggered when the GVIM window is moved.
    Keycode::from_pair(0xFD, 0x60),
    // KE_NOP.
    Keycode::from_pair(0xFD, 0x61),
    // KE_FOCUSGAINED (GVIM).
    Keycode::from_pair(0xFD, 0x62),
    // KE_FOCUSLOST (GVIM).
    Keycode::from_pair(0xFD, 0x63),
];

#[must_use]
pub fn is_ignored(keycode: Keycode) -> bool { IGNORED_KEYSTROKES.contains(&keycode) }
