// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # vimgolf keys
//!
//! Keystroke codec for logs recorded by `vim -W`, and a replay-diff engine built on top
//! of it.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Three representations of a keystroke](#three-representations-of-a-keystroke)
//! - [Converting between them](#converting-between-them)
//! - [Replay-diff](#replay-diff)
//! - [Errors](#errors)
//!
//! <!-- /TOC -->
//!
//! # Three representations of a keystroke
//!
//! ```text
//! raw keys (vim -W)        keycodes (2 bytes each)     representations
//! ┌──────────────────┐     ┌──────────────────────┐    ┌────────────────────┐
//! │ 80 6b 31 5a 5a   │ ◄─► │ 6b31, 005a, 005a     │ ◄─►│ <F1>  Z  Z         │
//! └──────────────────┘     └──────────────────────┘    └────────────────────┘
//! ```
//!
//! 1. **Raw keys**: vim writes one byte per plain keystroke, and `0x80 b1 b2` for special
//!    keys. See [`parse_keycodes`] and [`encode_keycodes`].
//! 2. **Keycodes**: every keystroke is a [`Keycode`], a big-endian `u16`. Plain bytes are
//!    padded (`0x00XX`).
//! 3. **Representations**: a printable character (`Z`) or a bracketed name (`<Esc>`,
//!    `<C-A>`). See [`representation_for`] and [`keycode_for`].
//!
//! # Converting between them
//!
//! All conversions pass through the immutable [`Keys`] value:
//!
//! ```
//! use vimgolf_keys::Keys;
//!
//! let keys = Keys::from_raw_bytes(b"\x80\x6b\x31\x5a\x5a").unwrap();
//! assert_eq!(keys.representations(), ["<F1>", "Z", "Z"]);
//! assert_eq!(keys.score(), 3);
//!
//! let typed = Keys::from_raw_representation_string("<f1>ZZ", None, None).unwrap();
//! assert_eq!(typed.raw_keys(), b"\x80\x6b\x31\x5a\x5a");
//! ```
//!
//! Focus changes and no-op events recorded by the editor are dropped when parsing raw
//! keys (see [`IGNORED_KEYSTROKES`]), so they never count toward the score.
//!
//! # Replay-diff
//!
//! [`replay_diff()`] applies every prefix of a [`Keys`] to a document through an injected
//! [`ApplyOracle`], and keeps only the prefixes after which the document changed. The
//! result pairs neighboring interesting prefixes for side by side display, and always
//! adds a `(first, last)` pair for a full diff.
//!
//! # Errors
//!
//! Every fallible operation returns [`KeysResult`], whose error type [`KeysError`] is a
//! [`miette::Diagnostic`], so callers that use [`miette::Result`] can just use `?`.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod codec;
pub mod common;
pub mod replay_diff;

// Re-export.
pub use codec::*;
pub use common::*;
pub use replay_diff::*;
