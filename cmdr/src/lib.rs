// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # vimgolf
//!
//! Command line tools built on [`vimgolf_keys`]:
//!
//! | Command   | What it does                                                          |
//! |-----------|-----------------------------------------------------------------------|
//! | `keys`    | Parse a typed key sequence, and show its keystrokes and score         |
//! | `log`     | Decode a keylog written by `vim -W`                                   |
//! | `replay`  | Replay a keylog against an input file through vim                     |
//! | `inspect` | Replay every prefix of a key sequence, and show the ones that changed |
//! |           | the document in a side by side diff                                   |
//! | `play`    | Edit a copy of an input file, then score the keystrokes and check the |
//! |           | result against the expected output                                    |
//!
//! The editor is `vim` unless the `GOLF_VIM` environment variable names another one.
//! Every command accepts `--enable-logging` to write debug logs to the file returned by
//! [`try_get_log_file_path`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod clap_config;
pub mod common;
pub mod config;
pub mod editor;
pub mod inspect;
pub mod keys_report;
pub mod log_support;
pub mod play;

// Re-export.
pub use clap_config::*;
pub use common::*;
pub use config::*;
pub use editor::*;
pub use inspect::*;
pub use keys_report::*;
pub use log_support::*;
pub use play::*;
