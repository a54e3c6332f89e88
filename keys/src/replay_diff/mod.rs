// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Replay every prefix of a [`crate::Keys`] against a document, and keep only the
//! prefixes that changed it.
//!
//! ```text
//! prefix:     0      1      2      3
//! document:   A      A      B      C
//!             ▲             ▲      ▲
//! interesting {0, 2, 3}   pairs [(0, 2), (2, 3), (0, 3)]
//! ```

// Attach sources.
pub mod apply_oracle;
pub mod interesting_prefixes;
pub mod replay_diff_impl;

// Re-export.
pub use apply_oracle::*;
pub use interesting_prefixes::*;
pub use replay_diff_impl::*;
