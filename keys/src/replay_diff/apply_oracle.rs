// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Keys;

/// Applies a prefix of keystrokes to the input document and returns the resulting
/// document. This is how the replay-diff engine talks to an editor, and it is injected
/// so tests can use a fake one.
///
/// Implementations should not assume the calls arrive in index order, since several
/// prefixes can be in flight at once (see [`crate::ReplayDiffOptions::max_workers`]).
/// Each call must be independent: the result for a prefix can only depend on the
/// input document and `prefix`.
#[allow(
    async_fn_in_trait,
    reason = "Futures are polled by a single task, so they don't need to be Send"
)]
pub trait ApplyOracle {
    /// `prefix_index` is the number of keystrokes in `prefix`, and is unique for each
    /// call during one replay-diff.
    async fn apply(&self, prefix_index: usize, prefix: &Keys) -> miette::Result<Vec<u8>>;
}
