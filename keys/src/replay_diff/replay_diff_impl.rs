// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use futures_util::{StreamExt as _, TryStreamExt as _, stream};

use super::{ApplyOracle, find_interesting_prefixes, label_for_prefix,
            pair_interesting_prefixes};
use crate::{Keys, KeysError, KeysResult};

/// Separates a label from the document in a [`DisplayBlock`].
pub const DISPLAY_BLOCK_SEPARATOR: &str = "----------------------";

/// A `u16` so it can be used directly as a default for command line flags.
pub const DEFAULT_MAX_WORKERS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayDiffOptions {
    /// How many oracle calls can be in flight at once. `0` is treated as `1`.
    pub max_workers: usize,
}

impl Default for ReplayDiffOptions {
    fn default() -> Self {
        Self {
            max_workers: usize::from(DEFAULT_MAX_WORKERS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayDiffReport {
    /// `documents[i]` is the document after applying prefix `i`, for every prefix.
    pub documents: Vec<Vec<u8>>,
    /// Ascending prefix indices, always including `0` and `N`.
    pub interesting: Vec<usize>,
    /// Neighboring interesting prefixes, then `(first, last)`.
    pub pairs: Vec<(usize, usize)>,
    /// `labels[i]` is the label of `interesting[i]`.
    pub labels: Vec<String>,
}

/// One interesting prefix, ready to be written to a file and shown side by side with
/// its neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBlock {
    pub prefix_index: usize,
    pub label: String,
    pub document: Vec<u8>,
}

impl DisplayBlock {
    /// The label, a separator line, and then the document.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = format!("{}\n{DISPLAY_BLOCK_SEPARATOR}\n", self.label);
        let mut acc = Vec::with_capacity(header.len() + self.document.len());
        acc.extend_from_slice(header.as_bytes());
        acc.extend_from_slice(&self.document);
        acc
    }
}

impl ReplayDiffReport {
    /// Reduce the documents for every prefix of `keys` into a report. `documents` must
    /// have `keys.len() + 1` items.
    #[must_use]
    pub fn new(keys: &Keys, documents: Vec<Vec<u8>>) -> Self {
        let interesting = find_interesting_prefixes(&documents);
        let pairs = pair_interesting_prefixes(&interesting);
        let labels = interesting
            .iter()
            .map(|&prefix_index| label_for_prefix(keys, prefix_index))
            .collect();
        Self {
            documents,
            interesting,
            pairs,
            labels,
        }
    }

    /// One block per interesting prefix, in ascending prefix order.
    #[must_use]
    pub fn display_blocks(&self) -> Vec<DisplayBlock> {
        self.interesting
            .iter()
            .zip(&self.labels)
            .filter_map(|(&prefix_index, label)| {
                Some(DisplayBlock {
                    prefix_index,
                    label: label.clone(),
                    document: self.documents.get(prefix_index)?.clone(),
                })
            })
            .collect()
    }

    /// Position of `prefix_index` in [`Self::interesting`].
    #[must_use]
    pub fn position_of(&self, prefix_index: usize) -> Option<usize> {
        self.interesting.binary_search(&prefix_index).ok()
    }
}

/// Apply every prefix of `keys` (from empty to full) with `oracle`, then keep only the
/// prefixes that changed the document.
///
/// At most `options.max_workers` oracle calls run at once, and their results are
/// collected in prefix order. The documents are compared only after every prefix has a
/// result.
///
/// # Errors
///
/// The first oracle failure aborts the whole replay with [`KeysError::OracleFailure`].
/// No partial report is returned.
#[tracing::instrument(skip_all, fields(keys = %keys, max_workers = options.max_workers))]
pub async fn replay_diff(
    keys: &Keys,
    oracle: &impl ApplyOracle,
    options: ReplayDiffOptions,
) -> KeysResult<ReplayDiffReport> {
    let max_workers = options.max_workers.max(1);

    let documents: Vec<Vec<u8>> = stream::iter(keys.prefixes().enumerate())
        .map(|(prefix_index, prefix)| apply_prefix(oracle, prefix_index, prefix))
        .buffered(max_workers)
        .try_collect()
        .await?;

    let report = ReplayDiffReport::new(keys, documents);

    tracing::debug!(
        message = "Replay-diff done",
        interesting = ?report.interesting,
        pairs = ?report.pairs
    );

    Ok(report)
}

async fn apply_prefix(
    oracle: &impl ApplyOracle,
    prefix_index: usize,
    prefix: Keys,
) -> KeysResult<Vec<u8>> {
    match oracle.apply(prefix_index, &prefix).await {
        Ok(document) => {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Applied prefix",
                prefix_index = %prefix_index,
                document_len = %document.len()
            );
            Ok(document)
        }
        Err(report) => Err(KeysError::OracleFailure {
            prefix_index,
            reason: report
                .chain()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(": "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::{AtomicUsize, Ordering},
              time::Duration};

    use super::*;
    use crate::assert_eq2;

    /// Returns `documents[prefix_index]`.
    struct FixedDocuments(Vec<&'static str>);

    impl ApplyOracle for FixedDocuments {
        async fn apply(&self, prefix_index: usize, _: &Keys) -> miette::Result<Vec<u8>> {
            Ok(self.0[prefix_index].as_bytes().to_vec())
        }
    }

    /// Echoes the representation of the prefix, and fails for `fail_at`.
    struct Echo {
        fail_at: Option<usize>,
        calls: AtomicUsize,
    }

    impl ApplyOracle for Echo {
        async fn apply(&self, prefix_index: usize, prefix: &Keys) -> miette::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(prefix_index) {
                return Err(miette::miette!("editor exited with status 1"))
                    .map_err(|err| err.wrap_err("vim failed"));
            }
            Ok(prefix.to_string().into_bytes())
        }
    }

    /// Earlier prefixes take longer, and the max number of concurrent calls is tracked.
    #[derive(Default)]
    struct Slow {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ApplyOracle for Slow {
        async fn apply(&self, prefix_index: usize, _: &Keys) -> miette::Result<Vec<u8>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let delay = 10_u64.saturating_sub(prefix_index as u64 * 2);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![u8::try_from(prefix_index % 2).unwrap()])
        }
    }

    fn keys(input: &str) -> Keys { Keys::from_raw_representation_string(input, None, None).unwrap() }

    #[tokio::test]
    async fn test_unchanged_prefix_is_not_interesting() {
        let keys = keys("xZ");
        let oracle = FixedDocuments(vec!["A", "A", "B"]);

        let report = replay_diff(&keys, &oracle, ReplayDiffOptions::default())
            .await
            .unwrap();

        assert_eq2!(report.interesting, [0, 2]);
        assert_eq2!(report.pairs, [(0, 2), (0, 2)]);
        assert_eq2!(report.labels, ["(IN)", "xZ (OUT)"]);
        assert_eq2!(report.documents, [b"A".to_vec(), b"A".to_vec(), b"B".to_vec()]);
    }

    #[tokio::test]
    async fn test_every_prefix_changes() {
        let keys = keys("<Esc>ZZ");
        let oracle = Echo {
            fail_at: None,
            calls: AtomicUsize::new(0),
        };

        let report = replay_diff(&keys, &oracle, ReplayDiffOptions { max_workers: 2 })
            .await
            .unwrap();

        assert_eq2!(oracle.calls.load(Ordering::SeqCst), 4);
        assert_eq2!(report.interesting, [0, 1, 2, 3]);
        assert_eq2!(report.pairs, [(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq2!(report.labels, ["(IN)", "<Esc>", "<Esc>Z", "<Esc>ZZ (OUT)"]);
    }

    #[tokio::test]
    async fn test_oracle_failure_aborts() {
        let keys = keys("abc");
        let oracle = Echo {
            fail_at: Some(2),
            calls: AtomicUsize::new(0),
        };

        let result = replay_diff(&keys, &oracle, ReplayDiffOptions { max_workers: 1 }).await;

        assert_eq2!(
            result,
            Err(KeysError::OracleFailure {
                prefix_index: 2,
                reason: "vim failed: editor exited with status 1".into(),
            })
        );
        // Fail fast, prefix 3 is never applied.
        assert_eq2!(oracle.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_keys() {
        let oracle = FixedDocuments(vec!["A"]);

        let report = replay_diff(&Keys::default(), &oracle, ReplayDiffOptions::default())
            .await
            .unwrap();

        assert_eq2!(report.interesting, [0]);
        assert_eq2!(report.pairs, [(0, 0)]);
        assert_eq2!(report.labels, ["(IN)"]);
    }

    #[tokio::test]
    async fn test_results_are_in_prefix_order_and_bounded() {
        let keys = keys("abcd");
        let oracle = Slow::default();

        let report = replay_diff(&keys, &oracle, ReplayDiffOptions { max_workers: 2 })
            .await
            .unwrap();

        assert_eq2!(
            report.documents,
            [vec![0_u8], vec![1], vec![0], vec![1], vec![0]]
        );
        assert!(oracle.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_workers_still_runs() {
        let keys = keys("a");
        let oracle = FixedDocuments(vec!["A", "B"]);

        let report = replay_diff(&keys, &oracle, ReplayDiffOptions { max_workers: 0 })
            .await
            .unwrap();

        assert_eq2!(report.interesting, [0, 1]);
    }

    #[test]
    fn test_default_options() {
        assert_eq2!(ReplayDiffOptions::default().max_workers, 4);
    }

    #[test]
    fn test_display_blocks() {
        let keys = keys("xZ");
        let documents = vec![b"A\n".to_vec(), b"A\n".to_vec(), b"B\n".to_vec()];
        let report = ReplayDiffReport::new(&keys, documents);

        let blocks = report.display_blocks();
        assert_eq2!(blocks.len(), 2);
        assert_eq2!(
            String::from_utf8(blocks[0].to_bytes()).unwrap(),
            "(IN)\n----------------------\nA\n"
        );
        assert_eq2!(
            String::from_utf8(blocks[1].to_bytes()).unwrap(),
            "xZ (OUT)\n----------------------\nB\n"
        );
        assert_eq2!(report.position_of(2), Some(1));
        assert_eq2!(report.position_of(1), None);
    }
}
