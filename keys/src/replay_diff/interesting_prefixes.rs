// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Keys;

/// Label for the empty prefix.
pub const INPUT_LABEL: &str = "(IN)";

/// Suffix of the label for the full sequence.
pub const OUTPUT_LABEL_SUFFIX: &str = " (OUT)";

/// `documents[i]` is the document after applying prefix `i`, for every prefix `0..=N`.
/// Returns the ascending prefix indices after which the document changed, plus `0` and
/// `N`. An empty `documents` returns an empty list.
#[must_use]
pub fn find_interesting_prefixes<T: AsRef<[u8]>>(documents: &[T]) -> Vec<usize> {
    let Some(last) = documents.len().checked_sub(1) else {
        return vec![];
    };

    let mut acc = vec![0];
    for (index, window) in documents.windows(2).enumerate() {
        if window[0].as_ref() != window[1].as_ref() {
            acc.push(index + 1);
        }
    }
    if acc.last() != Some(&last) {
        acc.push(last);
    }
    acc
}

/// Neighboring pairs of `interesting`, followed by `(first, last)` for the full diff.
/// A single interesting prefix is paired with itself.
#[must_use]
pub fn pair_interesting_prefixes(interesting: &[usize]) -> Vec<(usize, usize)> {
    let (Some(&first), Some(&last)) = (interesting.first(), interesting.last()) else {
        return vec![];
    };

    let mut acc: Vec<(usize, usize)> = interesting
        .windows(2)
        .map(|window| (window[0], window[1]))
        .collect();
    acc.push((first, last));
    acc
}

/// - `0` → `(IN)`, even when `keys` is empty.
/// - `keys.len()` → `<all keys> (OUT)`.
/// - anything else → the keys in that prefix, eg: `<Esc>Z`.
#[must_use]
pub fn label_for_prefix(keys: &Keys, prefix_index: usize) -> String {
    if prefix_index == 0 {
        INPUT_LABEL.to_string()
    } else if prefix_index >= keys.len() {
        format!("{}{OUTPUT_LABEL_SUFFIX}", keys.representation_string())
    } else {
        keys.representations()[..prefix_index].concat()
    }
}
