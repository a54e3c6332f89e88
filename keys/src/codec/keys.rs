// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

use super::{Keycode, encode_keycodes, is_ignored, keycode_for, normalize, parse_keycodes,
            representation_for, tokenize};
use crate::{KeysError, KeysResult};

/// An immutable sequence of keystrokes, held in all three of its forms at once.
///
/// Every constructor produces the same invariants:
/// 1. `keycodes` and `representations` have one entry per keystroke, and
///    `representations[i]` is the rendering of `keycodes[i]`.
/// 2. `raw_keys` is the canonical encoding of `keycodes` (see [`encode_keycodes`]).
/// 3. No keycode is in [`crate::IGNORED_KEYSTROKES`].
///
/// It is persisted as its list of representations, which is how answers are stored.
///
/// ```
/// use vimgolf_keys::Keys;
///
/// let keys = Keys::from_representations(["<esc>", "Z", "Z"]).unwrap();
/// assert_eq!(keys.representations(), ["<Esc>", "Z", "Z"]);
/// assert_eq!(keys.raw_keys(), b"\x1bZZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Keys {
    raw_keys: Vec<u8>,
    keycodes: Vec<Keycode>,
    representations: Vec<String>,
}

impl Keys {
    /// Decode a keylog written by `vim -W`. Ignored keystrokes are dropped, so
    /// [`Self::raw_keys`] won't contain them.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::TruncatedEscape`] if the keylog ends in the middle of an
    /// escape sequence.
    pub fn from_raw_bytes(raw_keys: &[u8]) -> KeysResult<Self> {
        let all = parse_keycodes(raw_keys)?;
        let total = all.len();
        let keycodes: Vec<Keycode> = all.into_iter().filter(|it| !is_ignored(*it)).collect();

        if keycodes.len() != total {
            tracing::debug!(
                message = "Dropped ignored keystrokes",
                dropped = %(total - keycodes.len())
            );
        }

        Ok(Self::from_keycodes(keycodes))
    }

    /// Build from representation tokens, eg: `["<C-V>", "G", "$"]`. Bracketed tokens
    /// are matched ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::UnknownRepresentation`] with the index of the first token
    /// that isn't in the keycode table.
    pub fn from_representations<I>(tokens: I) -> KeysResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keycodes = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                normalize(token.as_ref())
                    .and_then(|it| keycode_for(&it))
                    .map_err(|err| err.at_index(index))
            })
            .collect::<KeysResult<Vec<Keycode>>>()?;

        Ok(Self::from_keycodes(keycodes))
    }

    /// Build from a key sequence typed by a human, eg: `<C-V>G$A;<Esc>ZZ`. See
    /// [`tokenize`] for the meaning of `literal_lt` and `literal_gt`.
    ///
    /// # Errors
    ///
    /// - [`KeysError::ConfigError`] if both substitutes are the same character.
    /// - [`KeysError::UnknownRepresentation`] if a token isn't in the keycode table.
    pub fn from_raw_representation_string(
        input: &str,
        literal_lt: Option<char>,
        literal_gt: Option<char>,
    ) -> KeysResult<Self> {
        let tokens = tokenize(input, literal_lt, literal_gt)?;
        Self::from_representations(tokens)
    }

    /// Ignored keystrokes are filtered out here too, so that every constructor upholds
    /// the same invariants.
    #[must_use]
    pub fn from_keycodes(keycodes: impl IntoIterator<Item = Keycode>) -> Self {
        let keycodes: Vec<Keycode> =
            keycodes.into_iter().filter(|it| !is_ignored(*it)).collect();
        let raw_keys = encode_keycodes(&keycodes);
        let representations = keycodes
            .iter()
            .map(|it| representation_for(*it).into_owned())
            .collect();
        Self {
            raw_keys,
            keycodes,
            representations,
        }
    }

    #[must_use]
    pub fn raw_keys(&self) -> &[u8] { &self.raw_keys }

    #[must_use]
    pub fn keycodes(&self) -> &[Keycode] { &self.keycodes }

    #[must_use]
    pub fn representations(&self) -> &[String] { &self.representations }

    /// Number of keystrokes.
    #[must_use]
    pub fn score(&self) -> usize { self.keycodes.len() }

    #[must_use]
    pub fn len(&self) -> usize { self.keycodes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.keycodes.is_empty() }

    /// All the representations joined together, eg: `<Esc>ZZ`.
    #[must_use]
    pub fn representation_string(&self) -> String { self.representations.concat() }

    /// The first `count` keystrokes. A `count` past the end is clamped to [`Self::len`].
    #[must_use]
    pub fn prefix(&self, count: usize) -> Self {
        let count = count.min(self.len());
        Self {
            raw_keys: encode_keycodes(&self.keycodes[..count]),
            keycodes: self.keycodes[..count].to_vec(),
            representations: self.representations[..count].to_vec(),
        }
    }

    /// Every prefix from the empty one up to and including `self`, ie: `len() + 1`
    /// items.
    pub fn prefixes(&self) -> impl Iterator<Item = Keys> + '_ {
        (0..=self.len()).map(|count| self.prefix(count))
    }
}

impl Display for Keys {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for representation in &self.representations {
            f.write_str(representation)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for Keys {
    type Error = KeysError;

    fn try_from(value: Vec<String>) -> KeysResult<Self> { Self::from_representations(value) }
}

impl From<Keys> for Vec<String> {
    fn from(value: Keys) -> Self { value.representations }
}
