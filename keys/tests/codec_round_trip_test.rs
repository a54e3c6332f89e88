// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use vimgolf_keys::{IGNORED_KEYSTROKES, KEYCODE_TABLE, Keycode, Keys, KeysError,
                   assert_eq2, encode_keycodes, keycode_for, representation_for};

/// Keycodes whose representation parses back to a different keycode.
fn is_shadowed(keycode: Keycode) -> bool {
    KEYCODE_TABLE
        .collisions()
        .iter()
        .any(|it| it.shadowed == keycode)
}

#[test]
fn test_every_table_keycode_round_trips_through_representations() {
    let keycodes: Vec<Keycode> = KEYCODE_TABLE
        .iter()
        .map(|(keycode, _)| keycode)
        .filter(|it| !is_shadowed(*it))
        .collect();
    let raw_keys = encode_keycodes(&keycodes);

    let from_raw = Keys::from_raw_bytes(&raw_keys).unwrap();
    assert_eq2!(from_raw.keycodes(), keycodes.as_slice());

    let from_representations = Keys::from_representations(from_raw.representations()).unwrap();
    assert_eq2!(from_representations.raw_keys(), raw_keys.as_slice());
}

#[test]
fn test_shadowed_keycodes_parse_to_their_winner() {
    for collision in KEYCODE_TABLE.collisions() {
        let rendered = representation_for(collision.shadowed);
        assert_eq2!(rendered, collision.representation.as_str());
        assert_eq2!(keycode_for(&rendered).unwrap(), collision.winner);
    }
}

#[test]
fn test_typical_solution() {
    let raw_keys = b"\x80\xfd\x62ggdG\x80kb:wq\r\x80\xfd\x63";
    let keys = Keys::from_raw_bytes(raw_keys).unwrap();

    assert_eq2!(keys.representation_string(), "ggdG<BS>:wq<CR>");
    assert_eq2!(keys.score(), 9);
    assert!(
        keys.keycodes()
            .iter()
            .all(|it| !IGNORED_KEYSTROKES.contains(it))
    );

    let typed = Keys::from_raw_representation_string("ggdG<bs>:wq<cr>", None, None).unwrap();
    assert_eq2!(typed, keys);
}

#[test]
fn test_persisted_answer_round_trips() {
    let keys = Keys::from_raw_representation_string("<C-V>G$A;<Esc>ZZ", None, None).unwrap();
    let json = serde_json::to_string(&keys).unwrap();
    let back: Keys = serde_json::from_str(&json).unwrap();
    assert_eq2!(back, keys);
}

#[test]
fn test_errors_convert_into_miette_reports() {
    fn run() -> miette::Result<Keys> {
        let keys = Keys::from_raw_representation_string("<Esc>", Some('x'), Some('x'))?;
        Ok(keys)
    }
    let report = run().unwrap_err();
    assert_eq2!(
        report.downcast_ref::<KeysError>(),
        Some(&KeysError::ConfigError { literal: 'x' })
    );
}
