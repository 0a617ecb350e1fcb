//! The eight concrete scenarios transcribed from spec.md §8, plus the pinned quirks called out
//! in DESIGN.md's Open Question decisions.

use jscan::{parse, Dialect, Error, Parser, Token, TokenKind};

fn tokens(n: usize) -> Vec<Token> {
    vec![Token::default(); n]
}

#[test]
fn scenario_1_object_with_two_pairs() {
    let input = br#"{"a":10,"b":true}"#;
    assert_eq!(input.len(), 18);

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let count = parse(&mut parser, input, Some(&mut storage)).unwrap();
    assert_eq!(count, 5);

    assert!(storage[0].kind.kind_is(TokenKind::OBJECT | TokenKind::VALUE));
    assert_eq!((storage[0].start, storage[0].end), (0, 18));
    assert_eq!(storage[0].size, 4);

    assert!(storage[1].kind.kind_is(TokenKind::STRING | TokenKind::KEY));
    assert_eq!((storage[1].start, storage[1].end), (2, 3));
    assert_eq!(storage[1].size, 0);
    assert_eq!(&input[storage[1].start..storage[1].end], b"a");

    assert!(storage[2].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!((storage[2].start, storage[2].end), (5, 7));
    assert_eq!(&input[storage[2].start..storage[2].end], b"10");

    assert!(storage[3].kind.kind_is(TokenKind::STRING | TokenKind::KEY));
    assert_eq!((storage[3].start, storage[3].end), (9, 10));
    assert_eq!(&input[storage[3].start..storage[3].end], b"b");

    assert!(storage[4].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!((storage[4].start, storage[4].end), (12, 16));
    assert_eq!(&input[storage[4].start..storage[4].end], b"true");
}

#[test]
fn scenario_2_nested_arrays() {
    let input = br#"[1,[2,3]]"#;
    assert_eq!(input.len(), 9);

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let count = parse(&mut parser, input, Some(&mut storage)).unwrap();
    assert_eq!(count, 5);

    assert!(storage[0].kind.kind_has_any(TokenKind::OBJECT));
    // scenario says "OBJECT count 0" meaning no object tokens appear at all; check explicitly.
    assert!(storage[..5].iter().all(|t| !t.kind.kind_has_any(TokenKind::OBJECT)));

    assert!(storage[0].kind.kind_is(TokenKind::ARRAY | TokenKind::VALUE));
    assert_eq!((storage[0].start, storage[0].end), (0, 9));
    assert_eq!(storage[0].size, 2);

    assert!(storage[1].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!((storage[1].start, storage[1].end), (1, 2));

    assert!(storage[2].kind.kind_is(TokenKind::ARRAY | TokenKind::VALUE));
    assert_eq!((storage[2].start, storage[2].end), (3, 8));
    assert_eq!(storage[2].size, 2);

    assert!(storage[3].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!((storage[3].start, storage[3].end), (4, 5));

    assert!(storage[4].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!((storage[4].start, storage[4].end), (6, 7));
}

#[test]
fn scenario_3_truncated_mid_primitive_is_part() {
    let input = br#"{"a":1"#;

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let err = parse(&mut parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(err, Error::Part(5));

    assert!(storage[0].kind.kind_has_any(TokenKind::OBJECT));
    assert_eq!(storage[0].end, jscan::NONE);
    assert!(storage[1].kind.kind_is(TokenKind::STRING | TokenKind::KEY));
    assert_eq!(&input[storage[1].start..storage[1].end], b"a");
}

#[test]
fn scenario_4_same_input_with_capacity_two_is_no_memory() {
    let input = br#"{"a":1"#;

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(2);
    let err = parse(&mut parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(err, Error::NoMemory(2));
}

#[test]
fn scenario_5_unquoted_key_invalid_in_strict_allowed_in_permissive() {
    let input = br#"{a:1}"#;

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let err = parse(&mut parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(err, Error::Invalid(1));

    let mut parser = Parser::new(Dialect::Permissive);
    let mut storage = tokens(8);
    let count = parse(&mut parser, input, Some(&mut storage)).unwrap();
    assert_eq!(count, 3);

    assert!(storage[0].kind.kind_has_any(TokenKind::OBJECT));
    assert!(storage[1].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::KEY));
    assert_eq!(&input[storage[1].start..storage[1].end], b"a");
    assert!(storage[2].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert_eq!(&input[storage[2].start..storage[2].end], b"1");
}

#[test]
fn scenario_6_missing_comma_invalid_in_strict_tolerated_in_permissive() {
    let input = br#"[1 2]"#;

    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let err = parse(&mut parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(err, Error::Invalid(3));

    let mut parser = Parser::new(Dialect::Permissive);
    let mut storage = tokens(8);
    let count = parse(&mut parser, input, Some(&mut storage)).unwrap();
    assert_eq!(count, 3);
    assert!(storage[1].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
    assert!(storage[2].kind.kind_is(TokenKind::PRIMITIVE | TokenKind::VALUE));
}

#[test]
fn scenario_7_counting_mode_matches_scenario_1() {
    let input = br#"{"a":10,"b":true}"#;
    let mut parser = Parser::new(Dialect::Strict);
    let count = parse(&mut parser, input, None).unwrap();
    assert_eq!(count, 5);
}

#[test]
fn scenario_8_round_trip_byte_ranges() {
    let input = br#"{"a":10,"b":true}"#;
    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    parse(&mut parser, input, Some(&mut storage)).unwrap();

    assert_eq!(&input[storage[1].start..storage[1].end], b"a");
    assert_eq!(&input[storage[2].start..storage[2].end], b"10");
    assert_eq!(&input[storage[3].start..storage[3].end], b"b");
    assert_eq!(&input[storage[4].start..storage[4].end], b"true");
}

// --- Pinned quirks (DESIGN.md Open Question decisions) ---

/// §9's observed quirk: a permissive comma-repair relies on the last two tokens being a KEY/VALUE
/// pair. Nested containers still resolve `toksuper` back to the right enclosing container via
/// `Parser::container_of`/the explicit repair rather than derailing — this pins the well-behaved
/// case so a future change can't silently break it.
#[test]
fn quirk_permissive_missing_comma_inside_nested_object() {
    let input = br#"{"a":1 "b":2}"#;
    let mut parser = Parser::new(Dialect::Permissive);
    let mut storage = tokens(8);
    let count = parse(&mut parser, input, Some(&mut storage)).unwrap();
    assert!(count >= 5);
    assert!(storage[0].kind.kind_has_any(TokenKind::OBJECT));
    assert_eq!(storage[0].size, 4);
}

/// §9: strict mode can never set KEY on a non-string token (only the string sub-parser assigns
/// it); permissive mode assigns KEY only when `:` is actually observed, so a trailing unquoted
/// key without a colon stays flagged VALUE instead.
#[test]
fn quirk_permissive_trailing_key_without_colon_stays_value() {
    let input = br#"{"a":1,b"#;
    let mut parser = Parser::new(Dialect::Permissive);
    let mut storage = tokens(8);
    // No closing brace: the object itself is still open, so this is Part at the object's own
    // start (0) — but the trailing unquoted run must still have been tokenized as a plain VALUE
    // (never KEY), since no `:` ever followed it to flip it.
    let err = parse(&mut parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(err, Error::Part(0));
    let trailing = storage
        .iter()
        .find(|t| t.kind.kind_has_any(TokenKind::PRIMITIVE) && t.start == 7)
        .expect("trailing primitive token");
    assert!(trailing.kind.kind_has_any(TokenKind::VALUE));
    assert!(!trailing.kind.kind_has_any(TokenKind::KEY));
}

/// §3/§9: `size` on an object counts keys and values separately, not key-value pairs.
#[test]
fn quirk_object_size_counts_keys_and_values_separately() {
    let input = br#"{"a":1,"b":2}"#;
    let mut parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    parse(&mut parser, input, Some(&mut storage)).unwrap();
    // Two key-value pairs -> size 4, not 2.
    assert_eq!(storage[0].size, 4);
}

/// §4.1/P5: a mismatched closing bracket must be `Invalid` in counting mode exactly as it is with
/// a real buffer — counting mode runs the full grammar, it just doesn't write tokens.
#[test]
fn counting_mode_rejects_mismatched_close_bracket_like_real_parse() {
    let input = br#"{]"#;

    let mut counting_parser = Parser::new(Dialect::Strict);
    let counting_err = parse(&mut counting_parser, input, None).unwrap_err();
    assert_eq!(counting_err, Error::Invalid(1));

    let mut real_parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(4);
    let real_err = parse(&mut real_parser, input, Some(&mut storage)).unwrap_err();
    assert_eq!(real_err, Error::Invalid(1));
}

/// Same check one level deeper, to confirm the counting-mode shadow stack (not just a single
/// open/close) tracks nested container kinds correctly.
#[test]
fn counting_mode_rejects_mismatched_close_bracket_when_nested() {
    let input = br#"{"a":[1,2}"#;

    let mut counting_parser = Parser::new(Dialect::Strict);
    let counting_err = parse(&mut counting_parser, input, None).unwrap_err();

    let mut real_parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let real_err = parse(&mut real_parser, input, Some(&mut storage)).unwrap_err();

    assert_eq!(counting_err, real_err);
    assert_eq!(real_err, Error::Invalid(9));
}

/// §4.1/P5: an unquoted key straight after a comma inside an object must be `Invalid` in counting
/// mode exactly as it is with a real buffer. Regression test for a bug where `key_or_value`,
/// `dispatch_colon`, and `dispatch_comma` validated KEY/DELIMITER grammar only when a real token
/// array was present, silently accepting this input in counting mode (see DESIGN.md).
#[test]
fn counting_mode_rejects_unquoted_key_after_comma_like_real_parse() {
    let input = br#"{"a":1,1:2}"#;

    let mut counting_parser = Parser::new(Dialect::Strict);
    let counting_err = parse(&mut counting_parser, input, None).unwrap_err();

    let mut real_parser = Parser::new(Dialect::Strict);
    let mut storage = tokens(8);
    let real_err = parse(&mut real_parser, input, Some(&mut storage)).unwrap_err();

    assert_eq!(counting_err, real_err);
    assert_eq!(real_err, Error::Invalid(7));
}
