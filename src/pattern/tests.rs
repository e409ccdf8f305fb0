use super::*;
use crate::properties::{PadPosition, PropertyBag};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Patterns whose settings survive a serialize and re-parse.
const CANONICAL_PATTERNS: &[&str] = &[
    "#",
    "0",
    "#,##0.00",
    "#,##0.0000",
    "#,##,##0",
    "#,###,##0",
    "#,##0,",
    "0.0##",
    "0.",
    "@@#",
    "#@@##",
    "@",
    "#,##0.05",
    "0.50",
    "#,#50",
    "#,##5,000",
    "##0.###E+00",
    "0.###E0",
    "¤#,##0.00",
    "#,##0.00 ¤¤",
    "¤¤¤ 0",
    "#,##0%",
    "‰0",
    "'#'0'''s'",
    "#,##0.00;(#,##0.00)",
    "#,##0.00;#",
    "+0;-0",
    "0;",
    "*x00.00",
    "$*x#,##0'AB'",
    "0*x%",
    "0%*''",
    "* ##0",
    "*'ab'0",
    "*x0E0",
    "0¤00",
    "*x.00",
    ".00E0",
    "*x,0",
    "*x",
    "$*x",
    "*x#,#,#,0",
    ",",
    ",,",
    "#,@@#",
    "@,@#",
    "0E0E",
    "0;#E0E",
    "#*#",
    "a*xb",
];

fn assert_idempotent(pattern: &str) {
    let first = parse(pattern).unwrap_or_else(|e| panic!("{pattern:?}: {e}"));
    let normalized = serialize(&first);
    let second = parse(&normalized).unwrap_or_else(|e| panic!("{normalized:?}: {e}"));
    assert_eq!(first, second, "{pattern:?} normalized to {normalized:?}");
}

#[test]
fn test_serialize_then_parse_is_idempotent() {
    for pattern in CANONICAL_PATTERNS {
        assert_idempotent(pattern);
    }
}

#[test]
fn test_canonical_forms() {
    let cases = [
        ("#,##0.00", "#,##0.00"),
        ("#,#,##,###,##0", "#,###,##0"),
        ("#,##0.00;(#,##0.00)", "#,##0.00;(#)"),
        ("00.00E0", "00.00E0"),
        ("'$'0", "'$'0"),
        ("0;", "0"),
        ("*x0000", "*x0000"),
        ("*x.00", "*x.00"),
        (".00E0", ".00E0"),
        ("*x,0", "*x,0"),
        ("*x#,##0", "*x#,##0"),
        ("*x#,#,#,0", "*x###,#,0"),
        ("$*x", "$*x"),
        ("0,0,0,0", "00,0,0"),
        ("0;#E0E", "0;#* E"),
    ];
    for (input, expected) in cases {
        assert_eq!(serialize(&parse(input).unwrap()), expected, "input: {input:?}");
    }
}

#[test]
fn test_ambiguous_digit_orders_are_rejected() {
    for pattern in ["5#", "1,#", "@0", "0@", "@#@", "0.#5", "@@.#", ",0E0", "#,##0E0"] {
        assert!(parse(pattern).is_err(), "{pattern:?} should not parse");
    }
}

#[test]
fn test_extra_hashes_normalize_away() {
    assert_eq!(serialize(&parse("###0.00").unwrap()), "0.00");
    assert_eq!(serialize(&parse("#,######0").unwrap()), "#,######0");
}

#[test]
fn test_grouping_round_trip() {
    let bag = parse("#,##,##0").unwrap();
    assert_eq!(bag.grouping_size, Some(3));
    assert_eq!(bag.secondary_grouping_size, Some(2));
    let normalized = serialize(&bag);
    assert_eq!(normalized, "#,##,##0");
    let again = parse(&normalized).unwrap();
    assert_eq!(again.grouping_size, Some(3));
    assert_eq!(again.secondary_grouping_size, Some(2));
}

#[test]
fn test_significant_mode_excludes_fraction_mode() {
    let bag = parse("@@#").unwrap();
    assert_eq!(bag.minimum_significant_digits, Some(2));
    assert_eq!(bag.maximum_significant_digits, Some(3));
    assert_eq!(bag.minimum_fraction_digits, None);
    assert_eq!(bag.maximum_fraction_digits, None);
    assert_eq!(bag.rounding_interval, None);
}

#[test]
fn test_rounding_interval_is_exact() {
    let bag = parse("#,##0.05").unwrap();
    assert_eq!(
        bag.rounding_interval,
        Some(BigDecimal::from_str("0.05").unwrap())
    );
}

#[test]
fn test_absent_negative_subpattern_leaves_bag_alone() {
    let mut bag = PropertyBag {
        negative_prefix: Some("X".to_string()),
        ..PropertyBag::default()
    };
    parse_into("#,##0.00", &mut bag).unwrap();
    assert_eq!(bag.negative_prefix.as_deref(), Some("X"));
    assert_eq!(bag.negative_prefix_pattern, None);
    assert_eq!(bag.grouping_size, Some(3));
}

#[test]
fn test_resolved_prefix_escaping() {
    let quoted = PropertyBag {
        positive_prefix: Some("a'b".to_string()),
        ..PropertyBag::default()
    };
    assert!(serialize(&quoted).starts_with("'a''b'"));

    let plain = PropertyBag {
        positive_prefix: Some("$".to_string()),
        ..PropertyBag::default()
    };
    assert_eq!(serialize(&plain), "$#");
}

#[test]
fn test_escaped_prefix_reads_back() {
    let bag = PropertyBag {
        minimum_integer_digits: Some(1),
        positive_prefix: Some("a'b".to_string()),
        ..PropertyBag::default()
    };
    let reparsed = parse(&serialize(&bag)).unwrap();
    assert_eq!(reparsed.positive_prefix_pattern.as_deref(), Some("'a''b'"));
    assert_eq!(affix::unquote("'a''b'"), "a'b");
}

#[test]
fn test_oversized_settings_are_bounded() {
    let bag = PropertyBag {
        maximum_integer_digits: Some(1_000_000_000),
        maximum_fraction_digits: Some(1_000_000_000),
        ..PropertyBag::default()
    };
    let out = serialize(&bag);
    assert!(out.chars().count() <= 2 * DOS_MAX as usize + 1, "{}", out.len());
}

#[test]
fn test_padding_width_counts_number_field() {
    let bag = parse("*x00.00").unwrap();
    assert_eq!(bag.padding_width, Some(5));
    assert_eq!(bag.padding_location, Some(PadPosition::BeforePrefix));
}

#[test]
fn test_unterminated_quote_reports_quote_offset() {
    let err = parse("#,##0.00'").unwrap_err();
    assert_eq!(err.kind, PatternErrorKind::UnterminatedQuote);
    assert_eq!(err.offset, 8);
}

#[test]
fn test_display_serializes() {
    let bag = parse("#,##0.00").unwrap();
    assert_eq!(bag.to_string(), "#,##0.00");
}

#[test]
fn test_info_affix_tokens() {
    let info = parse_to_info("¤¤ #,##0.00;-'x'#").unwrap();
    assert_eq!(
        info.affix_tokens(AffixKind::PositivePrefix).unwrap(),
        vec![AffixToken::Currency(2), AffixToken::Literal(' ')]
    );
    assert_eq!(
        info.affix_tokens(AffixKind::NegativePrefix).unwrap(),
        vec![AffixToken::Minus, AffixToken::Literal('x')]
    );
    assert!(info.contains_symbol(SymbolKind::Currency));
    assert!(!info.contains_symbol(SymbolKind::Percent));
}
