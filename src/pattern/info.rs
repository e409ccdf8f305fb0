//! Intermediate records produced while parsing a decimal pattern.
//!
//! A [`ParsedPatternInfo`] keeps the pattern text together with one
//! [`ParsedSubpatternInfo`] per `;`-separated half. Affixes and the padding
//! clause are stored as [`Endpoints`] into the pattern rather than copied.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::properties::PadPosition;

use super::affix::{self, AffixToken, SymbolKind};
use super::parser::PatternError;

/// A half-open `[start, end)` range of character offsets into the pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub start: usize,
    pub end: usize,
}

impl Endpoints {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Digit counts between grouping separators, newest first.
///
/// `current` counts digits since the last `,`. Each `,` shifts the slots
/// along; only three are kept, so `#,##,##,##0` and `#,##,##0` record the
/// same sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingSizes {
    pub current: u32,
    pub previous: Option<u32>,
    pub before_previous: Option<u32>,
}

impl GroupingSizes {
    pub fn shift(&mut self) {
        self.before_previous = self.previous;
        self.previous = Some(self.current);
        self.current = 0;
    }

    pub fn count_digit(&mut self) {
        self.current += 1;
    }

    /// Primary grouping size, present once a `,` has been seen.
    pub fn primary(&self) -> Option<u32> {
        self.previous.map(|_| self.current)
    }

    /// Secondary grouping size, present once two `,` have been seen.
    pub fn secondary(&self) -> Option<u32> {
        self.before_previous.and(self.previous)
    }
}

/// Base-10 accumulator for the rounding increment spelled out by the literal
/// digits of a pattern.
///
/// Fraction zeros are held back until a non-zero digit follows them, so
/// `0.50` and `0.5` accumulate the same value at the same scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundingAccumulator {
    unscaled: BigInt,
    scale: i64,
    pending_zeros: u32,
}

impl RoundingAccumulator {
    pub fn push_integer_digit(&mut self, digit: u32) {
        self.unscaled = &self.unscaled * 10u32 + digit;
    }

    pub fn push_fraction_digit(&mut self, digit: u32) {
        if digit == 0 {
            self.pending_zeros += 1;
            return;
        }
        for _ in 0..self.pending_zeros {
            self.unscaled *= 10u32;
        }
        self.unscaled = &self.unscaled * 10u32 + digit;
        self.scale += i64::from(self.pending_zeros) + 1;
        self.pending_zeros = 0;
    }

    /// The accumulated increment, or `None` when every digit was zero.
    pub fn to_decimal(&self) -> Option<BigDecimal> {
        if self.unscaled.is_zero() {
            None
        } else {
            Some(BigDecimal::new(self.unscaled.clone(), self.scale))
        }
    }
}

/// Counters and flags for one subpattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSubpatternInfo {
    pub grouping: GroupingSizes,
    pub integer_leading_hash_signs: u32,
    pub integer_trailing_hash_signs: u32,
    pub integer_numerals: u32,
    pub integer_at_signs: u32,
    pub integer_total: u32,
    pub fraction_numerals: u32,
    pub fraction_hash_signs: u32,
    pub fraction_total: u32,
    pub has_decimal: bool,
    pub has_currency_decimal: bool,
    /// Digit symbols, separators, decimal point and exponent characters.
    pub width_except_affixes: u32,
    pub padding_location: Option<PadPosition>,
    pub rounding: RoundingAccumulator,
    pub exponent_has_plus_sign: bool,
    pub exponent_zeros: u32,
    pub has_percent_sign: bool,
    pub has_per_mille_sign: bool,
    pub has_currency_sign: bool,
    pub has_minus_sign: bool,
    pub has_plus_sign: bool,
    pub prefix: Endpoints,
    pub suffix: Endpoints,
    /// The pad literal after `*`, quotes included.
    pub padding: Option<Endpoints>,
}

impl ParsedSubpatternInfo {
    pub fn note_symbol(&mut self, kind: SymbolKind) {
        match kind {
            SymbolKind::Percent => self.has_percent_sign = true,
            SymbolKind::PerMille => self.has_per_mille_sign = true,
            SymbolKind::Currency => self.has_currency_sign = true,
            SymbolKind::Minus => self.has_minus_sign = true,
            SymbolKind::Plus => self.has_plus_sign = true,
        }
    }

    pub fn has_exponent(&self) -> bool {
        self.exponent_zeros > 0
    }
}

/// Selects one of the four affix templates of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    PositivePrefix,
    PositiveSuffix,
    NegativePrefix,
    NegativeSuffix,
}

/// The result of [`super::parse_to_info`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPatternInfo {
    pub pattern: String,
    pub positive: ParsedSubpatternInfo,
    pub negative: Option<ParsedSubpatternInfo>,
}

impl ParsedPatternInfo {
    /// The pattern text covered by `range`.
    pub fn text(&self, range: Endpoints) -> String {
        self.pattern
            .chars()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    /// The template text of an affix, quotes and symbols intact.
    ///
    /// Negative affixes are `None` when the pattern has no negative
    /// subpattern.
    pub fn affix_pattern(&self, kind: AffixKind) -> Option<String> {
        let range = match kind {
            AffixKind::PositivePrefix => self.positive.prefix,
            AffixKind::PositiveSuffix => self.positive.suffix,
            AffixKind::NegativePrefix => self.negative.as_ref()?.prefix,
            AffixKind::NegativeSuffix => self.negative.as_ref()?.suffix,
        };
        Some(self.text(range))
    }

    /// Tokens of an affix template, or an empty list for a missing affix.
    pub fn affix_tokens(&self, kind: AffixKind) -> Result<Vec<AffixToken>, PatternError> {
        match self.affix_pattern(kind) {
            Some(text) => affix::tokenize(&text),
            None => Ok(Vec::new()),
        }
    }

    /// Resolved pad string of the positive subpattern, if it has one.
    pub fn padding_string(&self) -> Option<String> {
        self.positive
            .padding
            .map(|range| affix::unquote(&self.text(range)))
    }

    pub fn has_negative_subpattern(&self) -> bool {
        self.negative.is_some()
    }

    pub fn has_currency_sign(&self) -> bool {
        self.positive.has_currency_sign
            || self.negative.as_ref().is_some_and(|n| n.has_currency_sign)
    }

    pub fn positive_has_plus_sign(&self) -> bool {
        self.positive.has_plus_sign
    }

    pub fn negative_has_minus_sign(&self) -> bool {
        self.negative.as_ref().is_some_and(|n| n.has_minus_sign)
    }

    /// True when any affix contains an unquoted symbol of `kind`.
    pub fn contains_symbol(&self, kind: SymbolKind) -> bool {
        [
            AffixKind::PositivePrefix,
            AffixKind::PositiveSuffix,
            AffixKind::NegativePrefix,
            AffixKind::NegativeSuffix,
        ]
        .into_iter()
        .filter_map(|k| self.affix_pattern(k))
        .any(|text| affix::contains_symbol(&text, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_ring_keeps_three_slots() {
        let mut g = GroupingSizes::default();
        assert_eq!(g.primary(), None);
        g.count_digit();
        g.shift();
        assert_eq!(g.primary(), Some(0));
        assert_eq!(g.secondary(), None);
        g.count_digit();
        g.count_digit();
        g.shift();
        for _ in 0..3 {
            g.count_digit();
        }
        assert_eq!(g.primary(), Some(3));
        assert_eq!(g.secondary(), Some(2));
    }

    #[test]
    fn rounding_integer_digits() {
        let mut r = RoundingAccumulator::default();
        r.push_integer_digit(0);
        r.push_integer_digit(5);
        r.push_integer_digit(0);
        assert_eq!(r.to_decimal(), Some(BigDecimal::from(50i64)));
    }

    #[test]
    fn rounding_fraction_holds_back_zeros() {
        let mut r = RoundingAccumulator::default();
        r.push_integer_digit(0);
        r.push_fraction_digit(0);
        r.push_fraction_digit(5);
        r.push_fraction_digit(0);
        let d = r.to_decimal().unwrap();
        assert_eq!(d.as_bigint_and_exponent(), (BigInt::from(5), 2));
    }

    #[test]
    fn rounding_all_zero_is_none() {
        let mut r = RoundingAccumulator::default();
        r.push_integer_digit(0);
        r.push_fraction_digit(0);
        assert_eq!(r.to_decimal(), None);
    }

    #[test]
    fn endpoints_len() {
        let e = Endpoints { start: 2, end: 5 };
        assert_eq!(e.len(), 3);
        assert!(!e.is_empty());
        assert!(Endpoints::default().is_empty());
    }
}
