//! Recursive descent parser for decimal pattern strings.

use tracing::{debug, trace};

use crate::properties::{PadPosition, PropertyBag};

use super::affix;
use super::cursor::Cursor;
use super::info::*;

/// A pattern that does not follow the decimal pattern grammar.
///
/// `offset` is a character (not byte) index into the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub offset: usize,
    pub kind: PatternErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// A `'` with no closing quote; the offset is that of the opening quote.
    UnterminatedQuote,
    /// A literal was required but the pattern ended.
    UnexpectedEnd,
    /// A character left over after a complete pattern.
    UnexpectedChar(char),
    MultiplePadSpecifiers,
    MissingExponentDigits,
    /// `#` after a required digit in the integer part (`0#`).
    HashAfterDigit,
    /// `@` after a required digit (`0@`).
    AtSignAfterDigit,
    /// A required digit after `@` (`@0`).
    DigitAfterAtSign,
    /// `#` between two `@` (`@#@`).
    HashInsideAtSigns,
    /// A required digit after `#` in the fraction (`0.#0`).
    DigitAfterHash,
    /// A decimal separator in a significant digit pattern (`@@.#`).
    DecimalWithSignificant,
    /// `,` in a pattern that also has an exponent.
    GroupingWithExponent,
}

impl PatternError {
    pub fn new(offset: usize, kind: PatternErrorKind) -> Self {
        Self { offset, kind }
    }
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PatternErrorKind::UnterminatedQuote => write!(f, "Unterminated quote in pattern"),
            PatternErrorKind::UnexpectedEnd => {
                write!(f, "Expected a literal but found end of pattern")
            }
            PatternErrorKind::UnexpectedChar(c) => {
                write!(f, "Found unquoted special character {c:?}")
            }
            PatternErrorKind::MultiplePadSpecifiers => {
                write!(f, "Cannot have multiple pad specifiers")
            }
            PatternErrorKind::MissingExponentDigits => {
                write!(f, "Expected at least one '0' after 'E'")
            }
            PatternErrorKind::HashAfterDigit => {
                write!(f, "'#' cannot follow '0' before the decimal point")
            }
            PatternErrorKind::AtSignAfterDigit => write!(f, "Cannot mix '0' and '@'"),
            PatternErrorKind::DigitAfterAtSign => write!(f, "Cannot mix '@' and '0'"),
            PatternErrorKind::HashInsideAtSigns => {
                write!(f, "Cannot nest '#' inside a run of '@'")
            }
            PatternErrorKind::DigitAfterHash => {
                write!(f, "'0' cannot follow '#' after the decimal point")
            }
            PatternErrorKind::DecimalWithSignificant => {
                write!(f, "Significant digit patterns cannot have a decimal point")
            }
            PatternErrorKind::GroupingWithExponent => {
                write!(f, "Cannot have grouping separators in scientific notation")
            }
        }?;
        write!(f, " at offset {}", self.offset)
    }
}

impl std::error::Error for PatternError {}

/// When to ignore the rounding settings a pattern spells out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IgnoreRounding {
    #[default]
    Never,
    /// Ignore them when the positive subpattern has a currency sign; the
    /// currency's own rounding applies instead.
    IfCurrency,
    Always,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub ignore_rounding: IgnoreRounding,
}

/// Parse a decimal pattern into a fresh [`PropertyBag`].
pub fn parse(pattern: &str) -> Result<PropertyBag, PatternError> {
    parse_with(pattern, ParseOptions::default())
}

pub fn parse_with(pattern: &str, options: ParseOptions) -> Result<PropertyBag, PatternError> {
    let mut bag = PropertyBag::new();
    parse_into_with(pattern, &mut bag, options)?;
    Ok(bag)
}

/// Parse a decimal pattern into an existing bag.
///
/// Only the settings the pattern spells out are written, so a caller can
/// supply defaults beforehand (for example negative affixes, which are left
/// alone when the pattern has no `;` subpattern). Clear the bag first for a
/// fresh result. On error the bag may be partially written and should be
/// discarded.
pub fn parse_into(pattern: &str, bag: &mut PropertyBag) -> Result<(), PatternError> {
    parse_into_with(pattern, bag, ParseOptions::default())
}

pub fn parse_into_with(
    pattern: &str,
    bag: &mut PropertyBag,
    options: ParseOptions,
) -> Result<(), PatternError> {
    let info = parse_to_info(pattern)?;
    save_to_properties(&info, bag, options);
    debug!(pattern, properties = %bag.summary(), "parsed decimal pattern");
    Ok(())
}

/// Parse a decimal pattern into its per-subpattern records.
pub fn parse_to_info(pattern: &str) -> Result<ParsedPatternInfo, PatternError> {
    let mut parser = Parser {
        cursor: Cursor::new(pattern),
    };
    let (positive, negative) = parser.consume_pattern().inspect_err(|err| {
        trace!(pattern, %err, "rejected decimal pattern");
    })?;
    Ok(ParsedPatternInfo {
        pattern: pattern.to_string(),
        positive,
        negative,
    })
}

struct Parser {
    cursor: Cursor,
}

impl Parser {
    fn consume_pattern(
        &mut self,
    ) -> Result<(ParsedSubpatternInfo, Option<ParsedSubpatternInfo>), PatternError> {
        let mut positive = ParsedSubpatternInfo::default();
        self.consume_subpattern(&mut positive)?;

        let mut negative = None;
        if self.cursor.peek() == Some(';') {
            self.cursor.next(); // consume ';'
            // A trailing ';' does not start a negative subpattern.
            if self.cursor.peek().is_some() {
                let mut info = ParsedSubpatternInfo::default();
                self.consume_subpattern(&mut info)?;
                negative = Some(info);
            }
        }

        if let Some(c) = self.cursor.peek() {
            return Err(self.cursor.error(PatternErrorKind::UnexpectedChar(c)));
        }
        Ok((positive, negative))
    }

    fn consume_subpattern(&mut self, result: &mut ParsedSubpatternInfo) -> Result<(), PatternError> {
        self.consume_padding(result, PadPosition::BeforePrefix)?;
        result.prefix = self.consume_affix(result)?;
        self.consume_padding(result, PadPosition::AfterPrefix)?;
        self.consume_format(result)?;
        self.consume_exponent(result)?;
        self.consume_padding(result, PadPosition::BeforeSuffix)?;
        result.suffix = self.consume_affix(result)?;
        self.consume_padding(result, PadPosition::AfterSuffix)?;
        Ok(())
    }

    /// Parse an optional `*x` clause.
    fn consume_padding(
        &mut self,
        result: &mut ParsedSubpatternInfo,
        location: PadPosition,
    ) -> Result<(), PatternError> {
        if self.cursor.peek() != Some('*') {
            return Ok(());
        }
        if result.padding_location.is_some() {
            return Err(self.cursor.error(PatternErrorKind::MultiplePadSpecifiers));
        }
        result.padding_location = Some(location);
        self.cursor.next(); // consume '*'
        let start = self.cursor.offset();
        self.consume_literal()?;
        result.padding = Some(Endpoints {
            start,
            end: self.cursor.offset(),
        });
        Ok(())
    }

    /// Consume literals up to the next stopper, noting any symbols.
    fn consume_affix(&mut self, result: &mut ParsedSubpatternInfo) -> Result<Endpoints, PatternError> {
        let start = self.cursor.offset();
        while let Some(c) = self.cursor.peek() {
            if affix::is_literal_stopper(c) {
                break;
            }
            if let Some(kind) = affix::symbol_for(c) {
                result.note_symbol(kind);
            }
            self.consume_literal()?;
        }
        Ok(Endpoints {
            start,
            end: self.cursor.offset(),
        })
    }

    /// Consume one literal: a single character or a whole quoted run.
    fn consume_literal(&mut self) -> Result<(), PatternError> {
        match self.cursor.peek() {
            None => Err(self.cursor.error(PatternErrorKind::UnexpectedEnd)),
            Some('\'') => {
                let start = self.cursor.offset();
                self.cursor.next(); // consume opening quote
                loop {
                    match self.cursor.next() {
                        Some('\'') => return Ok(()),
                        Some(_) => {}
                        None => {
                            return Err(PatternError::new(
                                start,
                                PatternErrorKind::UnterminatedQuote,
                            ));
                        }
                    }
                }
            }
            Some(_) => {
                self.cursor.next();
                Ok(())
            }
        }
    }

    fn consume_format(&mut self, result: &mut ParsedSubpatternInfo) -> Result<(), PatternError> {
        self.consume_integer_format(result)?;
        let currency_decimal = match self.cursor.peek() {
            Some('.') => false,
            // A currency sign directly followed by a digit is the decimal
            // separator; otherwise it starts the suffix.
            Some('¤') if matches!(self.cursor.peek2(), Some('#' | '0'..='9')) => true,
            _ => return Ok(()),
        };
        if result.integer_at_signs > 0 {
            return Err(self.cursor.error(PatternErrorKind::DecimalWithSignificant));
        }
        self.cursor.next(); // consume '.' or '¤'
        if currency_decimal {
            result.has_currency_sign = true;
            result.has_currency_decimal = true;
        }
        result.has_decimal = true;
        result.width_except_affixes += 1;
        self.consume_fraction_format(result)
    }

    fn consume_integer_format(&mut self, result: &mut ParsedSubpatternInfo) -> Result<(), PatternError> {
        while let Some(c) = self.cursor.peek() {
            match c {
                ',' => {
                    result.grouping.shift();
                }
                '#' => {
                    if result.integer_numerals > 0 {
                        return Err(self.cursor.error(PatternErrorKind::HashAfterDigit));
                    }
                    result.grouping.count_digit();
                    if result.integer_at_signs > 0 {
                        result.integer_trailing_hash_signs += 1;
                    } else {
                        result.integer_leading_hash_signs += 1;
                    }
                    result.integer_total += 1;
                    result.rounding.push_integer_digit(0);
                }
                '@' => {
                    if result.integer_numerals > 0 {
                        return Err(self.cursor.error(PatternErrorKind::AtSignAfterDigit));
                    }
                    if result.integer_trailing_hash_signs > 0 {
                        return Err(self.cursor.error(PatternErrorKind::HashInsideAtSigns));
                    }
                    result.grouping.count_digit();
                    result.integer_at_signs += 1;
                    result.integer_total += 1;
                    result.rounding.push_integer_digit(0);
                }
                '0'..='9' => {
                    if result.integer_at_signs > 0 {
                        return Err(self.cursor.error(PatternErrorKind::DigitAfterAtSign));
                    }
                    result.grouping.count_digit();
                    result.integer_numerals += 1;
                    result.integer_total += 1;
                    result.rounding.push_integer_digit(digit_value(c));
                }
                _ => break,
            }
            result.width_except_affixes += 1;
            self.cursor.next();
        }
        Ok(())
    }

    fn consume_fraction_format(&mut self, result: &mut ParsedSubpatternInfo) -> Result<(), PatternError> {
        while let Some(c) = self.cursor.peek() {
            match c {
                '#' => {
                    result.fraction_hash_signs += 1;
                    result.rounding.push_fraction_digit(0);
                }
                '0'..='9' => {
                    if result.fraction_hash_signs > 0 {
                        return Err(self.cursor.error(PatternErrorKind::DigitAfterHash));
                    }
                    result.fraction_numerals += 1;
                    result.rounding.push_fraction_digit(digit_value(c));
                }
                _ => break,
            }
            result.fraction_total += 1;
            result.width_except_affixes += 1;
            self.cursor.next();
        }
        Ok(())
    }

    /// Parse an optional `E+00` clause.
    fn consume_exponent(&mut self, result: &mut ParsedSubpatternInfo) -> Result<(), PatternError> {
        if self.cursor.peek() != Some('E') {
            return Ok(());
        }
        if result.grouping.primary().is_some() {
            return Err(self.cursor.error(PatternErrorKind::GroupingWithExponent));
        }
        self.cursor.next(); // consume 'E'
        result.width_except_affixes += 1;
        if self.cursor.peek() == Some('+') {
            self.cursor.next();
            result.exponent_has_plus_sign = true;
            result.width_except_affixes += 1;
        }
        while self.cursor.peek() == Some('0') {
            self.cursor.next();
            result.exponent_zeros += 1;
            result.width_except_affixes += 1;
        }
        if result.exponent_zeros == 0 {
            return Err(self.cursor.error(PatternErrorKind::MissingExponentDigits));
        }
        Ok(())
    }
}

fn digit_value(c: char) -> u32 {
    c.to_digit(10).unwrap_or(0)
}

/// Reconcile parsed records into `bag`.
///
/// Settings the pattern does not mention are left as they were.
pub fn save_to_properties(info: &ParsedPatternInfo, bag: &mut PropertyBag, options: ParseOptions) {
    let positive = &info.positive;

    if let Some(primary) = positive.grouping.primary() {
        bag.grouping_size = Some(primary);
    }
    if let Some(secondary) = positive.grouping.secondary() {
        bag.secondary_grouping_size = Some(secondary);
    }

    let ignore_rounding = match options.ignore_rounding {
        IgnoreRounding::Never => false,
        IgnoreRounding::IfCurrency => positive.has_currency_sign,
        IgnoreRounding::Always => true,
    };
    if positive.integer_at_signs > 0 {
        bag.minimum_significant_digits = Some(positive.integer_at_signs);
        bag.maximum_significant_digits =
            Some(positive.integer_at_signs + positive.integer_trailing_hash_signs);
    } else if !ignore_rounding {
        bag.minimum_fraction_digits = Some(positive.fraction_numerals);
        bag.maximum_fraction_digits = Some(positive.fraction_total);
        if let Some(increment) = positive.rounding.to_decimal() {
            bag.rounding_interval = Some(increment);
        }
    }

    bag.minimum_integer_digits = Some(positive.integer_numerals);

    if positive.has_decimal && positive.fraction_total == 0 {
        bag.always_show_decimal = true;
    }
    if positive.has_currency_decimal {
        bag.currency_as_decimal = true;
    }

    if positive.has_exponent() {
        bag.exponent_show_plus_sign = positive.exponent_has_plus_sign;
        bag.exponent_digits = Some(positive.exponent_zeros);
        bag.maximum_integer_digits = Some(positive.integer_total);
    }

    if let Some(location) = positive.padding_location {
        let prefix = info.text(positive.prefix);
        let suffix = info.text(positive.suffix);
        let width = positive.width_except_affixes as usize
            + affix::literal_len(&prefix)
            + affix::literal_len(&suffix);
        bag.padding_width = Some(u32::try_from(width).unwrap_or(u32::MAX));
        bag.padding_string = info.padding_string();
        bag.padding_location = Some(location);
    }

    bag.positive_prefix_pattern = Some(info.text(positive.prefix));
    bag.positive_suffix_pattern = Some(info.text(positive.suffix));
    if let Some(negative) = &info.negative {
        bag.negative_prefix_pattern = Some(info.text(negative.prefix));
        bag.negative_suffix_pattern = Some(info.text(negative.suffix));
    }

    if positive.has_percent_sign {
        bag.magnitude_multiplier = Some(2);
    } else if positive.has_per_mille_sign {
        bag.magnitude_multiplier = Some(3);
    }
}
