//! Serialize a [`PropertyBag`] back into a canonical decimal pattern.
//!
//! The output re-parses to the same settings, though it need not match the
//! pattern the bag was parsed from character for character.

use std::iter::repeat_n;

use num_traits::Zero;
use tracing::{debug, trace};

use crate::properties::{PadPosition, PropertyBag};

use super::affix;

/// Upper bound applied to every numeric setting before it sizes the output.
pub const DOS_MAX: u32 = 100;

/// Grouping as the parser reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    None,
    Single(u32),
    /// Primary and secondary sizes.
    Repeating { first: u32, interval: u32 },
}

impl Grouping {
    fn from_sizes(primary: Option<u32>, secondary: Option<u32>) -> Self {
        match (primary, secondary) {
            (Some(first), Some(interval)) => Grouping::Repeating { first, interval },
            (Some(size), None) | (None, Some(size)) => Grouping::Single(size),
            (None, None) => Grouping::None,
        }
    }

    /// Separator positions, each counted as the number of integer digits to
    /// its right. The parser derives both sizes from the last two
    /// separators, so a repeating grouping is written with exactly two.
    fn separators(self) -> Vec<i64> {
        match self {
            Grouping::None => Vec::new(),
            Grouping::Single(size) => vec![i64::from(size)],
            Grouping::Repeating { first, interval } => {
                vec![i64::from(first), i64::from(first) + i64::from(interval)]
            }
        }
    }
}

fn clamp(field: &'static str, value: Option<u32>) -> Option<u32> {
    value.map(|v| {
        if v > DOS_MAX {
            debug!(field, value = v, cap = DOS_MAX, "clamping oversized setting");
        }
        v.min(DOS_MAX)
    })
}

/// Render `bag` as a decimal pattern string.
pub fn serialize(bag: &PropertyBag) -> String {
    let grouping = Grouping::from_sizes(
        clamp("grouping_size", bag.grouping_size),
        clamp("secondary_grouping_size", bag.secondary_grouping_size),
    );
    let padding_width = clamp("padding_width", bag.padding_width);
    let min_int = clamp("minimum_integer_digits", bag.minimum_integer_digits).unwrap_or(0);
    let max_int = clamp("maximum_integer_digits", bag.maximum_integer_digits);
    let min_frac = clamp("minimum_fraction_digits", bag.minimum_fraction_digits).unwrap_or(0);
    let max_frac = clamp("maximum_fraction_digits", bag.maximum_fraction_digits);
    let min_sig = clamp(
        "minimum_significant_digits",
        bag.minimum_significant_digits,
    );
    let max_sig = clamp(
        "maximum_significant_digits",
        bag.maximum_significant_digits,
    );
    let exponent_digits = clamp("exponent_digits", bag.exponent_digits);

    let mut out: Vec<char> = Vec::new();

    // Prefix
    let prefix_width = push_affix(
        &mut out,
        bag.positive_prefix_pattern.as_deref(),
        bag.positive_prefix.as_deref(),
    );
    let after_prefix = out.len();

    // Digits
    let (digits, digits_scale) = digits_string(bag, min_sig, max_sig, min_int, min_frac);
    let digits_len = digits.len() as i64;
    let separators = grouping.separators();
    let widest_separator = separators.iter().copied().max();
    // A fixed width (padding, or the integer digits of an exponent pattern)
    // gets the narrowest field: leading `#` would change that width.
    let min_width = if padding_width.is_some() || max_int.is_some() {
        widest_separator.unwrap_or(0)
    } else {
        widest_separator.map_or(1, |w| w + 1)
    };
    let mut int_width = min_width
        .max(digits_len + digits_scale)
        .max(i64::from(max_int.unwrap_or(0)));
    if bag.currency_as_decimal {
        int_width = int_width.max(1);
    }
    let mut m_n = digits_scale.min(0);
    if let Some(max_frac) = max_frac {
        m_n = m_n.min(-i64::from(max_frac));
    }
    let digit_at = |magnitude: i64| {
        let di = digits_len + digits_scale - magnitude - 1;
        usize::try_from(di)
            .ok()
            .and_then(|i| digits.get(i).copied())
            .unwrap_or('#')
    };
    let separators_at = |width: i64| separators.iter().filter(|&&w| w == width).count();

    out.extend(repeat_n(',', separators_at(int_width)));
    for magnitude in (0..int_width).rev() {
        out.push(digit_at(magnitude));
        out.extend(repeat_n(',', separators_at(magnitude)));
    }
    if bag.always_show_decimal || m_n < 0 {
        out.push(if bag.currency_as_decimal { '¤' } else { '.' });
    }
    for magnitude in (m_n..0).rev() {
        out.push(digit_at(magnitude));
    }

    // Exponent
    match exponent_digits {
        Some(0) => debug!("skipping exponent with no digits"),
        Some(zeros) => {
            out.push('E');
            if bag.exponent_show_plus_sign {
                out.push('+');
            }
            out.extend(repeat_n('0', zeros as usize));
        }
        None => {}
    }

    // Suffix
    let mut before_suffix = out.len();
    let suffix_width = push_affix(
        &mut out,
        bag.positive_suffix_pattern.as_deref(),
        bag.positive_suffix.as_deref(),
    );

    // Padding
    if let Some(width) = padding_width {
        let field_width = before_suffix - after_prefix;
        let mut current = prefix_width + field_width + suffix_width;
        while current < width as usize {
            out.insert(after_prefix, '#');
            before_suffix += 1;
            current += 1;
        }
        let clause = format!(
            "*{}",
            affix::escape_padding(bag.padding_string.as_deref().unwrap_or_default())
        );
        let at = match bag.padding_location.unwrap_or(PadPosition::BeforePrefix) {
            PadPosition::BeforePrefix => 0,
            PadPosition::AfterPrefix => after_prefix,
            PadPosition::BeforeSuffix => before_suffix,
            PadPosition::AfterSuffix => out.len(),
        };
        for (i, c) in clause.chars().enumerate() {
            out.insert(at + i, c);
        }
    }

    // Negative subpattern: affixes around a placeholder digit
    if bag.has_negative_affixes() {
        out.push(';');
        push_affix(
            &mut out,
            bag.negative_prefix_pattern.as_deref(),
            bag.negative_prefix.as_deref(),
        );
        out.push('#');
        let suffix_at = out.len();
        push_affix(
            &mut out,
            bag.negative_suffix_pattern.as_deref(),
            bag.negative_suffix.as_deref(),
        );
        // A pad clause keeps a leading `E` from reading as an exponent.
        if out.get(suffix_at) == Some(&'E') {
            out.insert(suffix_at, '*');
            out.insert(suffix_at + 1, ' ');
        }
    }

    let pattern: String = out.into_iter().collect();
    trace!(pattern = %pattern, "serialized properties");
    pattern
}

/// Append an affix template followed by an escaped resolved string.
///
/// Returns the width the affix renders to.
fn push_affix(out: &mut Vec<char>, template: Option<&str>, resolved: Option<&str>) -> usize {
    let mut width = 0;
    if let Some(template) = template {
        out.extend(template.chars());
        width += affix::literal_len(template);
    }
    if let Some(resolved) = resolved {
        out.extend(affix::escape_literal(resolved).chars());
        width += resolved.chars().count();
    }
    width
}

/// The canonical digit layout the pattern must show, and the magnitude of
/// its last character (0 for the units digit, negative inside the fraction).
///
/// The layout comes from significant digits if set, otherwise from the
/// rounding interval, then widened with `0` to meet the minimum integer and
/// fraction digits.
fn digits_string(
    bag: &PropertyBag,
    min_sig: Option<u32>,
    max_sig: Option<u32>,
    min_int: u32,
    min_frac: u32,
) -> (Vec<char>, i64) {
    let mut digits: Vec<char> = Vec::new();
    let mut scale: i64 = 0;

    if let Some(max_sig) = max_sig {
        let at_signs = min_sig.unwrap_or(1).max(1);
        digits.extend(repeat_n('@', at_signs as usize));
        digits.extend(repeat_n('#', max_sig.saturating_sub(at_signs) as usize));
    } else if let Some(interval) = bag.rounding_interval.as_ref().filter(|r| !r.is_zero()) {
        let (unscaled, exponent) = interval.as_bigint_and_exponent();
        let text = unscaled.magnitude().to_string();
        if text.len() as u64 > u64::from(DOS_MAX) || exponent.unsigned_abs() > u64::from(DOS_MAX) {
            debug!(interval = %interval, cap = DOS_MAX, "dropping oversized rounding interval");
        } else {
            digits.extend(text.chars());
            if exponent < 0 {
                digits.extend(repeat_n('0', exponent.unsigned_abs() as usize));
            } else {
                scale = -exponent;
            }
        }
    }

    while (digits.len() as i64) + scale < i64::from(min_int) {
        digits.insert(0, '0');
    }
    while -scale < i64::from(min_frac) {
        digits.push('0');
        scale -= 1;
    }
    (digits, scale)
}
