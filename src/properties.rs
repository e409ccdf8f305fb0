//! The property bag shared by the pattern parser and serializer.
//!
//! Every numeric setting is an `Option`: `None` means "not specified", which
//! is distinct from an explicit zero (a grouping size of `Some(0)` is a real
//! setting produced by a trailing `,`).

use std::fmt;

use bigdecimal::BigDecimal;
use itertools::Itertools;

/// Where padding is inserted relative to the affixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadPosition {
    BeforePrefix,
    AfterPrefix,
    BeforeSuffix,
    AfterSuffix,
}

/// Decimal formatting settings, populated by [`crate::parse`] or by hand and
/// read by [`crate::serialize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    pub grouping_size: Option<u32>,
    pub secondary_grouping_size: Option<u32>,
    pub minimum_integer_digits: Option<u32>,
    pub maximum_integer_digits: Option<u32>,
    pub minimum_fraction_digits: Option<u32>,
    pub maximum_fraction_digits: Option<u32>,
    pub minimum_significant_digits: Option<u32>,
    pub maximum_significant_digits: Option<u32>,
    /// Exact increment to round to, e.g. `0.05` from `#,##0.05`.
    pub rounding_interval: Option<BigDecimal>,
    pub always_show_decimal: bool,
    /// The currency sign stands in for the decimal separator (`0¤00`).
    pub currency_as_decimal: bool,
    /// Minimum exponent digits; `Some` enables scientific notation.
    pub exponent_digits: Option<u32>,
    pub exponent_show_plus_sign: bool,
    pub padding_width: Option<u32>,
    pub padding_string: Option<String>,
    pub padding_location: Option<PadPosition>,
    // Affix templates. These may still hold unresolved symbols (`%`, `‰`,
    // `¤`) and quoted runs.
    pub positive_prefix_pattern: Option<String>,
    pub positive_suffix_pattern: Option<String>,
    pub negative_prefix_pattern: Option<String>,
    pub negative_suffix_pattern: Option<String>,
    // Resolved affix overrides. Emitted verbatim by formatters.
    pub positive_prefix: Option<String>,
    pub positive_suffix: Option<String>,
    pub negative_prefix: Option<String>,
    pub negative_suffix: Option<String>,
    /// Power of ten applied to values: 2 for percent, 3 for permille.
    pub magnitude_multiplier: Option<i32>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field to "unset".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when any negative affix, template or resolved, is present.
    pub fn has_negative_affixes(&self) -> bool {
        self.negative_prefix_pattern.is_some()
            || self.negative_suffix_pattern.is_some()
            || self.negative_prefix.is_some()
            || self.negative_suffix.is_some()
    }

    /// `name=value` pairs for every field that differs from the default, in
    /// declaration order.
    pub fn non_default_fields(&self) -> Vec<(&'static str, String)> {
        fn num(out: &mut Vec<(&'static str, String)>, name: &'static str, v: Option<u32>) {
            if let Some(v) = v {
                out.push((name, v.to_string()));
            }
        }
        fn text(out: &mut Vec<(&'static str, String)>, name: &'static str, v: &Option<String>) {
            if let Some(v) = v {
                out.push((name, format!("{v:?}")));
            }
        }

        let mut out = Vec::new();
        num(&mut out, "grouping_size", self.grouping_size);
        num(&mut out, "secondary_grouping_size", self.secondary_grouping_size);
        num(&mut out, "minimum_integer_digits", self.minimum_integer_digits);
        num(&mut out, "maximum_integer_digits", self.maximum_integer_digits);
        num(&mut out, "minimum_fraction_digits", self.minimum_fraction_digits);
        num(&mut out, "maximum_fraction_digits", self.maximum_fraction_digits);
        num(
            &mut out,
            "minimum_significant_digits",
            self.minimum_significant_digits,
        );
        num(
            &mut out,
            "maximum_significant_digits",
            self.maximum_significant_digits,
        );
        if let Some(r) = &self.rounding_interval {
            out.push(("rounding_interval", r.to_string()));
        }
        if self.always_show_decimal {
            out.push(("always_show_decimal", "true".to_string()));
        }
        if self.currency_as_decimal {
            out.push(("currency_as_decimal", "true".to_string()));
        }
        num(&mut out, "exponent_digits", self.exponent_digits);
        if self.exponent_show_plus_sign {
            out.push(("exponent_show_plus_sign", "true".to_string()));
        }
        num(&mut out, "padding_width", self.padding_width);
        text(&mut out, "padding_string", &self.padding_string);
        if let Some(loc) = self.padding_location {
            out.push(("padding_location", format!("{loc:?}")));
        }
        text(
            &mut out,
            "positive_prefix_pattern",
            &self.positive_prefix_pattern,
        );
        text(
            &mut out,
            "positive_suffix_pattern",
            &self.positive_suffix_pattern,
        );
        text(
            &mut out,
            "negative_prefix_pattern",
            &self.negative_prefix_pattern,
        );
        text(
            &mut out,
            "negative_suffix_pattern",
            &self.negative_suffix_pattern,
        );
        text(&mut out, "positive_prefix", &self.positive_prefix);
        text(&mut out, "positive_suffix", &self.positive_suffix);
        text(&mut out, "negative_prefix", &self.negative_prefix);
        text(&mut out, "negative_suffix", &self.negative_suffix);
        if let Some(m) = self.magnitude_multiplier {
            out.push(("magnitude_multiplier", m.to_string()));
        }
        out
    }

    /// One-line summary of the non-default fields, for logs.
    pub fn summary(&self) -> String {
        self.non_default_fields()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .join(" ")
    }
}

/// Renders the bag as its canonical pattern string.
impl fmt::Display for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::pattern::serialize(self))
    }
}
