//! Parse LDML decimal format patterns into formatting settings, and
//! serialize settings back into a canonical pattern.
//!
//! # Example
//!
//! ```rust
//! use decimal_pattern::{PropertyBag, parse, parse_into, serialize};
//!
//! let bag = parse("#,##,##0.00;(#)").unwrap();
//! assert_eq!(bag.grouping_size, Some(3));
//! assert_eq!(bag.secondary_grouping_size, Some(2));
//! assert_eq!(bag.minimum_fraction_digits, Some(2));
//! assert_eq!(bag.negative_prefix_pattern.as_deref(), Some("("));
//!
//! // Extra `#` and repeated groups normalize away.
//! let bag = parse("###,###,##0.0#").unwrap();
//! assert_eq!(serialize(&bag), "#,###,##0.0#");
//!
//! // Settings the pattern does not mention are left alone.
//! let mut bag = PropertyBag {
//!     negative_prefix: Some("minus ".to_string()),
//!     ..PropertyBag::default()
//! };
//! parse_into("0.00", &mut bag).unwrap();
//! assert_eq!(bag.negative_prefix.as_deref(), Some("minus "));
//!
//! let err = parse("#,##0.00'").unwrap_err();
//! assert_eq!(err.offset, 8);
//! ```

pub mod pattern;
mod properties;

pub use pattern::{
    AffixKind, AffixToken, IgnoreRounding, ParseOptions, ParsedPatternInfo,
    ParsedSubpatternInfo, PatternError, PatternErrorKind, SymbolKind, parse, parse_into,
    parse_into_with, parse_to_info, parse_with, save_to_properties, serialize,
};
pub use properties::{PadPosition, PropertyBag};
