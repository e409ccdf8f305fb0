//! LDML decimal pattern parsing and serialization.
//!
//! A pattern has a positive subpattern and an optional negative subpattern
//! separated by `;`. Each subpattern is `prefix number suffix`, with an
//! optional pad clause in one of four positions.
//!
//! # Pattern syntax
//!
//! | Token         | Meaning                                       |
//! |---------------|-----------------------------------------------|
//! | `0`           | Required digit                                |
//! | `1`–`9`       | Required digit; spells out a rounding interval |
//! | `#`           | Optional digit                                |
//! | `@`           | Significant digit                             |
//! | `,`           | Grouping separator                            |
//! | `.`           | Decimal separator                             |
//! | `¤` + digit   | Currency symbol used as the decimal separator |
//! | `E`, `E+`     | Exponent, followed by one or more `0`         |
//! | `*x`          | Pad with `x` up to the pattern's width        |
//! | `%`           | Percent; multiplies by 100                    |
//! | `‰`           | Per mille; multiplies by 1000                 |
//! | `¤`, `¤¤`, …  | Currency placeholder in an affix              |
//! | `-`, `+`      | Sign placeholders in an affix                 |
//! | `'text'`      | Quoted literal                                |
//! | `''`          | Literal `'`                                   |
//! | `;`           | Start of the negative subpattern              |

pub mod affix;
mod cursor;
pub mod info;
pub mod parser;
pub mod serializer;

pub use affix::{AffixToken, SymbolKind};
pub use info::{AffixKind, Endpoints, GroupingSizes, ParsedPatternInfo, ParsedSubpatternInfo};
pub use parser::{
    IgnoreRounding, ParseOptions, PatternError, PatternErrorKind, parse, parse_into,
    parse_into_with, parse_to_info, parse_with, save_to_properties,
};
pub use serializer::{DOS_MAX, serialize};

#[cfg(test)]
mod tests;
