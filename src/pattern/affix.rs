//! Affix template helpers.
//!
//! Affix templates keep symbol placeholders (`%`, `‰`, `¤`, `-`, `+`) and
//! quoted runs unresolved. These helpers tokenize templates, measure how wide
//! they render, and escape resolved strings back into template syntax.

use phf::{Map, phf_map};

use super::parser::{PatternError, PatternErrorKind};

/// Kinds of symbol placeholder recognised in affix templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Percent,
    PerMille,
    Currency,
    Minus,
    Plus,
}

const SYMBOLS: Map<char, SymbolKind> = phf_map! {
    '%' => SymbolKind::Percent,
    '‰' => SymbolKind::PerMille,
    '¤' => SymbolKind::Currency,
    '-' => SymbolKind::Minus,
    '+' => SymbolKind::Plus,
};

/// The symbol placeholder `c` stands for when unquoted in an affix.
pub fn symbol_for(c: char) -> Option<SymbolKind> {
    SYMBOLS.get(&c).copied()
}

/// Characters that end an unquoted affix.
pub fn is_literal_stopper(c: char) -> bool {
    matches!(c, '#' | '@' | ';' | '*' | '.' | ',' | '0'..='9')
}

/// One element of an affix template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixToken {
    Literal(char),
    Percent,
    PerMille,
    Minus,
    Plus,
    /// A run of `¤`; the count selects symbol, ISO code or plural name.
    Currency(usize),
}

impl AffixToken {
    pub fn symbol_kind(&self) -> Option<SymbolKind> {
        match self {
            AffixToken::Literal(_) => None,
            AffixToken::Percent => Some(SymbolKind::Percent),
            AffixToken::PerMille => Some(SymbolKind::PerMille),
            AffixToken::Minus => Some(SymbolKind::Minus),
            AffixToken::Plus => Some(SymbolKind::Plus),
            AffixToken::Currency(_) => Some(SymbolKind::Currency),
        }
    }
}

/// Split an affix template into literal characters and symbols.
///
/// Quoted runs yield literals only; `''` yields a literal `'` both inside and
/// outside quotes. Offsets in errors are character indices into `template`.
pub fn tokenize(template: &str) -> Result<Vec<AffixToken>, PatternError> {
    let chars: Vec<char> = template.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            let start = i;
            i += 1;
            if chars.get(i) == Some(&'\'') {
                tokens.push(AffixToken::Literal('\''));
                i += 1;
                continue;
            }
            loop {
                match chars.get(i) {
                    None => {
                        return Err(PatternError::new(
                            start,
                            PatternErrorKind::UnterminatedQuote,
                        ));
                    }
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        tokens.push(AffixToken::Literal('\''));
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&q) => {
                        tokens.push(AffixToken::Literal(q));
                        i += 1;
                    }
                }
            }
            continue;
        }
        let token = match symbol_for(c) {
            Some(SymbolKind::Currency) => {
                let run = chars[i..].iter().take_while(|&&ch| ch == '¤').count();
                i += run;
                tokens.push(AffixToken::Currency(run));
                continue;
            }
            Some(SymbolKind::Percent) => AffixToken::Percent,
            Some(SymbolKind::PerMille) => AffixToken::PerMille,
            Some(SymbolKind::Minus) => AffixToken::Minus,
            Some(SymbolKind::Plus) => AffixToken::Plus,
            None => AffixToken::Literal(c),
        };
        tokens.push(token);
        i += 1;
    }
    Ok(tokens)
}

/// True when `template` contains an unquoted symbol of `kind`.
///
/// A malformed template contains nothing.
pub fn contains_symbol(template: &str, kind: SymbolKind) -> bool {
    tokenize(template)
        .map(|tokens| tokens.iter().any(|t| t.symbol_kind() == Some(kind)))
        .unwrap_or(false)
}

/// Strip quoting from a literal: `'ab''c'` becomes `ab'c`, `''` becomes `'`.
pub fn unquote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\'' {
            out.push(c);
        } else if chars.peek() == Some(&'\'') {
            chars.next();
            out.push('\'');
        }
    }
    out
}

/// Number of characters `template` renders to, counting each symbol
/// placeholder as one character.
pub fn literal_len(template: &str) -> usize {
    unquote(template).chars().count()
}

/// Escape a resolved affix string so it reads back as the same literal text.
///
/// A single character is emitted as-is unless it would be read as pattern
/// syntax or as a symbol placeholder, in which case it is quoted; a lone `'`
/// becomes `''`. Longer strings are wrapped in quotes with internal quotes
/// doubled.
pub fn escape_literal(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => String::new(),
        (Some('\''), None) => "''".to_string(),
        (Some(c), None) if is_literal_stopper(c) || c == 'E' || symbol_for(c).is_some() => {
            format!("'{c}'")
        }
        (Some(c), None) => c.to_string(),
        _ => format!("'{}'", text.replace('\'', "''")),
    }
}

/// Pad string used when none is configured.
pub const FALLBACK_PADDING_STRING: &str = " ";

/// Escape a pad string for use after `*`.
pub fn escape_padding(text: &str) -> String {
    let text = if text.is_empty() {
        FALLBACK_PADDING_STRING
    } else {
        text
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('\''), None) => "''".to_string(),
        (Some(c), None) => c.to_string(),
        _ => format!("'{}'", text.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Tokenizing ---

    #[test]
    fn tokenize_plain_literals() {
        assert_eq!(
            tokenize("ab").unwrap(),
            vec![AffixToken::Literal('a'), AffixToken::Literal('b')]
        );
    }

    #[test]
    fn tokenize_symbols() {
        assert_eq!(
            tokenize("-%‰+").unwrap(),
            vec![
                AffixToken::Minus,
                AffixToken::Percent,
                AffixToken::PerMille,
                AffixToken::Plus
            ]
        );
    }

    #[test]
    fn tokenize_currency_runs() {
        assert_eq!(
            tokenize("¤¤ ¤").unwrap(),
            vec![
                AffixToken::Currency(2),
                AffixToken::Literal(' '),
                AffixToken::Currency(1)
            ]
        );
        assert_eq!(tokenize("¤¤¤").unwrap(), vec![AffixToken::Currency(3)]);
    }

    #[test]
    fn tokenize_quoted_symbols_are_literal() {
        assert_eq!(
            tokenize("'%-'").unwrap(),
            vec![AffixToken::Literal('%'), AffixToken::Literal('-')]
        );
    }

    #[test]
    fn tokenize_doubled_quotes() {
        assert_eq!(tokenize("''").unwrap(), vec![AffixToken::Literal('\'')]);
        assert_eq!(
            tokenize("'a''b'").unwrap(),
            vec![
                AffixToken::Literal('a'),
                AffixToken::Literal('\''),
                AffixToken::Literal('b')
            ]
        );
    }

    #[test]
    fn tokenize_unterminated_quote() {
        let err = tokenize("x'ab").unwrap_err();
        assert_eq!(err.kind, PatternErrorKind::UnterminatedQuote);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn contains_symbol_ignores_quoted() {
        assert!(contains_symbol("¤ ", SymbolKind::Currency));
        assert!(!contains_symbol("'¤'", SymbolKind::Currency));
        assert!(!contains_symbol("'¤", SymbolKind::Currency));
    }

    // --- Width ---

    #[test]
    fn literal_len_counts_rendered_chars() {
        assert_eq!(literal_len(""), 0);
        assert_eq!(literal_len("$"), 1);
        assert_eq!(literal_len("'abc'"), 3);
        assert_eq!(literal_len("''"), 1);
        assert_eq!(literal_len("'a''b'"), 3);
        assert_eq!(literal_len("¤¤"), 2);
    }

    #[test]
    fn unquote_pad_literals() {
        assert_eq!(unquote("x"), "x");
        assert_eq!(unquote("''"), "'");
        assert_eq!(unquote("'ab'"), "ab");
        assert_eq!(unquote("'a''b'"), "a'b");
    }

    // --- Escaping ---

    #[test]
    fn escape_empty() {
        assert_eq!(escape_literal(""), "");
    }

    #[test]
    fn escape_single_char_is_raw() {
        assert_eq!(escape_literal("$"), "$");
        assert_eq!(escape_literal("x"), "x");
    }

    #[test]
    fn escape_single_syntax_char_is_quoted() {
        assert_eq!(escape_literal("#"), "'#'");
        assert_eq!(escape_literal("0"), "'0'");
        assert_eq!(escape_literal("%"), "'%'");
        assert_eq!(escape_literal("E"), "'E'");
        assert_eq!(escape_literal("'"), "''");
    }

    #[test]
    fn escape_multi_char_is_quoted() {
        assert_eq!(escape_literal("a'b"), "'a''b'");
        assert_eq!(escape_literal("USD "), "'USD '");
    }

    #[test]
    fn escape_padding_rules() {
        assert_eq!(escape_padding(""), " ");
        assert_eq!(escape_padding("x"), "x");
        assert_eq!(escape_padding("#"), "#");
        assert_eq!(escape_padding("'"), "''");
        assert_eq!(escape_padding("ab"), "'ab'");
        assert_eq!(escape_padding("a'"), "'a'''");
    }

    #[test]
    fn escaped_literal_round_trips_through_unquote() {
        for text in ["a'b", "$", "'", "USD", "%", "'a"] {
            assert_eq!(unquote(&escape_literal(text)), text, "text: {text:?}");
        }
    }
}
