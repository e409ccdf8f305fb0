use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use decimal_pattern::{ParsedSubpatternInfo, PatternError, parse, parse_to_info, serialize};

#[derive(Debug, Parser)]
#[command(name = "decpat", author, version, about = "Inspect LDML decimal patterns")]
struct Args {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the settings a pattern spells out
    Parse {
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },
    /// Print the canonical form of a pattern
    Normalize {
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },
    /// Print the parser's per-subpattern counters
    Info {
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(args.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(command: &Command) -> Result<()> {
    match command {
        Command::Parse { pattern } => {
            let bag = parse(pattern).map_err(|e| syntax_error(pattern, &e))?;
            for (name, value) in bag.non_default_fields() {
                println!("{name} = {value}");
            }
        }
        Command::Normalize { pattern } => {
            let bag = parse(pattern).map_err(|e| syntax_error(pattern, &e))?;
            let normalized = serialize(&bag);
            debug!(pattern = %pattern, normalized = %normalized, "normalized");
            println!("{normalized}");
        }
        Command::Info { pattern } => {
            let info = parse_to_info(pattern).map_err(|e| syntax_error(pattern, &e))?;
            print_subpattern("positive", &info.positive);
            if let Some(negative) = &info.negative {
                print_subpattern("negative", negative);
            }
            if let Some(padding) = info.padding_string() {
                println!("padding string: {padding:?}");
            }
            let rounding = info
                .positive
                .rounding
                .to_decimal()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string());
            println!("rounding increment: {rounding}");
        }
    }
    Ok(())
}

fn print_subpattern(label: &str, sub: &ParsedSubpatternInfo) {
    println!("{label}:");
    println!(
        "  integer: total={} numerals={} at_signs={} leading_hashes={} trailing_hashes={}",
        sub.integer_total,
        sub.integer_numerals,
        sub.integer_at_signs,
        sub.integer_leading_hash_signs,
        sub.integer_trailing_hash_signs
    );
    println!(
        "  fraction: total={} numerals={} hashes={}",
        sub.fraction_total, sub.fraction_numerals, sub.fraction_hash_signs
    );
    println!(
        "  grouping: primary={:?} secondary={:?}",
        sub.grouping.primary(),
        sub.grouping.secondary()
    );
    println!("  width: {}", sub.width_except_affixes);
    if sub.has_exponent() {
        println!(
            "  exponent: zeros={} plus={}",
            sub.exponent_zeros, sub.exponent_has_plus_sign
        );
    }
    let flags = [
        ("decimal", sub.has_decimal),
        ("currency_decimal", sub.has_currency_decimal),
        ("percent", sub.has_percent_sign),
        ("per_mille", sub.has_per_mille_sign),
        ("currency", sub.has_currency_sign),
        ("minus", sub.has_minus_sign),
        ("plus", sub.has_plus_sign),
    ];
    let set = flags.iter().filter(|(_, on)| *on).map(|(name, _)| name).join(" ");
    if !set.is_empty() {
        println!("  flags: {set}");
    }
    if let Some(location) = sub.padding_location {
        println!("  padding: {location:?}");
    }
}

/// Wrap a parse failure with the pattern and a caret under the offending
/// character.
fn syntax_error(pattern: &str, err: &PatternError) -> anyhow::Error {
    anyhow::anyhow!("{}\n{}", pattern, caret_line(err.offset))
        .context(format!("Syntax error: {err}"))
}

fn caret_line(offset: usize) -> String {
    format!("{}^", " ".repeat(offset))
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "decimal_pattern=warn,decpat=warn",
        1 => "decimal_pattern=debug,decpat=debug",
        _ => "decimal_pattern=trace,decpat=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_levels() {
        assert_eq!(directive_for_verbosity(0), "decimal_pattern=warn,decpat=warn");
        assert_eq!(directive_for_verbosity(1), "decimal_pattern=debug,decpat=debug");
        assert_eq!(directive_for_verbosity(2), "decimal_pattern=trace,decpat=trace");
        assert_eq!(directive_for_verbosity(9), "decimal_pattern=trace,decpat=trace");
    }

    #[test]
    fn caret_points_at_offset() {
        assert_eq!(caret_line(0), "^");
        assert_eq!(caret_line(3), "   ^");
    }

    #[test]
    fn syntax_error_shows_pattern_and_caret() {
        let err = parse("0'").unwrap_err();
        let wrapped = syntax_error("0'", &err);
        let text = format!("{wrapped:#}");
        assert!(text.starts_with("Syntax error: Unterminated quote"), "{text}");
        assert!(text.ends_with("0'\n ^"), "{text}");
    }

    #[test]
    fn args_parse_subcommands() {
        let args = Args::try_parse_from(["decpat", "-vv", "normalize", "#,##0.00"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::Normalize { ref pattern } if pattern == "#,##0.00"));
    }

    #[test]
    fn run_rejects_mixed_digit_order() {
        let command = Command::Normalize {
            pattern: "5#".to_string(),
        };
        let err = run(&command).unwrap_err();
        assert!(format!("{err:#}").contains("'#' cannot follow '0'"), "{err:#}");
    }

    #[test]
    fn run_rejects_bad_pattern() {
        let command = Command::Parse {
            pattern: "#'".to_string(),
        };
        assert!(run(&command).is_err());
    }
}
