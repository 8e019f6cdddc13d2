use crate::{build_spec, parse_number, ParseError};
use alexander_engine::KnotSpec;
use lazy_static::lazy_static;
use regex::Regex;

// Compact knot notation.
// Matches lines like:
// - "simple(7,2,3)"
// - "Hedden( 5, 2 )"
// - "s(7,2,3)" / "h(5,2)"
// - "hedden(5,2,3)" (k accepted and checked against q + 1)
lazy_static! {
    static ref NOTATION_REGEX: Regex = Regex::new(
        r"(?i)^\s*(?P<family>simple|hedden|s|h)\s*\(\s*(?P<p>\d+)\s*,\s*(?P<q>\d+)\s*(?:,\s*(?P<k>\d+)\s*)?\)\s*$"
    ).expect("Invalid knot notation regex pattern");
}

/// Parses `simple(p,q,k)` or `hedden(p,q)`.
///
/// # Example
/// ```
/// use alexander_engine::KnotSpec;
/// use knot_parser::parse_spec;
///
/// assert_eq!(parse_spec("simple(7, 2, 3)").unwrap(), KnotSpec::Simple { p: 7, q: 2, k: 3 });
/// ```
pub fn parse_spec(input: &str) -> Result<KnotSpec, ParseError> {
    let unrecognised = || ParseError::UnrecognisedNotation(input.trim().to_string());
    let caps = NOTATION_REGEX.captures(input).ok_or_else(unrecognised)?;

    let family = caps.name("family").ok_or_else(unrecognised)?.as_str();
    let p = parse_number("p", caps.name("p").ok_or_else(unrecognised)?.as_str())?;
    let q = parse_number("q", caps.name("q").ok_or_else(unrecognised)?.as_str())?;
    let k = caps
        .name("k")
        .map(|m| parse_number("k", m.as_str()))
        .transpose()?;

    build_spec(family, p, q, k)
}
