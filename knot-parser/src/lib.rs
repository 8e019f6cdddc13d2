use alexander_engine::{KnotFamily, KnotSpec};
use csv::StringRecord;
use serde::Deserialize;
use thiserror::Error;

pub mod notation;

pub use notation::parse_spec;

/// Errors produced while reading knot descriptions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown knot family '{0}' (expected simple or hedden)")]
    UnknownFamily(String),

    #[error("invalid {field} '{value}': {reason}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("simple knots need a homology class k")]
    MissingClass,

    #[error("unrecognised knot notation '{0}'")]
    UnrecognisedNotation(String),
}

/// A knot CSV row with headers `family,p,q,k`.
///
/// `k` may be empty or absent for Hedden knots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnotRow {
    pub family: String,
    pub p: u64,
    pub q: u64,
    #[serde(default)]
    pub k: Option<u64>,
}

impl KnotRow {
    pub fn to_spec(&self) -> Result<KnotSpec, ParseError> {
        build_spec(&self.family, self.p, self.q, self.k)
    }
}

/// Parses a headerless CSV record into a KnotSpec.
///
/// Expected CSV format: family,p,q[,k]
///
/// # Arguments
/// * `record` - A CSV string record
///
/// # Returns
/// The parsed spec or the first field that failed to parse
pub fn parse_record(record: &StringRecord) -> Result<KnotSpec, ParseError> {
    let family = record.get(0).ok_or(ParseError::MissingField("family"))?;
    let p = parse_number("p", record.get(1).ok_or(ParseError::MissingField("p"))?)?;
    let q = parse_number("q", record.get(2).ok_or(ParseError::MissingField("q"))?)?;
    let k = match record.get(3) {
        Some(field) if !field.trim().is_empty() => Some(parse_number("k", field)?),
        _ => None,
    };

    build_spec(family, p, q, k)
}

/// Parses a family name: `simple`/`s` or `hedden`/`h`, case-insensitive.
pub fn parse_family(name: &str) -> Result<KnotFamily, ParseError> {
    match name.trim().to_lowercase().as_str() {
        "simple" | "s" => Ok(KnotFamily::Simple),
        "hedden" | "h" => Ok(KnotFamily::Hedden),
        _ => Err(ParseError::UnknownFamily(name.trim().to_string())),
    }
}

pub(crate) fn parse_number(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ParseError::InvalidNumber {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) fn build_spec(
    family: &str,
    p: u64,
    q: u64,
    k: Option<u64>,
) -> Result<KnotSpec, ParseError> {
    match parse_family(family)? {
        KnotFamily::Simple => {
            let k = k.ok_or(ParseError::MissingClass)?;
            Ok(KnotSpec::Simple { p, q, k })
        }
        KnotFamily::Hedden => {
            // The class of a Hedden knot is determined by q
            if let Some(k) = k.filter(|&k| k != q + 1) {
                log::warn!("hedden({},{}) ignores k = {}; its class is q + 1", p, q, k);
            }
            Ok(KnotSpec::Hedden { p, q })
        }
    }
}
