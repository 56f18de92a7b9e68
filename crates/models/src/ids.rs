//! Time-derived identifiers: `<PREFIX>-YYYYMMDDHHmmssSSS`.
//!
//! Two identifiers of the same kind generated within one millisecond
//! collide; the primary-key constraint rejects the second insert.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::errors::ModelError;

pub const DIGITS: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Package,
    Record,
    Payment,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Package => "PK",
            IdKind::Record => "RC",
            IdKind::Payment => "PY",
        }
    }

    /// Human label used in format errors.
    pub fn label(self) -> &'static str {
        match self {
            IdKind::Package => "Package",
            IdKind::Record => "Record",
            IdKind::Payment => "Payment",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IdKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "package" => Ok(IdKind::Package),
            "record" => Ok(IdKind::Record),
            "payment" => Ok(IdKind::Payment),
            _ => Err(ModelError::validation("Invalid ID type")),
        }
    }
}

/// Generate an identifier from the local wall clock.
pub fn generate(kind: IdKind) -> String {
    generate_at(kind, &Local::now())
}

pub fn generate_at<Tz: TimeZone>(kind: IdKind, at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{}-{}", kind.prefix(), at.format("%Y%m%d%H%M%S%3f"))
}

/// Whether `id` is `<PREFIX>-` followed by exactly 17 ASCII digits.
pub fn matches(id: &str, kind: IdKind) -> bool {
    digits_of(id, kind).is_some()
}

/// Recover the embedded timestamp, if the id is well formed.
pub fn timestamp_of(id: &str, kind: IdKind) -> Option<NaiveDateTime> {
    let d = digits_of(id, kind)?;
    let num = |range: std::ops::Range<usize>| d[range].parse::<u32>().ok();
    let year = d[0..4].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, num(4..6)?, num(6..8)?)?
        .and_hms_milli_opt(num(8..10)?, num(10..12)?, num(12..14)?, num(14..17)?)
}

fn digits_of(id: &str, kind: IdKind) -> Option<&str> {
    let digits = id.strip_prefix(kind.prefix())?.strip_prefix('-')?;
    (digits.len() == DIGITS && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn formats_fixed_instant() {
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 7, 5, 3).unwrap() + chrono::Duration::milliseconds(42);
        assert_eq!(generate_at(IdKind::Package, &at), "PK-20240109070503042");
        assert_eq!(generate_at(IdKind::Record, &at), "RC-20240109070503042");
        assert_eq!(generate_at(IdKind::Payment, &at), "PY-20240109070503042");
    }

    #[test]
    fn generated_ids_embed_generation_second() {
        for kind in [IdKind::Package, IdKind::Record, IdKind::Payment] {
            let before = Local::now().naive_local().with_nanosecond(0).unwrap();
            let id = generate(kind);
            let after = Local::now().naive_local();
            assert!(matches(&id, kind), "{id}");
            let ts = timestamp_of(&id, kind).unwrap().with_nanosecond(0).unwrap();
            assert!(ts >= before && ts <= after, "{ts} not within [{before}, {after}]");
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!matches("PK-2024010907050304", IdKind::Package));
        assert!(!matches("PK-202401090705030421", IdKind::Package));
        assert!(!matches("RC-20240109070503042", IdKind::Package));
        assert!(!matches("PK20240109070503042", IdKind::Package));
        assert!(!matches("PK-2024010907050304a", IdKind::Package));
        assert!(timestamp_of("PK-20241399070503042", IdKind::Package).is_none());
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("package".parse::<IdKind>().unwrap(), IdKind::Package);
        assert_eq!("Record".parse::<IdKind>().unwrap(), IdKind::Record);
        let err = "invoice".parse::<IdKind>().unwrap_err();
        assert!(matches!(err, ModelError::Validation(m) if m == "Invalid ID type"));
    }
}
