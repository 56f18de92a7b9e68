//! Field validators shared by every write path.
//!
//! Each returns the exact client-facing message on failure. Callers run
//! `required_fields` first and stop at the first failing check.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::car::{CarSize, CarType};
use crate::errors::ModelError;
use crate::ids::{self, IdKind};

pub const PLATE_MAX_LEN: usize = 20;

/// Fail listing every field whose value is absent or empty.
pub fn required_fields(fields: &[(&str, Option<&str>)]) -> Result<(), ModelError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ModelError::validation(format!("Missing required fields: {}", missing.join(", "))))
}

pub fn plate_number(v: &str) -> Result<(), ModelError> {
    if v.trim().is_empty() {
        return Err(ModelError::validation("Plate number is required and must be a non-empty string"));
    }
    if v.chars().count() > PLATE_MAX_LEN {
        return Err(ModelError::validation("Plate number must be 20 characters or less"));
    }
    Ok(())
}

pub fn car_type(v: &str) -> Result<CarType, ModelError> {
    v.parse()
}

pub fn car_size(v: &str) -> Result<CarSize, ModelError> {
    v.parse()
}

pub fn phone_number(v: Option<&str>) -> Result<(), ModelError> {
    let phone = match v {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ModelError::validation("Phone number is required")),
    };
    let allowed = |c: char| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')');
    if !phone.chars().all(allowed) {
        return Err(ModelError::validation("Phone number contains invalid characters"));
    }
    Ok(())
}

/// Parse a strictly positive, finite decimal amount.
pub fn amount(v: &str) -> Result<f64, ModelError> {
    match v.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(ModelError::validation("Amount must be a positive number")),
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `YYYY-MM-DD HH:MM:SS`; keeps the calendar date.
pub fn date(v: &str) -> Result<NaiveDate, ModelError> {
    let v = v.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(v).ok().map(|d| d.date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S").ok().map(|d| d.date()))
        .or_else(|| NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|d| d.date()))
        .ok_or_else(|| ModelError::validation("Invalid date format"))
}

/// Both bounds of a range query; messages are prefixed by the failing side.
pub fn date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ModelError> {
    let start = date(start).map_err(|e| prefixed("Start date", e))?;
    let end = date(end).map_err(|e| prefixed("End date", e))?;
    Ok((start, end))
}

pub fn custom_id(v: &str, kind: IdKind) -> Result<(), ModelError> {
    if ids::matches(v, kind) {
        Ok(())
    } else {
        Err(ModelError::validation(format!("Invalid {} ID format", kind.label())))
    }
}

pub fn non_blank(v: &str, message: &str) -> Result<(), ModelError> {
    if v.trim().is_empty() {
        return Err(ModelError::validation(message));
    }
    Ok(())
}

fn prefixed(side: &str, err: ModelError) -> ModelError {
    match err {
        ModelError::Validation(msg) => ModelError::Validation(format!("{side}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(res: Result<impl std::fmt::Debug, ModelError>) -> String {
        match res {
            Err(ModelError::Validation(m)) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn required_lists_every_missing_field() {
        let msg = message(required_fields(&[
            ("plateNumber", Some("RAD123A")),
            ("carType", None),
            ("carSize", Some("")),
            ("driverName", Some("Bob")),
        ]));
        assert_eq!(msg, "Missing required fields: carType, carSize");
        assert!(required_fields(&[("a", Some("x"))]).is_ok());
    }

    #[test]
    fn plate_rules() {
        assert!(plate_number("RAD123A").is_ok());
        assert_eq!(message(plate_number("   ")), "Plate number is required and must be a non-empty string");
        assert!(plate_number(&"A".repeat(20)).is_ok());
        assert_eq!(message(plate_number(&"A".repeat(21))), "Plate number must be 20 characters or less");
    }

    #[test]
    fn car_enums_are_exact() {
        assert_eq!(car_type("SUV").unwrap(), CarType::Suv);
        assert_eq!(car_size("Extra Large").unwrap(), CarSize::ExtraLarge);
        assert_eq!(
            message(car_type("suv")),
            "Car type must be one of: Sedan, SUV, Hatchback, Truck, Van, Motorcycle, Other"
        );
        assert_eq!(message(car_size("XL")), "Car size must be one of: Small, Medium, Large, Extra Large");
    }

    #[test]
    fn phone_rules() {
        assert!(phone_number(Some("+250 (788) 123-456")).is_ok());
        assert_eq!(message(phone_number(None)), "Phone number is required");
        assert_eq!(message(phone_number(Some(""))), "Phone number is required");
        assert_eq!(message(phone_number(Some("0788x123"))), "Phone number contains invalid characters");
    }

    #[test]
    fn amount_rules() {
        assert_eq!(amount("5000").unwrap(), 5000.0);
        assert_eq!(amount(" 12.5 ").unwrap(), 12.5);
        for bad in ["0", "-3", "abc", "NaN", "inf", ""] {
            assert_eq!(message(amount(bad)), "Amount must be a positive number", "{bad}");
        }
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(date("2024-01-10").unwrap(), expected);
        assert_eq!(date("2024-01-10T08:30:00Z").unwrap(), expected);
        assert_eq!(date("2024-01-10T08:30:00.000").unwrap(), expected);
        assert_eq!(date("2024-01-10 08:30:00").unwrap(), expected);
        assert_eq!(message(date("2024-02-30")), "Invalid date format");
        assert_eq!(message(date("yesterday")), "Invalid date format");
    }

    #[test]
    fn date_range_prefixes_side() {
        assert_eq!(message(date_range("nope", "2024-01-31")), "Start date: Invalid date format");
        assert_eq!(message(date_range("2024-01-01", "nope")), "End date: Invalid date format");
        assert!(date_range("2024-01-01", "2024-01-31").is_ok());
    }

    #[test]
    fn custom_id_messages() {
        assert!(custom_id("PK-20240109070503042", IdKind::Package).is_ok());
        assert_eq!(message(custom_id("PK-1", IdKind::Package)), "Invalid Package ID format");
        assert_eq!(message(custom_id("PK-20240109070503042", IdKind::Record)), "Invalid Record ID format");
        assert_eq!(message(custom_id("x", IdKind::Payment)), "Invalid Payment ID format");
    }
}
