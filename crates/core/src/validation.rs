//! Argument validation
//!
//! Entry points receive text; these helpers turn it into typed values or an
//! `InvalidArgument` naming the offending field.
//!
//! ## Rules
//!
//! - Required text must contain something other than whitespace
//! - Ids are at most [`MAX_ID_BYTES`] bytes
//! - Amounts are strictly positive integers
//! - Areas are finite and non-negative
//! - Coordinates are finite, latitude within ±90, longitude within ±180

use crate::error::{LedgerError, Result};
use crate::types::Coordinate;

/// Maximum id length in bytes
pub const MAX_ID_BYTES: usize = 1024;

/// Fail if `value` is empty or whitespace-only
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::invalid_argument(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate an entity id
pub fn validate_id(field: &str, id: &str) -> Result<()> {
    require_non_empty(field, id)?;
    if id.len() > MAX_ID_BYTES {
        return Err(LedgerError::invalid_argument(format!(
            "{} too long: {} bytes exceeds maximum {}",
            field,
            id.len(),
            MAX_ID_BYTES
        )));
    }
    Ok(())
}

/// Parse a strictly positive integer amount
///
/// ```
/// use landledger_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("amount", " 300 ").unwrap(), 300);
/// assert!(parse_amount("amount", "0").is_err());
/// assert!(parse_amount("amount", "-5").is_err());
/// assert!(parse_amount("amount", "12.5").is_err());
/// ```
pub fn parse_amount(field: &str, text: &str) -> Result<u64> {
    let trimmed = text.trim();
    match trimmed.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LedgerError::invalid_argument(format!(
            "invalid {} (must be positive integer): '{}'",
            field, text
        ))),
    }
}

/// Parse an area in square kilometres
pub fn parse_area(text: &str) -> Result<f64> {
    let area: f64 = text
        .trim()
        .parse()
        .map_err(|_| LedgerError::invalid_argument(format!("invalid area: '{}'", text)))?;
    validate_area(area)?;
    Ok(area)
}

/// Reject negative or non-finite areas
pub fn validate_area(area: f64) -> Result<()> {
    if !area.is_finite() || area < 0.0 {
        return Err(LedgerError::invalid_argument(format!(
            "area must be a finite non-negative number, got {}",
            area
        )));
    }
    Ok(())
}

/// Parse a JSON array of `{lat, lng}` pairs
pub fn parse_coordinates(json: &str) -> Result<Vec<Coordinate>> {
    let coords: Vec<Coordinate> = serde_json::from_str(json)
        .map_err(|e| LedgerError::invalid_argument(format!("invalid coordinates JSON: {}", e)))?;
    validate_coordinates(&coords)?;
    Ok(coords)
}

/// Check every coordinate is a finite point on the globe
pub fn validate_coordinates(coords: &[Coordinate]) -> Result<()> {
    for (i, c) in coords.iter().enumerate() {
        let lat_ok = c.lat.is_finite() && (-90.0..=90.0).contains(&c.lat);
        let lng_ok = c.lng.is_finite() && (-180.0..=180.0).contains(&c.lng);
        if !lat_ok || !lng_ok {
            return Err(LedgerError::invalid_argument(format!(
                "coordinate {} out of range: lat {}, lng {}",
                i, c.lat, c.lng
            )));
        }
    }
    Ok(())
}
