//! Identifier narrowing at the serialization boundary
//!
//! MySQL hands back AUTO_INCREMENT identifiers as unsigned 64-bit integers.
//! JSON clients commonly decode numbers as IEEE-754 doubles, which represent
//! integers exactly only up to 2^53 - 1. Identifiers are checked against that
//! bound before they are written into a response, so a value a client would
//! silently round is reported as an error instead.

use thiserror::Error;

/// Largest integer a double can represent exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Error returned when an identifier cannot be represented safely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier {0} exceeds the safe integer range (max {max})", max = MAX_SAFE_INTEGER)]
pub struct NarrowingError(pub u64);

/// Narrows a database-assigned identifier into the JSON-safe integer range
///
/// # Errors
///
/// Returns [`NarrowingError`] if `wide` is greater than [`MAX_SAFE_INTEGER`].
///
/// # Example
///
/// ```
/// use userdesk_shared::narrowing::{narrow_id, MAX_SAFE_INTEGER};
///
/// assert_eq!(narrow_id(42), Ok(42));
/// assert!(narrow_id(MAX_SAFE_INTEGER + 1).is_err());
/// ```
pub fn narrow_id(wide: u64) -> Result<u64, NarrowingError> {
    if wide > MAX_SAFE_INTEGER {
        return Err(NarrowingError(wide));
    }
    Ok(wide)
}

/// Maps a numeric path value onto a user id
///
/// Returns `None` for values no AUTO_INCREMENT row can carry: negatives,
/// fractions and anything beyond [`MAX_SAFE_INTEGER`].
///
/// # Example
///
/// ```
/// use userdesk_shared::narrowing::id_from_number;
///
/// assert_eq!(id_from_number(1e3), Some(1000));
/// assert_eq!(id_from_number(1.5), None);
/// assert_eq!(id_from_number(-1.0), None);
/// ```
pub fn id_from_number(value: f64) -> Option<u64> {
    let in_range = value >= 0.0 && value <= MAX_SAFE_INTEGER as f64;
    if in_range && value.fract() == 0.0 {
        Some(value as u64)
    } else {
        None
    }
}
