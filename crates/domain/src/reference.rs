// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case reference numbers and per-day sequence generation.
//!
//! A reference has the form `PREFIX-YYYYMMDD-NNN` and is the natural key
//! for a case. Sequences are scoped by the date embedded in the string,
//! never by wall-clock reset: the next sequence for a day is derived by
//! scanning the already-issued set, not by a counter that could drift.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// The reference prefix used when a caller does not supply one.
pub const DEFAULT_PREFIX: &str = "GF";

/// The highest sequence that fits the 3-digit reference format.
pub const MAX_DAILY_SEQUENCE: u16 = 999;

/// A validated case reference of the form `PREFIX-YYYYMMDD-NNN`.
///
/// References are immutable once issued and unique across all cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseReference {
    /// The uppercase alphanumeric prefix (e.g., "GF").
    prefix: String,
    /// The calendar day embedded in the reference.
    day: Date,
    /// The 1-based sequence within the day (1-999).
    sequence: u16,
}

impl CaseReference {
    /// Parses a reference from its string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReference` if the string does not match
    /// `PREFIX-YYYYMMDD-NNN` with a valid calendar date and a sequence in
    /// the range 1-999.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidReference(value.to_string());

        let mut parts = value.split('-');
        let prefix = parts.next().ok_or_else(invalid)?;
        let date_part = parts.next().ok_or_else(invalid)?;
        let sequence_part = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        validate_prefix(prefix).map_err(|_| invalid())?;

        if date_part.len() != 8 || !date_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let format = format_description!("[year][month][day]");
        let day = Date::parse(date_part, &format).map_err(|_| invalid())?;

        if sequence_part.len() != 3 || !sequence_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u16 = sequence_part.parse().map_err(|_| invalid())?;
        if sequence == 0 || sequence > MAX_DAILY_SEQUENCE {
            return Err(invalid());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            day,
            sequence,
        })
    }

    /// Returns the prefix portion of the reference.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the calendar day embedded in the reference.
    #[must_use]
    pub const fn day(&self) -> Date {
        self.day
    }

    /// Returns the 1-based sequence within the day.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Returns the canonical string form `PREFIX-YYYYMMDD-NNN`.
    #[must_use]
    pub fn value(&self) -> String {
        let format = format_description!("[year][month][day]");
        // A valid Date always formats; fall back to the component form
        // rather than panicking if the formatter ever fails.
        let day = self
            .day
            .format(&format)
            .unwrap_or_else(|_| format!("{}", self.day));
        format!("{}-{}-{:03}", self.prefix, day, self.sequence)
    }

    pub(crate) fn from_parts(prefix: String, day: Date, sequence: u16) -> Self {
        Self {
            prefix,
            day,
            sequence,
        }
    }
}

impl std::fmt::Display for CaseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for CaseReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_prefix(prefix: &str) -> Result<(), DomainError> {
    if prefix.is_empty()
        || !prefix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return Err(DomainError::InvalidReference(prefix.to_string()));
    }
    Ok(())
}

/// Derives the next reference for `today` from the already-issued set.
///
/// Scans `issued` for references sharing the prefix and day, takes the
/// maximum trailing sequence, and increments it; the first reference of a
/// day is sequence 001. References issued for other days or prefixes are
/// ignored, so the sequence is scoped by the date embedded in the string.
///
/// This is a pure function of the issued set. The caller is responsible
/// for persisting the returned reference atomically with case creation;
/// under concurrent issuance the storage uniqueness constraint is the
/// backstop and the caller retries on a duplicate.
///
/// # Errors
///
/// * `DomainError::InvalidReference` if the prefix is empty or not
///   uppercase alphanumeric.
/// * `DomainError::DailyCapacityExceeded` if sequence 999 is already
///   issued for the day.
pub fn next_reference(
    prefix: &str,
    today: Date,
    issued: &[CaseReference],
) -> Result<CaseReference, DomainError> {
    validate_prefix(prefix)?;

    let max_sequence: u16 = issued
        .iter()
        .filter(|reference| reference.prefix == prefix && reference.day == today)
        .map(|reference| reference.sequence)
        .max()
        .unwrap_or(0);

    if max_sequence >= MAX_DAILY_SEQUENCE {
        return Err(DomainError::DailyCapacityExceeded { day: today });
    }

    Ok(CaseReference::from_parts(
        prefix.to_string(),
        today,
        max_sequence + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_first_reference_of_day_is_sequence_001() {
        let reference = next_reference(DEFAULT_PREFIX, date!(2026 - 03 - 14), &[]).unwrap();

        assert_eq!(reference.value(), "GF-20260314-001");
        assert_eq!(reference.sequence(), 1);
    }

    #[test]
    fn test_sequential_issuance_has_no_gaps_or_repeats() {
        let today = date!(2026 - 03 - 14);
        let mut issued: Vec<CaseReference> = Vec::new();

        for expected in 1..=5_u16 {
            let reference = next_reference(DEFAULT_PREFIX, today, &issued).unwrap();
            assert_eq!(reference.sequence(), expected);
            issued.push(reference);
        }

        assert_eq!(issued.last().unwrap().value(), "GF-20260314-005");
    }

    #[test]
    fn test_sequence_is_scoped_by_embedded_date() {
        let issued = vec![
            CaseReference::parse("GF-20260313-007").unwrap(),
            CaseReference::parse("GF-20260314-002").unwrap(),
        ];

        let reference = next_reference(DEFAULT_PREFIX, date!(2026 - 03 - 14), &issued).unwrap();

        assert_eq!(reference.sequence(), 3);
    }

    #[test]
    fn test_sequence_ignores_other_prefixes() {
        let issued = vec![CaseReference::parse("XY-20260314-009").unwrap()];

        let reference = next_reference(DEFAULT_PREFIX, date!(2026 - 03 - 14), &issued).unwrap();

        assert_eq!(reference.value(), "GF-20260314-001");
    }

    #[test]
    fn test_sequence_999_exhausts_the_day() {
        let issued = vec![CaseReference::parse("GF-20260314-999").unwrap()];

        let result = next_reference(DEFAULT_PREFIX, date!(2026 - 03 - 14), &issued);

        assert!(matches!(
            result.unwrap_err(),
            DomainError::DailyCapacityExceeded { .. }
        ));
    }

    #[test]
    fn test_parse_round_trips_canonical_form() {
        let reference = CaseReference::parse("GF-20260314-042").unwrap();

        assert_eq!(reference.prefix(), "GF");
        assert_eq!(reference.day(), date!(2026 - 03 - 14));
        assert_eq!(reference.sequence(), 42);
        assert_eq!(reference.value(), "GF-20260314-042");
    }

    #[test]
    fn test_parse_rejects_malformed_references() {
        for value in [
            "",
            "GF",
            "GF-20260314",
            "GF-20260314-000",
            "GF-20260314-1000",
            "GF-2026031-001",
            "GF-20261341-001",
            "gf-20260314-001",
            "GF-20260314-001-EXTRA",
            "GF-20260314-0a1",
        ] {
            assert!(
                CaseReference::parse(value).is_err(),
                "expected '{value}' to be rejected"
            );
        }
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let result = next_reference("", date!(2026 - 03 - 14), &[]);
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidReference(_)
        ));
    }
}
