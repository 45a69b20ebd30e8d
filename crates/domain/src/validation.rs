// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules shared across operations.

use crate::error::DomainError;
use rust_decimal::Decimal;
use time::Date;

/// Maximum length of a file code.
const MAX_FILE_CODE_LEN: usize = 20;

/// Maximum length of a guide name.
const MAX_GUIDE_NAME_LEN: usize = 100;

/// Maximum length of a document title.
const MAX_TITLE_LEN: usize = 200;

/// Validates a case file code.
///
/// # Errors
///
/// Returns `DomainError::InvalidFileCode` if the code is empty, blank, or
/// longer than 20 characters.
pub fn validate_file_code(file_code: &str) -> Result<(), DomainError> {
    if file_code.trim().is_empty() {
        return Err(DomainError::InvalidFileCode(String::from(
            "file code cannot be empty",
        )));
    }
    if file_code.chars().count() > MAX_FILE_CODE_LEN {
        return Err(DomainError::InvalidFileCode(format!(
            "file code cannot exceed {MAX_FILE_CODE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a passenger count.
///
/// # Errors
///
/// Returns `DomainError::InvalidPassengerCount` if the count is zero.
pub const fn validate_passenger_count(count: u32) -> Result<(), DomainError> {
    if count == 0 {
        return Err(DomainError::InvalidPassengerCount(count));
    }
    Ok(())
}

/// Validates that the return date does not precede the departure date.
///
/// # Errors
///
/// Returns `DomainError::InvalidTravelDates` if it does.
pub fn validate_travel_dates(departure: Date, return_date: Date) -> Result<(), DomainError> {
    if return_date < departure {
        return Err(DomainError::InvalidTravelDates {
            departure,
            return_date,
        });
    }
    Ok(())
}

/// Validates a guide name.
///
/// # Errors
///
/// Returns `DomainError::InvalidGuideName` if the name is empty, blank,
/// or longer than 100 characters.
pub fn validate_guide_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidGuideName(String::from(
            "guide name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_GUIDE_NAME_LEN {
        return Err(DomainError::InvalidGuideName(format!(
            "guide name cannot exceed {MAX_GUIDE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a document title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is empty, blank, or
/// longer than 200 characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "title cannot be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates that a monetary amount is not negative.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` naming the field if it is.
pub fn validate_amount(field: &'static str, amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field,
            value: amount.to_string(),
        });
    }
    Ok(())
}

/// Validates that a commission rate lies in [0, 100].
///
/// # Errors
///
/// Returns `DomainError::InvalidCommissionRate` if it does not.
pub fn validate_commission_rate(rate: Decimal) -> Result<(), DomainError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(DomainError::InvalidCommissionRate {
            rate: rate.to_string(),
        });
    }
    Ok(())
}
