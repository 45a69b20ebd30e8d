// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reference::CaseReference;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle status of a case.
///
/// A case opens as New, is worked In Progress, and ends Completed or
/// Cancelled. Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Freshly registered booking.
    #[default]
    New,
    /// Documents and settlement are being worked.
    InProgress,
    /// All work finished.
    Completed,
    /// The booking was cancelled.
    Cancelled,
}

impl CaseStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidCaseStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are New → `InProgress`, `InProgress` → Completed,
    /// and any non-terminal status → Cancelled.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        match (self, target) {
            (Self::New, Self::InProgress) | (Self::InProgress, Self::Completed) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Validates a transition from this status to another.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not permitted.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.can_transition_to(new_status) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by case lifecycle rules".to_string(),
            })
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A travel case ("file record"): one booking tracked end-to-end.
///
/// The reference is the natural key and is immutable once assigned. A
/// case is never physically removed while any dependent artifact
/// (document, settlement record, guide instruction) exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the case has not been persisted yet.
    pub case_id: Option<i64>,
    /// The unique case reference (`PREFIX-YYYYMMDD-NNN`).
    pub reference: CaseReference,
    /// The internal file code.
    pub file_code: String,
    /// The travel destination.
    pub destination: String,
    /// The staff member responsible for the case.
    pub manager: String,
    /// Number of passengers travelling.
    pub passenger_count: u32,
    /// Departure date.
    pub departure_date: Date,
    /// Return date.
    pub return_date: Date,
    /// The lifecycle status.
    pub status: CaseStatus,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// When the case was opened.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the case was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Case {
    /// Creates a new case in status New, without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        reference: CaseReference,
        file_code: String,
        destination: String,
        manager: String,
        passenger_count: u32,
        departure_date: Date,
        return_date: Date,
        remarks: Option<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            case_id: None,
            reference,
            file_code,
            destination,
            manager,
            passenger_count,
            departure_date,
            return_date,
            status: CaseStatus::New,
            remarks,
            created_at,
            updated_at: created_at,
        }
    }
}
