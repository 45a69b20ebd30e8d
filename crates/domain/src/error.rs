// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::document::DocumentType;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No case exists for the given reference.
    CaseNotFound {
        /// The case reference that was looked up.
        reference: String,
    },
    /// No document exists with the given identifier.
    DocumentNotFound {
        /// The document identifier.
        document_id: i64,
    },
    /// No settlement record exists for the case.
    SettlementNotFound {
        /// The case reference.
        reference: String,
    },
    /// No guide instruction exists for the case.
    GuideInstructionNotFound {
        /// The case reference.
        reference: String,
    },
    /// A document of the requested type already exists for the case.
    DuplicateDocument {
        /// The case reference.
        reference: String,
        /// The document type that already exists.
        document_type: DocumentType,
    },
    /// The workflow prerequisite for the requested document type is missing
    /// or has not been approved.
    WorkflowOrder {
        /// The document type whose creation was requested.
        requested: DocumentType,
        /// The prerequisite type that must exist and be approved first.
        missing: DocumentType,
    },
    /// The document is approved and can no longer be changed.
    ImmutableDocument {
        /// The document identifier.
        document_id: i64,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The guide instruction is distributed and can no longer be changed.
    ImmutableInstruction {
        /// The case reference.
        reference: String,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A monetary amount is malformed (e.g., negative).
    InvalidAmount {
        /// The field the amount was supplied for.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// A commission rate is outside the permitted range.
    InvalidCommissionRate {
        /// The offending rate.
        rate: String,
    },
    /// A case reference string does not match `PREFIX-YYYYMMDD-NNN`.
    InvalidReference(String),
    /// A file code is empty or too long.
    InvalidFileCode(String),
    /// A passenger count is outside the permitted range.
    InvalidPassengerCount(u32),
    /// The return date precedes the departure date.
    InvalidTravelDates {
        /// The departure date.
        departure: time::Date,
        /// The return date.
        return_date: time::Date,
    },
    /// A guide name is empty or too long.
    InvalidGuideName(String),
    /// A document title is empty or too long.
    InvalidTitle(String),
    /// Approval was requested without an approver identity.
    ApproverRequired {
        /// The document identifier.
        document_id: i64,
    },
    /// A document type string is not recognized.
    InvalidDocumentType(String),
    /// A document status string is not recognized.
    InvalidDocumentStatus(String),
    /// A case status string is not recognized.
    InvalidCaseStatus(String),
    /// A guide instruction status string is not recognized.
    InvalidGuideStatus(String),
    /// All 999 reference sequences for the day are already issued.
    DailyCapacityExceeded {
        /// The day whose sequence space is exhausted.
        day: time::Date,
    },
    /// A reference was issued concurrently and already exists in storage.
    DuplicateReference(String),
    /// The case still owns dependent artifacts and cannot be deleted.
    CaseHasDependents {
        /// The case reference.
        reference: String,
        /// A description of the surviving dependents.
        dependents: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaseNotFound { reference } => {
                write!(f, "Case '{reference}' not found")
            }
            Self::DocumentNotFound { document_id } => {
                write!(f, "Document {document_id} not found")
            }
            Self::SettlementNotFound { reference } => {
                write!(f, "No settlement record exists for case '{reference}'")
            }
            Self::GuideInstructionNotFound { reference } => {
                write!(f, "No guide instruction exists for case '{reference}'")
            }
            Self::DuplicateDocument {
                reference,
                document_type,
            } => {
                write!(
                    f,
                    "A {document_type} document already exists for case '{reference}'"
                )
            }
            Self::WorkflowOrder { requested, missing } => {
                write!(
                    f,
                    "Cannot create {requested} document: the {missing} document must exist and be approved first"
                )
            }
            Self::ImmutableDocument {
                document_id,
                operation,
            } => {
                write!(
                    f,
                    "Document {document_id} is approved and cannot be {operation}"
                )
            }
            Self::ImmutableInstruction {
                reference,
                operation,
            } => {
                write!(
                    f,
                    "Guide instruction for case '{reference}' is distributed and cannot be {operation}"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::InvalidAmount { field, value } => {
                write!(f, "Invalid amount for {field}: {value}")
            }
            Self::InvalidCommissionRate { rate } => {
                write!(
                    f,
                    "Invalid commission rate: {rate}. Must be between 0 and 100"
                )
            }
            Self::InvalidReference(value) => {
                write!(
                    f,
                    "Invalid case reference '{value}': expected PREFIX-YYYYMMDD-NNN"
                )
            }
            Self::InvalidFileCode(msg) => write!(f, "Invalid file code: {msg}"),
            Self::InvalidPassengerCount(count) => {
                write!(f, "Invalid passenger count: {count}. Must be at least 1")
            }
            Self::InvalidTravelDates {
                departure,
                return_date,
            } => {
                write!(
                    f,
                    "Return date {return_date} precedes departure date {departure}"
                )
            }
            Self::InvalidGuideName(msg) => write!(f, "Invalid guide name: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid document title: {msg}"),
            Self::ApproverRequired { document_id } => {
                write!(
                    f,
                    "Cannot approve document {document_id} without an approver identity"
                )
            }
            Self::InvalidDocumentType(value) => {
                write!(f, "Unknown document type: {value}")
            }
            Self::InvalidDocumentStatus(value) => {
                write!(f, "Unknown document status: {value}")
            }
            Self::InvalidCaseStatus(value) => {
                write!(f, "Unknown case status: {value}")
            }
            Self::InvalidGuideStatus(value) => {
                write!(f, "Unknown guide instruction status: {value}")
            }
            Self::DailyCapacityExceeded { day } => {
                write!(f, "All 999 case references for {day} have been issued")
            }
            Self::DuplicateReference(value) => {
                write!(f, "Case reference '{value}' has already been issued")
            }
            Self::CaseHasDependents {
                reference,
                dependents,
            } => {
                write!(
                    f,
                    "Case '{reference}' cannot be deleted: {dependents} still exist"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
