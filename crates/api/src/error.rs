// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gf_tour::CoreError;
use gf_tour_domain::DomainError;
use gf_tour_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::CaseNotFound { reference } => ApiError::ResourceNotFound {
            resource_type: String::from("Case"),
            message: format!("Case '{reference}' does not exist"),
        },
        DomainError::DocumentNotFound { document_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document {document_id} does not exist"),
        },
        DomainError::SettlementNotFound { reference } => ApiError::ResourceNotFound {
            resource_type: String::from("Settlement record"),
            message: format!("No settlement record exists for case '{reference}'"),
        },
        DomainError::GuideInstructionNotFound { reference } => ApiError::ResourceNotFound {
            resource_type: String::from("Guide instruction"),
            message: format!("No guide instruction exists for case '{reference}'"),
        },
        DomainError::DuplicateDocument {
            reference,
            document_type,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_document_per_type"),
            message: format!(
                "A {document_type} document already exists for case '{reference}'"
            ),
        },
        DomainError::WorkflowOrder { requested, missing } => ApiError::DomainRuleViolation {
            rule: String::from("document_workflow_order"),
            message: format!(
                "Cannot create {requested} document: the {missing} document must exist and be approved first"
            ),
        },
        DomainError::ImmutableDocument {
            document_id,
            operation,
        } => ApiError::DomainRuleViolation {
            rule: String::from("approved_document_immutable"),
            message: format!("Document {document_id} is approved and cannot be {operation}"),
        },
        DomainError::ImmutableInstruction {
            reference,
            operation,
        } => ApiError::DomainRuleViolation {
            rule: String::from("distributed_instruction_immutable"),
            message: format!(
                "Guide instruction for case '{reference}' is distributed and cannot be {operation}"
            ),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_lifecycle"),
                message: format!("Cannot transition from {from} to {to}: {reason}"),
            }
        }
        DomainError::InvalidAmount { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid amount: {value}"),
        },
        DomainError::InvalidCommissionRate { rate } => ApiError::InvalidInput {
            field: String::from("commission_rate"),
            message: format!("Invalid commission rate: {rate}. Must be between 0 and 100"),
        },
        DomainError::InvalidReference(value) => ApiError::InvalidInput {
            field: String::from("reference"),
            message: format!("Invalid case reference '{value}': expected PREFIX-YYYYMMDD-NNN"),
        },
        DomainError::InvalidFileCode(msg) => ApiError::InvalidInput {
            field: String::from("file_code"),
            message: msg,
        },
        DomainError::InvalidPassengerCount(count) => ApiError::InvalidInput {
            field: String::from("passenger_count"),
            message: format!("Invalid passenger count: {count}. Must be at least 1"),
        },
        DomainError::InvalidTravelDates {
            departure,
            return_date,
        } => ApiError::InvalidInput {
            field: String::from("travel_dates"),
            message: format!("Return date {return_date} precedes departure date {departure}"),
        },
        DomainError::InvalidGuideName(msg) => ApiError::InvalidInput {
            field: String::from("guide_name"),
            message: msg,
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::ApproverRequired { document_id } => ApiError::InvalidInput {
            field: String::from("approver"),
            message: format!(
                "Cannot approve document {document_id} without an approver identity"
            ),
        },
        DomainError::InvalidDocumentType(value) => ApiError::InvalidInput {
            field: String::from("document_type"),
            message: format!("Unknown document type: {value}"),
        },
        DomainError::InvalidDocumentStatus(value)
        | DomainError::InvalidCaseStatus(value)
        | DomainError::InvalidGuideStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status: {value}"),
        },
        DomainError::DailyCapacityExceeded { day } => ApiError::DomainRuleViolation {
            rule: String::from("daily_reference_capacity"),
            message: format!("All 999 case references for {day} have been issued"),
        },
        DomainError::DuplicateReference(value) => ApiError::DomainRuleViolation {
            rule: String::from("unique_reference"),
            message: format!("Case reference '{value}' has already been issued"),
        },
        DomainError::CaseHasDependents {
            reference,
            dependents,
        } => ApiError::DomainRuleViolation {
            rule: String::from("case_deletion_dependents"),
            message: format!("Case '{reference}' cannot be deleted: {dependents} still exist"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unique-constraint races are reported as the matching domain rule
/// violation; everything else is a storage-level internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DuplicateReference(reference) => {
            translate_domain_error(DomainError::DuplicateReference(reference))
        }
        PersistenceError::DuplicateDocument {
            reference,
            document_type,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_document_per_type"),
            message: format!(
                "A {document_type} document already exists for case '{reference}'"
            ),
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
