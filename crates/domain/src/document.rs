// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case document types, approval status, and the workflow-order table.
//!
//! The five core document types form a fixed approval sequence; the
//! supplementary types (positions 6-10) carry no ordering precondition.
//! This module is the single authority for that table: creation-order
//! checks consult `DocumentType::prerequisite` and nothing else.

use crate::error::DomainError;
use crate::reference::CaseReference;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The fixed set of document types attachable to a case.
///
/// Positions 1-5 form the core workflow sequence; positions 6-10 are
/// supplementary and may be created at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Position 1: the customer quotation.
    Quotation,
    /// Position 2: the supplier allocation/booking sheet.
    Allocation,
    /// Position 3: the invoice.
    Invoice,
    /// Position 4: the customer confirmation.
    CustomerConfirmation,
    /// Position 5: the guide instruction document.
    GuideInstruction,
    /// Position 6: hotel and miscellaneous vouchers.
    HotelOthers,
    /// Position 7: the final itinerary.
    Final,
    /// Position 8: the commission statement.
    Commission,
    /// Position 9: tour schedule approval.
    TourScheduleApproval,
    /// Position 10: tour confirmation approval.
    TourConfirmationApproval,
}

impl DocumentType {
    /// All document types in workflow order.
    pub const ALL: [Self; 10] = [
        Self::Quotation,
        Self::Allocation,
        Self::Invoice,
        Self::CustomerConfirmation,
        Self::GuideInstruction,
        Self::HotelOthers,
        Self::Final,
        Self::Commission,
        Self::TourScheduleApproval,
        Self::TourConfirmationApproval,
    ];

    /// Returns the fixed workflow position (1-10).
    #[must_use]
    pub const fn position(&self) -> u8 {
        match self {
            Self::Quotation => 1,
            Self::Allocation => 2,
            Self::Invoice => 3,
            Self::CustomerConfirmation => 4,
            Self::GuideInstruction => 5,
            Self::HotelOthers => 6,
            Self::Final => 7,
            Self::Commission => 8,
            Self::TourScheduleApproval => 9,
            Self::TourConfirmationApproval => 10,
        }
    }

    /// Returns the type that must exist and be approved before this one
    /// may be created, if any.
    ///
    /// Only positions 2-5 carry a prerequisite; the quotation and all
    /// supplementary types may be created at any time.
    #[must_use]
    pub const fn prerequisite(&self) -> Option<Self> {
        match self {
            Self::Allocation => Some(Self::Quotation),
            Self::Invoice => Some(Self::Allocation),
            Self::CustomerConfirmation => Some(Self::Invoice),
            Self::GuideInstruction => Some(Self::CustomerConfirmation),
            Self::Quotation
            | Self::HotelOthers
            | Self::Final
            | Self::Commission
            | Self::TourScheduleApproval
            | Self::TourConfirmationApproval => None,
        }
    }

    /// Returns whether this type belongs to the five-type core sequence.
    #[must_use]
    pub const fn is_core_workflow(&self) -> bool {
        self.position() <= 5
    }

    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quotation => "quotation",
            Self::Allocation => "allocation",
            Self::Invoice => "invoice",
            Self::CustomerConfirmation => "customer_confirmation",
            Self::GuideInstruction => "guide_instruction",
            Self::HotelOthers => "hotel_others",
            Self::Final => "final",
            Self::Commission => "commission",
            Self::TourScheduleApproval => "tour_schedule_approval",
            Self::TourConfirmationApproval => "tour_confirmation_approval",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "quotation" => Ok(Self::Quotation),
            "allocation" => Ok(Self::Allocation),
            "invoice" => Ok(Self::Invoice),
            "customer_confirmation" => Ok(Self::CustomerConfirmation),
            "guide_instruction" => Ok(Self::GuideInstruction),
            "hotel_others" => Ok(Self::HotelOthers),
            "final" => Ok(Self::Final),
            "commission" => Ok(Self::Commission),
            "tour_schedule_approval" => Ok(Self::TourScheduleApproval),
            "tour_confirmation_approval" => Ok(Self::TourConfirmationApproval),
            _ => Err(DomainError::InvalidDocumentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Approval status of a case document.
///
/// Approval is terminal: an approved document cannot be edited, deleted,
/// or transitioned to any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being drafted; freely editable.
    Draft,
    /// Submitted and awaiting an approval decision.
    PendingApproval,
    /// Approved; immutable from here on.
    Approved,
    /// Rejected; may be revised and resubmitted.
    Rejected,
}

impl DocumentStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDocumentStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Validates a transition from this status to another.
    ///
    /// Moves among draft, pending-approval, and rejected are unrestricted;
    /// approval is only reachable from pending-approval; nothing leaves
    /// the approved status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not permitted.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if *self == Self::Approved {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "approved documents are immutable".to_string(),
            });
        }

        if new_status == Self::Approved && *self != Self::PendingApproval {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "only a pending document can be approved".to_string(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A workflow document attached to a case.
///
/// At most one document per (case, type) pair exists at a time; the
/// storage layer backs this with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDocument {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the document has not been persisted yet.
    pub document_id: Option<i64>,
    /// The case this document belongs to.
    pub case_reference: CaseReference,
    /// The document type.
    pub document_type: DocumentType,
    /// The current approval status.
    pub status: DocumentStatus,
    /// The document title.
    pub title: String,
    /// The free-text document body.
    pub content: String,
    /// Monotonically incrementing revision counter, starting at 1.
    pub version: u32,
    /// Who approved the document, once approved.
    pub approved_by: Option<String>,
    /// When the document was approved, once approved.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl CaseDocument {
    /// Creates a new draft document at version 1, without a persisted ID.
    #[must_use]
    pub const fn new(
        case_reference: CaseReference,
        document_type: DocumentType,
        title: String,
        content: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            document_id: None,
            case_reference,
            document_type,
            status: DocumentStatus::Draft,
            title,
            content,
            version: 1,
            approved_by: None,
            approved_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Records approval metadata.
    ///
    /// Approval metadata is set exactly once; the approved status is
    /// terminal, so no later transition can overwrite it.
    pub fn record_approval(&mut self, approver: String, approved_at: OffsetDateTime) {
        self.status = DocumentStatus::Approved;
        self.approved_by = Some(approver);
        self.approved_at = Some(approved_at);
        self.updated_at = approved_at;
    }
}

/// Sorts documents by their fixed workflow position.
///
/// Core types come first in approval order; supplementary types follow in
/// their own fixed order.
pub fn sort_by_workflow_order(documents: &mut [CaseDocument]) {
    documents.sort_by_key(|document| document.document_type.position());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_string_round_trip() {
        for document_type in DocumentType::ALL {
            let s = document_type.as_str();
            assert_eq!(DocumentType::parse_str(s).unwrap(), document_type);
        }
    }

    #[test]
    fn test_positions_are_dense_and_ordered() {
        let positions: Vec<u8> = DocumentType::ALL.iter().map(DocumentType::position).collect();
        assert_eq!(positions, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_core_prerequisites_chain_in_order() {
        assert_eq!(DocumentType::Quotation.prerequisite(), None);
        assert_eq!(
            DocumentType::Allocation.prerequisite(),
            Some(DocumentType::Quotation)
        );
        assert_eq!(
            DocumentType::Invoice.prerequisite(),
            Some(DocumentType::Allocation)
        );
        assert_eq!(
            DocumentType::CustomerConfirmation.prerequisite(),
            Some(DocumentType::Invoice)
        );
        assert_eq!(
            DocumentType::GuideInstruction.prerequisite(),
            Some(DocumentType::CustomerConfirmation)
        );
    }

    #[test]
    fn test_supplementary_types_have_no_prerequisite() {
        for document_type in [
            DocumentType::HotelOthers,
            DocumentType::Final,
            DocumentType::Commission,
            DocumentType::TourScheduleApproval,
            DocumentType::TourConfirmationApproval,
        ] {
            assert_eq!(document_type.prerequisite(), None);
            assert!(!document_type.is_core_workflow());
        }
    }

    #[test]
    fn test_free_moves_among_non_terminal_statuses() {
        let free = [
            DocumentStatus::Draft,
            DocumentStatus::PendingApproval,
            DocumentStatus::Rejected,
        ];
        for from in free {
            for to in free {
                assert!(from.validate_transition(to).is_ok());
            }
        }
    }

    #[test]
    fn test_approval_only_from_pending() {
        assert!(
            DocumentStatus::PendingApproval
                .validate_transition(DocumentStatus::Approved)
                .is_ok()
        );
        assert!(
            DocumentStatus::Draft
                .validate_transition(DocumentStatus::Approved)
                .is_err()
        );
        assert!(
            DocumentStatus::Rejected
                .validate_transition(DocumentStatus::Approved)
                .is_err()
        );
    }

    #[test]
    fn test_nothing_leaves_approved() {
        for to in [
            DocumentStatus::Draft,
            DocumentStatus::PendingApproval,
            DocumentStatus::Rejected,
            DocumentStatus::Approved,
        ] {
            assert!(DocumentStatus::Approved.validate_transition(to).is_err());
        }
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            DocumentStatus::Draft,
            DocumentStatus::PendingApproval,
            DocumentStatus::Approved,
            DocumentStatus::Rejected,
        ] {
            assert_eq!(DocumentStatus::parse_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_sort_by_workflow_order_places_core_types_first() {
        let reference = crate::reference::CaseReference::parse("GF-20260314-001").unwrap();
        let now = OffsetDateTime::UNIX_EPOCH;
        let mut documents = vec![
            CaseDocument::new(
                reference.clone(),
                DocumentType::Final,
                String::from("Final"),
                String::new(),
                now,
            ),
            CaseDocument::new(
                reference.clone(),
                DocumentType::Invoice,
                String::from("Invoice"),
                String::new(),
                now,
            ),
            CaseDocument::new(
                reference,
                DocumentType::Quotation,
                String::from("Quotation"),
                String::new(),
                now,
            ),
        ];

        sort_by_workflow_order(&mut documents);

        let order: Vec<DocumentType> = documents.iter().map(|d| d.document_type).collect();
        assert_eq!(
            order,
            vec![
                DocumentType::Quotation,
                DocumentType::Invoice,
                DocumentType::Final
            ]
        );
    }
}
