// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for document creation order, approval transitions, and
//! immutability after approval.

use crate::{Command, CoreError, apply};
use gf_tour_domain::{DocumentStatus, DocumentType, DomainError};

use super::helpers::{
    create_case_state, create_test_actor, create_test_cause, test_now, with_document,
};

fn create_document_command(document_type: DocumentType) -> Command {
    Command::CreateDocument {
        document_type,
        title: format!("{document_type} title"),
        content: String::from("body"),
    }
}

#[test]
fn test_quotation_can_always_be_created_first() {
    let state = create_case_state();

    let result = apply(
        &state,
        create_document_command(DocumentType::Quotation),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let document = &result.new_state.documents[0];
    assert_eq!(document.document_type, DocumentType::Quotation);
    assert_eq!(document.status, DocumentStatus::Draft);
    assert_eq!(document.version, 1);
}

#[test]
fn test_allocation_requires_approved_quotation() {
    let state = create_case_state();

    let result = apply(
        &state,
        create_document_command(DocumentType::Allocation),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::WorkflowOrder {
            requested: DocumentType::Allocation,
            missing: DocumentType::Quotation,
        })
    ));
}

#[test]
fn test_unapproved_prerequisite_is_not_enough() {
    let state = with_document(
        create_case_state(),
        1,
        DocumentType::Quotation,
        DocumentStatus::PendingApproval,
    );

    let result = apply(
        &state,
        create_document_command(DocumentType::Allocation),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::WorkflowOrder { .. })
    ));
}

#[test]
fn test_allocation_succeeds_once_quotation_is_approved() {
    let state = with_document(
        create_case_state(),
        1,
        DocumentType::Quotation,
        DocumentStatus::Approved,
    );

    let result = apply(
        &state,
        create_document_command(DocumentType::Allocation),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.new_state.documents.len(), 2);
}

#[test]
fn test_duplicate_document_type_is_rejected() {
    let state = with_document(
        create_case_state(),
        1,
        DocumentType::Quotation,
        DocumentStatus::Draft,
    );

    let result = apply(
        &state,
        create_document_command(DocumentType::Quotation),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateDocument {
            document_type: DocumentType::Quotation,
            ..
        })
    ));
}

#[test]
fn test_supplementary_types_skip_the_ordering_rule() {
    let state = create_case_state();

    for document_type in [
        DocumentType::HotelOthers,
        DocumentType::Final,
        DocumentType::Commission,
        DocumentType::TourScheduleApproval,
        DocumentType::TourConfirmationApproval,
    ] {
        let result = apply(
            &state,
            create_document_command(document_type),
            create_test_actor(),
            create_test_cause(),
            test_now(),
        );
        assert!(result.is_ok(), "expected {document_type} to be creatable");
    }
}

#[test]
fn test_update_increments_version_exactly_once() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Draft,
    );

    let result = apply(
        &state,
        Command::UpdateDocumentContent {
            document_id: 7,
            title: Some(String::from("Revised quotation")),
            content: Some(String::from("revised body")),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let document = result.new_state.document_by_id(7).unwrap();
    assert_eq!(document.version, 2);
    assert_eq!(document.title, "Revised quotation");
    assert_eq!(document.content, "revised body");
}

#[test]
fn test_rejected_document_can_be_updated() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Rejected,
    );

    let result = apply(
        &state,
        Command::UpdateDocumentContent {
            document_id: 7,
            title: None,
            content: Some(String::from("second attempt")),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.new_state.document_by_id(7).unwrap().version, 2);
}

#[test]
fn test_approved_document_cannot_be_updated() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Approved,
    );

    let result = apply(
        &state,
        Command::UpdateDocumentContent {
            document_id: 7,
            title: None,
            content: Some(String::from("too late")),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ImmutableDocument {
            document_id: 7,
            operation: "updated",
        })
    ));
}

#[test]
fn test_approval_records_approver_and_timestamp() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::PendingApproval,
    );

    let result = apply(
        &state,
        Command::TransitionDocumentStatus {
            document_id: 7,
            new_status: DocumentStatus::Approved,
            approver: Some(String::from("manager")),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let document = result.new_state.document_by_id(7).unwrap();
    assert_eq!(document.status, DocumentStatus::Approved);
    assert_eq!(document.approved_by.as_deref(), Some("manager"));
    assert_eq!(document.approved_at, Some(test_now()));
}

#[test]
fn test_approval_requires_an_approver() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::PendingApproval,
    );

    let result = apply(
        &state,
        Command::TransitionDocumentStatus {
            document_id: 7,
            new_status: DocumentStatus::Approved,
            approver: None,
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ApproverRequired { document_id: 7 })
    ));
}

#[test]
fn test_approval_is_only_reachable_from_pending() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Draft,
    );

    let result = apply(
        &state,
        Command::TransitionDocumentStatus {
            document_id: 7,
            new_status: DocumentStatus::Approved,
            approver: Some(String::from("manager")),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_rejected_document_can_return_to_draft() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Rejected,
    );

    let result = apply(
        &state,
        Command::TransitionDocumentStatus {
            document_id: 7,
            new_status: DocumentStatus::Draft,
            approver: None,
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let document = result.new_state.document_by_id(7).unwrap();
    assert_eq!(document.status, DocumentStatus::Draft);
    assert_eq!(document.approved_by, None);
}

#[test]
fn test_nothing_transitions_away_from_approved() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Approved,
    );

    for new_status in [
        DocumentStatus::Draft,
        DocumentStatus::PendingApproval,
        DocumentStatus::Rejected,
    ] {
        let result = apply(
            &state,
            Command::TransitionDocumentStatus {
                document_id: 7,
                new_status,
                approver: None,
            },
            create_test_actor(),
            create_test_cause(),
            test_now(),
        );
        assert!(matches!(
            result.unwrap_err(),
            CoreError::DomainViolation(DomainError::ImmutableDocument { .. })
        ));
    }
}

#[test]
fn test_draft_document_can_be_deleted() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Draft,
    );

    let result = apply(
        &state,
        Command::DeleteDocument { document_id: 7 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert!(result.new_state.documents.is_empty());
}

#[test]
fn test_approved_document_cannot_be_deleted() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Approved,
    );

    let result = apply(
        &state,
        Command::DeleteDocument { document_id: 7 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ImmutableDocument {
            document_id: 7,
            operation: "deleted",
        })
    ));
}

#[test]
fn test_unknown_document_id_is_not_found() {
    let state = create_case_state();

    let result = apply(
        &state,
        Command::DeleteDocument { document_id: 99 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DocumentNotFound { document_id: 99 })
    ));
}

#[test]
fn test_failed_precondition_leaves_input_state_untouched() {
    let state = with_document(
        create_case_state(),
        7,
        DocumentType::Quotation,
        DocumentStatus::Approved,
    );
    let snapshot = state.clone();

    let _ = apply(
        &state,
        Command::DeleteDocument { document_id: 7 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(state, snapshot);
}
