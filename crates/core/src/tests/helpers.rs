// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for core transition tests.

use crate::CaseState;
use gf_tour_audit::{Actor, Cause};
use gf_tour_domain::{
    Case, CaseDocument, CaseReference, DocumentStatus, DocumentType, GuideInstruction,
    GuideInstructionFields, GuideInstructionStatus,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 10:00 UTC)
}

pub fn test_reference() -> CaseReference {
    CaseReference::parse("GF-20260314-001").unwrap()
}

/// A freshly opened case with no artifacts.
pub fn create_case_state() -> CaseState {
    let case = Case::new(
        test_reference(),
        String::from("FC-1001"),
        String::from("Osaka"),
        String::from("Kim"),
        12,
        date!(2026 - 04 - 01),
        date!(2026 - 04 - 05),
        None,
        test_now(),
    );
    CaseState::new(case)
}

/// Adds a persisted document of the given type and status to the state.
///
/// The document receives `document_id` as if it had been loaded from the
/// store; approved documents carry approval metadata.
pub fn with_document(
    mut state: CaseState,
    document_id: i64,
    document_type: DocumentType,
    status: DocumentStatus,
) -> CaseState {
    let mut document = CaseDocument::new(
        state.case.reference.clone(),
        document_type,
        format!("{document_type} title"),
        String::from("body"),
        test_now(),
    );
    document.document_id = Some(document_id);
    if status == DocumentStatus::Approved {
        document.record_approval(String::from("manager"), test_now());
    } else {
        document.status = status;
    }
    state.documents.push(document);
    state
}

/// Adds a persisted guide instruction in the given status to the state.
pub fn with_guide_instruction(
    mut state: CaseState,
    status: GuideInstructionStatus,
) -> CaseState {
    let mut instruction = GuideInstruction::new(
        state.case.reference.clone(),
        sample_guide_fields(),
        test_now(),
    );
    instruction.instruction_id = Some(1);
    instruction.status = status;
    state.guide_instruction = Some(instruction);
    state
}

pub fn sample_guide_fields() -> GuideInstructionFields {
    GuideInstructionFields {
        guide_name: String::from("Lee Min"),
        guide_phone: Some(String::from("010-0000-0000")),
        travel_schedule: Some(String::from("Day 1: arrival and hotel check-in")),
        safety_rules: Some(String::from("Stay with the group")),
        precautions: Some(String::from("Check allergies before meals")),
        emergency_contact: Some(String::from("Head office hotline")),
        special_instructions: None,
    }
}
