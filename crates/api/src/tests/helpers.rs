// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for API boundary tests.

use crate::request_response::{CaseInfo, OpenCaseRequest, SaveGuideInstructionRequest};
use crate::{handlers, CreateDocumentRequest, DocumentInfo, TransitionDocumentStatusRequest};
use gf_tour_audit::{Actor, Cause};
use gf_tour_persistence::Persistence;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn open_request(file_code: &str) -> OpenCaseRequest {
    OpenCaseRequest {
        file_code: String::from(file_code),
        destination: String::from("Osaka"),
        manager: String::from("Kim"),
        passenger_count: 12,
        departure_date: date!(2026 - 04 - 01),
        return_date: date!(2026 - 04 - 05),
        remarks: None,
    }
}

pub fn open_test_case(persistence: &mut Persistence) -> CaseInfo {
    handlers::open_case(
        persistence,
        open_request("FC-1001"),
        &create_test_actor(),
        &create_test_cause(),
    )
    .unwrap()
}

/// Creates a document and walks it to approved status.
pub fn create_approved_document(
    persistence: &mut Persistence,
    reference: &str,
    document_type: &str,
) -> DocumentInfo {
    let document = create_draft_document(persistence, reference, document_type);
    let document = handlers::transition_document_status(
        persistence,
        TransitionDocumentStatusRequest {
            reference: String::from(reference),
            document_id: document.document_id,
            new_status: String::from("pending_approval"),
            approver: None,
        },
        &create_test_actor(),
        &create_test_cause(),
    )
    .unwrap();
    handlers::transition_document_status(
        persistence,
        TransitionDocumentStatusRequest {
            reference: String::from(reference),
            document_id: document.document_id,
            new_status: String::from("approved"),
            approver: Some(String::from("manager")),
        },
        &create_test_actor(),
        &create_test_cause(),
    )
    .unwrap()
}

pub fn create_draft_document(
    persistence: &mut Persistence,
    reference: &str,
    document_type: &str,
) -> DocumentInfo {
    handlers::create_document(
        persistence,
        CreateDocumentRequest {
            reference: String::from(reference),
            document_type: String::from(document_type),
            title: format!("{document_type} title"),
            content: String::from("body"),
        },
        &create_test_actor(),
        &create_test_cause(),
    )
    .unwrap()
}

pub fn save_guide_request(reference: &str) -> SaveGuideInstructionRequest {
    SaveGuideInstructionRequest {
        reference: String::from(reference),
        guide_name: String::from("Lee Min"),
        guide_phone: Some(String::from("010-0000-0000")),
        travel_schedule: Some(String::from("Day 1: arrival")),
        safety_rules: Some(String::from("Stay with the group")),
        precautions: None,
        emergency_contact: Some(String::from("Head office hotline")),
        special_instructions: None,
    }
}
