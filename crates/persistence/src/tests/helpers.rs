// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for persistence tests.
//!
//! States are produced through the core's transition functions, so the
//! rows written here match what the real orchestration produces.

use crate::Persistence;
use gf_tour::{CaseState, Command, IssuedReferences, TransitionResult, apply, open_case};
use gf_tour_audit::{Actor, Cause};
use gf_tour_domain::GuideInstructionFields;
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

pub fn open_case_result(persistence: &mut Persistence) -> TransitionResult {
    let today = date!(2026 - 03 - 14);
    let issued = IssuedReferences {
        references: persistence.issued_references_on(today).unwrap(),
    };
    open_case(
        &issued,
        "GF",
        Command::OpenCase {
            file_code: String::from("FC-1001"),
            destination: String::from("Osaka"),
            manager: String::from("Kim"),
            passenger_count: 12,
            departure_date: date!(2026 - 04 - 01),
            return_date: date!(2026 - 04 - 05),
            remarks: None,
        },
        create_test_actor(),
        create_test_cause(),
        today,
        test_now(),
    )
    .unwrap()
}

/// Opens a case and persists it, returning the stored state.
pub fn persisted_case(persistence: &mut Persistence) -> CaseState {
    let result = open_case_result(persistence);
    persistence.persist_transition(&result, test_now()).unwrap()
}

/// Applies a command to the given state and persists the transition.
pub fn apply_and_persist(
    persistence: &mut Persistence,
    state: &CaseState,
    command: Command,
) -> CaseState {
    let result = apply(
        state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
    persistence.persist_transition(&result, test_now()).unwrap()
}

pub fn sample_guide_fields() -> GuideInstructionFields {
    GuideInstructionFields {
        guide_name: String::from("Lee Min"),
        guide_phone: Some(String::from("010-0000-0000")),
        travel_schedule: Some(String::from("Day 1: arrival")),
        safety_rules: Some(String::from("Stay with the group")),
        precautions: None,
        emergency_contact: Some(String::from("Head office hotline")),
        special_instructions: None,
    }
}
