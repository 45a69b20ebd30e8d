// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for case opening and reference issuance.

use crate::{Command, CoreError, IssuedReferences, open_case};
use gf_tour_domain::{CaseReference, CaseStatus, DomainError};
use time::macros::date;

use super::helpers::{create_test_actor, create_test_cause, test_now};

fn open_command(file_code: &str) -> Command {
    Command::OpenCase {
        file_code: String::from(file_code),
        destination: String::from("Osaka"),
        manager: String::from("Kim"),
        passenger_count: 12,
        departure_date: date!(2026 - 04 - 01),
        return_date: date!(2026 - 04 - 05),
        remarks: None,
    }
}

#[test]
fn test_first_case_of_day_gets_sequence_001() {
    let issued = IssuedReferences::new();

    let result = open_case(
        &issued,
        "GF",
        open_command("FC-1001"),
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    )
    .unwrap();

    assert_eq!(
        result.new_state.case.reference.value(),
        "GF-20260314-001"
    );
    assert_eq!(result.new_state.case.status, CaseStatus::New);
    assert!(result.new_state.documents.is_empty());
}

#[test]
fn test_sequential_opens_issue_consecutive_sequences() {
    let mut issued = IssuedReferences::new();

    for expected in 1..=4_u16 {
        let result = open_case(
            &issued,
            "GF",
            open_command("FC-1001"),
            create_test_actor(),
            create_test_cause(),
            date!(2026 - 03 - 14),
            test_now(),
        )
        .unwrap();

        let reference = result.new_state.case.reference.clone();
        assert_eq!(reference.sequence(), expected);
        issued.add(reference);
    }
}

#[test]
fn test_exhausted_day_fails_with_capacity_error() {
    let mut issued = IssuedReferences::new();
    issued.add(CaseReference::parse("GF-20260314-999").unwrap());

    let result = open_case(
        &issued,
        "GF",
        open_command("FC-1001"),
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DailyCapacityExceeded { .. })
    ));
}

#[test]
fn test_open_case_validates_fields() {
    let issued = IssuedReferences::new();

    let command = Command::OpenCase {
        file_code: String::new(),
        destination: String::from("Osaka"),
        manager: String::from("Kim"),
        passenger_count: 12,
        departure_date: date!(2026 - 04 - 01),
        return_date: date!(2026 - 04 - 05),
        remarks: None,
    };
    let result = open_case(
        &issued,
        "GF",
        command,
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidFileCode(_))
    ));

    let command = Command::OpenCase {
        file_code: String::from("FC-1001"),
        destination: String::from("Osaka"),
        manager: String::from("Kim"),
        passenger_count: 12,
        departure_date: date!(2026 - 04 - 05),
        return_date: date!(2026 - 04 - 01),
        remarks: None,
    };
    let result = open_case(
        &issued,
        "GF",
        command,
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidTravelDates { .. })
    ));
}

#[test]
fn test_open_case_produces_one_audit_event() {
    let issued = IssuedReferences::new();

    let result = open_case(
        &issued,
        "GF",
        open_command("FC-1001"),
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.audit_event.action.name, "OpenCase");
    assert_eq!(
        result.audit_event.case_reference,
        result.new_state.case.reference
    );
    assert!(result.audit_event.before.data.contains("cases_issued_on_day=0"));
}

#[test]
fn test_open_case_rejects_other_commands() {
    let issued = IssuedReferences::new();

    let result = open_case(
        &issued,
        "GF",
        Command::FinalizeGuideInstruction,
        create_test_actor(),
        create_test_cause(),
        date!(2026 - 03 - 14),
        test_now(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Internal(_)));
}
