// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Case, CaseReference, CaseStatus};
use time::OffsetDateTime;
use time::macros::date;

fn sample_case() -> Case {
    Case::new(
        CaseReference::parse("GF-20260314-001").unwrap(),
        String::from("FC-1001"),
        String::from("Osaka"),
        String::from("Kim"),
        12,
        date!(2026 - 04 - 01),
        date!(2026 - 04 - 05),
        None,
        OffsetDateTime::UNIX_EPOCH,
    )
}

#[test]
fn test_new_case_starts_in_new_status() {
    let case = sample_case();

    assert_eq!(case.status, CaseStatus::New);
    assert_eq!(case.case_id, None);
    assert_eq!(case.created_at, case.updated_at);
}

#[test]
fn test_case_status_string_round_trip() {
    for status in [
        CaseStatus::New,
        CaseStatus::InProgress,
        CaseStatus::Completed,
        CaseStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
    }
}

#[test]
fn test_case_status_transition_matrix() {
    use CaseStatus::{Cancelled, Completed, InProgress, New};

    assert!(New.can_transition_to(InProgress));
    assert!(InProgress.can_transition_to(Completed));
    assert!(New.can_transition_to(Cancelled));
    assert!(InProgress.can_transition_to(Cancelled));

    assert!(!New.can_transition_to(Completed));
    assert!(!Completed.can_transition_to(InProgress));
    assert!(!Completed.can_transition_to(Cancelled));
    assert!(!Cancelled.can_transition_to(New));
    assert!(!Cancelled.can_transition_to(Cancelled));
}

#[test]
fn test_terminal_statuses() {
    assert!(!CaseStatus::New.is_terminal());
    assert!(!CaseStatus::InProgress.is_terminal());
    assert!(CaseStatus::Completed.is_terminal());
    assert!(CaseStatus::Cancelled.is_terminal());
}

#[test]
fn test_invalid_transition_reports_both_statuses() {
    let err = CaseStatus::Completed
        .validate_transition(CaseStatus::InProgress)
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("completed"));
    assert!(message.contains("in_progress"));
}

#[test]
fn test_unknown_case_status_string_is_rejected() {
    assert!("archived".parse::<CaseStatus>().is_err());
}
