// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the irreversible guide instruction lifecycle.

use crate::{Command, CoreError, apply};
use gf_tour_domain::{DomainError, GuideInstructionStatus};

use super::helpers::{
    create_case_state, create_test_actor, create_test_cause, sample_guide_fields, test_now,
    with_guide_instruction,
};

#[test]
fn test_save_creates_a_draft_instruction() {
    let state = create_case_state();

    let result = apply(
        &state,
        Command::SaveGuideInstruction {
            fields: sample_guide_fields(),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let instruction = result.new_state.guide_instruction.unwrap();
    assert_eq!(instruction.status, GuideInstructionStatus::Draft);
    assert_eq!(instruction.fields.guide_name, "Lee Min");
}

#[test]
fn test_save_overwrites_an_existing_draft() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Draft);

    let mut fields = sample_guide_fields();
    fields.safety_rules = Some(String::from("Updated rules"));

    let result = apply(
        &state,
        Command::SaveGuideInstruction { fields },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let instruction = result.new_state.guide_instruction.unwrap();
    assert_eq!(
        instruction.fields.safety_rules.as_deref(),
        Some("Updated rules")
    );
    assert_eq!(instruction.status, GuideInstructionStatus::Draft);
}

#[test]
fn test_finalize_moves_draft_to_finalized() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Draft);

    let result = apply(
        &state,
        Command::FinalizeGuideInstruction,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(
        result.new_state.guide_instruction.unwrap().status,
        GuideInstructionStatus::Finalized
    );
}

#[test]
fn test_finalize_twice_fails() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Finalized);

    let result = apply(
        &state,
        Command::FinalizeGuideInstruction,
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
fn test_distribute_before_finalize_fails() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Draft);

    let result = apply(
        &state,
        Command::DistributeGuideInstruction,
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
fn test_distribute_moves_finalized_to_distributed() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Finalized);

    let result = apply(
        &state,
        Command::DistributeGuideInstruction,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(
        result.new_state.guide_instruction.unwrap().status,
        GuideInstructionStatus::Distributed
    );
}

#[test]
fn test_distributed_instruction_rejects_saves() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Distributed);

    let result = apply(
        &state,
        Command::SaveGuideInstruction {
            fields: sample_guide_fields(),
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ImmutableInstruction {
            operation: "updated",
            ..
        })
    ));
}

#[test]
fn test_distributed_instruction_rejects_deletion() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Distributed);

    let result = apply(
        &state,
        Command::DeleteGuideInstruction,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ImmutableInstruction {
            operation: "deleted",
            ..
        })
    ));
}

#[test]
fn test_draft_instruction_can_be_deleted() {
    let state = with_guide_instruction(create_case_state(), GuideInstructionStatus::Draft);

    let result = apply(
        &state,
        Command::DeleteGuideInstruction,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert!(result.new_state.guide_instruction.is_none());
}

#[test]
fn test_lifecycle_operations_require_an_instruction() {
    let state = create_case_state();

    for command in [
        Command::FinalizeGuideInstruction,
        Command::DistributeGuideInstruction,
        Command::DeleteGuideInstruction,
    ] {
        let result = apply(
            &state,
            command,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        );
        assert!(matches!(
            result.unwrap_err(),
            CoreError::DomainViolation(DomainError::GuideInstructionNotFound { .. })
        ));
    }
}

#[test]
fn test_empty_guide_name_is_rejected() {
    let state = create_case_state();

    let mut fields = sample_guide_fields();
    fields.guide_name = String::new();

    let result = apply(
        &state,
        Command::SaveGuideInstruction { fields },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidGuideName(_))
    ));
}
