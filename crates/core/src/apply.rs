// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CaseState, IssuedReferences, TransitionResult};
use gf_tour_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gf_tour_domain::{
    Case, CaseDocument, DocumentStatus, DomainError, GuideInstruction, GuideInstructionStatus,
    SettlementAmounts, SettlementRecord, compute_settlement, next_reference,
    sort_by_workflow_order, validate_file_code, validate_guide_name, validate_passenger_count,
    validate_title, validate_travel_dates,
};
use time::{Date, OffsetDateTime};

/// Applies an `OpenCase` command, producing the state of the new case and
/// an audit event.
///
/// The case reference is derived from the already-issued set: the next
/// free sequence for `today`, or sequence 001 if none exist. The caller
/// persists the returned case atomically with its reference; under
/// concurrent issuance the storage uniqueness constraint reports the race
/// and the caller retries with a refreshed issued set.
///
/// # Arguments
///
/// * `issued` - The set of references already issued (immutable)
/// * `prefix` - The reference prefix (e.g., "GF")
/// * `command` - The `OpenCase` command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `today` - The calendar day embedded in the new reference
/// * `now` - The timestamp recorded on the new case
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new case state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - Any case field violates domain rules
/// - The day's reference sequence space is exhausted
pub fn open_case(
    issued: &IssuedReferences,
    prefix: &str,
    command: Command,
    actor: Actor,
    cause: Cause,
    today: Date,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let Command::OpenCase {
        file_code,
        destination,
        manager,
        passenger_count,
        departure_date,
        return_date,
        remarks,
    } = command
    else {
        // Non-open commands operate on an existing case and use apply().
        return Err(CoreError::Internal(String::from(
            "open_case called with a non-OpenCase command",
        )));
    };

    validate_file_code(&file_code)?;
    validate_passenger_count(passenger_count)?;
    validate_travel_dates(departure_date, return_date)?;

    let reference = next_reference(prefix, today, &issued.references)?;

    let issued_today: usize = issued
        .references
        .iter()
        .filter(|existing| existing.day() == today)
        .count();
    let before: StateSnapshot =
        StateSnapshot::new(format!("cases_issued_on_day={issued_today}"));

    let case: Case = Case::new(
        reference.clone(),
        file_code,
        destination.clone(),
        manager,
        passenger_count,
        departure_date,
        return_date,
        remarks,
        now,
    );
    let new_state: CaseState = CaseState::new(case);
    let after: StateSnapshot = new_state.to_snapshot();

    let action: Action = Action::new(
        String::from("OpenCase"),
        Some(format!("Opened case {reference} for {destination}")),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, reference);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Applies a command to the current case state, producing a new state and
/// audit event.
///
/// The input state is never mutated: every transition builds a modified
/// copy, so a failed precondition leaves no side effects.
///
/// # Arguments
///
/// * `state` - The current case state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp recorded on changed artifacts
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates domain rules: a missing
/// artifact, a duplicate document, a workflow-order violation, an
/// immutable artifact, or malformed input.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &CaseState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = state.to_snapshot();
    let reference = state.case.reference.clone();

    let (new_state, action) = match command {
        Command::UpdateCaseStatus { new_status } => {
            state.case.status.validate_transition(new_status)?;

            let mut new_state: CaseState = state.clone();
            let previous = new_state.case.status;
            new_state.case.status = new_status;
            new_state.case.updated_at = now;

            let action: Action = Action::new(
                String::from("UpdateCaseStatus"),
                Some(format!("Case {reference}: {previous} -> {new_status}")),
            );
            (new_state, action)
        }
        Command::CreateDocument {
            document_type,
            title,
            content,
        } => {
            validate_title(&title)?;

            if state.document_by_type(document_type).is_some() {
                return Err(CoreError::DomainViolation(DomainError::DuplicateDocument {
                    reference: reference.value(),
                    document_type,
                }));
            }

            // Positions 2-5 require the previous core document to be
            // approved; position 1 and supplementary types do not.
            if let Some(missing) = document_type.prerequisite() {
                let satisfied = state
                    .document_by_type(missing)
                    .is_some_and(|document| document.status == DocumentStatus::Approved);
                if !satisfied {
                    return Err(CoreError::DomainViolation(DomainError::WorkflowOrder {
                        requested: document_type,
                        missing,
                    }));
                }
            }

            let document: CaseDocument =
                CaseDocument::new(reference.clone(), document_type, title, content, now);

            let mut new_state: CaseState = state.clone();
            new_state.documents.push(document);
            // Keep the in-memory collection in the same order the store
            // returns: by fixed workflow position.
            sort_by_workflow_order(&mut new_state.documents);

            let action: Action = Action::new(
                String::from("CreateDocument"),
                Some(format!(
                    "Created {document_type} document for case {reference}"
                )),
            );
            (new_state, action)
        }
        Command::UpdateDocumentContent {
            document_id,
            title,
            content,
        } => {
            let current = state
                .document_by_id(document_id)
                .ok_or(DomainError::DocumentNotFound { document_id })?;

            if current.status == DocumentStatus::Approved {
                return Err(CoreError::DomainViolation(DomainError::ImmutableDocument {
                    document_id,
                    operation: "updated",
                }));
            }
            if let Some(new_title) = &title {
                validate_title(new_title)?;
            }

            let mut new_state: CaseState = state.clone();
            for document in &mut new_state.documents {
                if document.document_id == Some(document_id) {
                    if let Some(new_title) = title.clone() {
                        document.title = new_title;
                    }
                    if let Some(new_content) = content.clone() {
                        document.content = new_content;
                    }
                    document.version += 1;
                    document.updated_at = now;
                }
            }

            let action: Action = Action::new(
                String::from("UpdateDocumentContent"),
                Some(format!(
                    "Updated content of document {document_id} for case {reference}"
                )),
            );
            (new_state, action)
        }
        Command::TransitionDocumentStatus {
            document_id,
            new_status,
            approver,
        } => {
            let current = state
                .document_by_id(document_id)
                .ok_or(DomainError::DocumentNotFound { document_id })?;

            if current.status == DocumentStatus::Approved {
                return Err(CoreError::DomainViolation(DomainError::ImmutableDocument {
                    document_id,
                    operation: "transitioned",
                }));
            }
            current.status.validate_transition(new_status)?;

            let approver = if new_status == DocumentStatus::Approved {
                Some(approver.ok_or(DomainError::ApproverRequired { document_id })?)
            } else {
                None
            };

            let previous = current.status;
            let mut new_state: CaseState = state.clone();
            for document in &mut new_state.documents {
                if document.document_id == Some(document_id) {
                    if let Some(approver) = approver.clone() {
                        document.record_approval(approver, now);
                    } else {
                        document.status = new_status;
                        document.updated_at = now;
                    }
                }
            }

            let action: Action = Action::new(
                String::from("TransitionDocumentStatus"),
                Some(format!(
                    "Document {document_id} of case {reference}: {previous} -> {new_status}"
                )),
            );
            (new_state, action)
        }
        Command::DeleteDocument { document_id } => {
            let current = state
                .document_by_id(document_id)
                .ok_or(DomainError::DocumentNotFound { document_id })?;

            if current.status == DocumentStatus::Approved {
                return Err(CoreError::DomainViolation(DomainError::ImmutableDocument {
                    document_id,
                    operation: "deleted",
                }));
            }

            let document_type = current.document_type;
            let mut new_state: CaseState = state.clone();
            new_state
                .documents
                .retain(|document| document.document_id != Some(document_id));

            let action: Action = Action::new(
                String::from("DeleteDocument"),
                Some(format!(
                    "Deleted {document_type} document {document_id} from case {reference}"
                )),
            );
            (new_state, action)
        }
        Command::UpsertSettlement {
            received,
            sold,
            operating_cost,
            commission,
            notes,
        } => {
            let amounts: SettlementAmounts =
                compute_settlement(received, sold, operating_cost, commission)?;

            let mut new_state: CaseState = state.clone();
            // The create path becomes an update when a record exists: at
            // most one settlement record per case.
            if let Some(record) = &mut new_state.settlement {
                record.received = received;
                record.sold = sold;
                record.operating_cost = operating_cost;
                record.sub_total = amounts.sub_total;
                record.commission = amounts.commission;
                record.unpaid = amounts.unpaid;
                record.notes = notes;
                record.updated_at = now;
            } else {
                new_state.settlement = Some(SettlementRecord::new(
                    reference.clone(),
                    received,
                    sold,
                    operating_cost,
                    amounts,
                    notes,
                    now,
                ));
            }

            let action: Action = Action::new(
                String::from("UpsertSettlement"),
                Some(format!(
                    "Settlement for case {reference}: sub_total={}, unpaid={}",
                    amounts.sub_total, amounts.unpaid
                )),
            );
            (new_state, action)
        }
        Command::SaveGuideInstruction { fields } => {
            validate_guide_name(&fields.guide_name)?;

            let mut new_state: CaseState = state.clone();
            if let Some(instruction) = &mut new_state.guide_instruction {
                if instruction.status.is_locked() {
                    return Err(CoreError::DomainViolation(
                        DomainError::ImmutableInstruction {
                            reference: reference.value(),
                            operation: "updated",
                        },
                    ));
                }
                instruction.fields = fields;
                instruction.updated_at = now;
            } else {
                new_state.guide_instruction =
                    Some(GuideInstruction::new(reference.clone(), fields, now));
            }

            let action: Action = Action::new(
                String::from("SaveGuideInstruction"),
                Some(format!("Saved guide instruction for case {reference}")),
            );
            (new_state, action)
        }
        Command::FinalizeGuideInstruction => {
            let new_state = transition_guide_instruction(
                state,
                GuideInstructionStatus::Finalized,
                "only a draft instruction can be finalized",
                now,
            )?;

            let action: Action = Action::new(
                String::from("FinalizeGuideInstruction"),
                Some(format!("Finalized guide instruction for case {reference}")),
            );
            (new_state, action)
        }
        Command::DistributeGuideInstruction => {
            let new_state = transition_guide_instruction(
                state,
                GuideInstructionStatus::Distributed,
                "only a finalized instruction can be distributed",
                now,
            )?;

            let action: Action = Action::new(
                String::from("DistributeGuideInstruction"),
                Some(format!(
                    "Distributed guide instruction for case {reference}"
                )),
            );
            (new_state, action)
        }
        Command::DeleteGuideInstruction => {
            let current = state
                .guide_instruction
                .as_ref()
                .ok_or(DomainError::GuideInstructionNotFound {
                    reference: reference.value(),
                })?;

            if current.status.is_locked() {
                return Err(CoreError::DomainViolation(
                    DomainError::ImmutableInstruction {
                        reference: reference.value(),
                        operation: "deleted",
                    },
                ));
            }

            let mut new_state: CaseState = state.clone();
            new_state.guide_instruction = None;

            let action: Action = Action::new(
                String::from("DeleteGuideInstruction"),
                Some(format!("Deleted guide instruction for case {reference}")),
            );
            (new_state, action)
        }
        Command::OpenCase { .. } => {
            // OpenCase creates a case from nothing and uses open_case().
            return Err(CoreError::Internal(String::from(
                "apply called with an OpenCase command",
            )));
        }
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, reference);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Advances the guide instruction one step along its irreversible
/// lifecycle, returning the modified state copy.
fn transition_guide_instruction(
    state: &CaseState,
    target: GuideInstructionStatus,
    reason: &str,
    now: OffsetDateTime,
) -> Result<CaseState, CoreError> {
    let current = state
        .guide_instruction
        .as_ref()
        .ok_or(DomainError::GuideInstructionNotFound {
            reference: state.case.reference.value(),
        })?;

    if !current.status.can_transition_to(target) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: current.status.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: reason.to_string(),
            },
        ));
    }

    let mut new_state: CaseState = state.clone();
    if let Some(instruction) = &mut new_state.guide_instruction {
        instruction.status = target;
        instruction.updated_at = now;
    }
    Ok(new_state)
}
