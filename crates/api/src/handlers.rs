// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler runs the same cycle: load the current
//! case state, apply a core command to it, and persist the transition
//! (audit event plus reconciled state) in one storage transaction. The
//! system clock is read only here; the core stays deterministic.

use std::str::FromStr;

use gf_tour::{
    CaseState, Command, IssuedReferences, TransitionResult, apply, open_case as core_open_case,
    validate_case_deletable,
};
use gf_tour_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use gf_tour_domain::{
    CaseReference, CaseStatus, CommissionInput, DEFAULT_PREFIX, DocumentStatus, DocumentType,
    DomainError, summarize,
};
use gf_tour_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CaseInfo, CreateDocumentRequest, DeleteCaseRequest, DeleteDocumentRequest, DocumentInfo,
    GuideInstructionInfo, GuideLifecycleRequest, OpenCaseRequest, SaveGuideInstructionRequest,
    SettlementInfo, SettlementSummaryInfo, SettlementSummaryRequest,
    TransitionDocumentStatusRequest, UpdateCaseStatusRequest, UpdateDocumentContentRequest,
    UpsertSettlementRequest,
};

/// Bounded retries for the reference-issuance race.
///
/// Two concurrent openers can derive the same next sequence; the storage
/// uniqueness constraint reports the loser, which rescans and retries.
const MAX_REFERENCE_RETRIES: u32 = 3;

fn parse_reference(value: &str) -> Result<CaseReference, ApiError> {
    CaseReference::parse(value).map_err(translate_domain_error)
}

fn load_required_state(
    persistence: &mut Persistence,
    reference: &CaseReference,
) -> Result<CaseState, ApiError> {
    persistence
        .load_case_state(reference)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::CaseNotFound {
                reference: reference.value(),
            })
        })
}

/// Applies a command to the loaded state and persists the transition.
fn run_transition(
    persistence: &mut Persistence,
    state: &CaseState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<CaseState, ApiError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let result: TransitionResult =
        apply(state, command, actor, cause, now).map_err(translate_core_error)?;
    Ok(persistence.persist_transition(&result, now)?)
}

fn document_info(state: &CaseState, document_id: i64) -> Result<DocumentInfo, ApiError> {
    state
        .document_by_id(document_id)
        .and_then(DocumentInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: format!("document {document_id} missing after persistence"),
        })
}

// ============================================================================
// Cases
// ============================================================================

/// Opens a new case, generating and persisting its reference number.
///
/// The generated sequence is derived from the issued set for today; on a
/// reference collision with a concurrent opener the issuance is retried
/// with a refreshed issued set, a bounded number of times.
///
/// # Errors
///
/// Returns an error if a field is invalid, the day's sequence space is
/// exhausted, or the retries are spent.
pub fn open_case(
    persistence: &mut Persistence,
    request: OpenCaseRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<CaseInfo, ApiError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let today = now.date();

    let command = Command::OpenCase {
        file_code: request.file_code,
        destination: request.destination,
        manager: request.manager,
        passenger_count: request.passenger_count,
        departure_date: request.departure_date,
        return_date: request.return_date,
        remarks: request.remarks,
    };

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        let issued = IssuedReferences {
            references: persistence.issued_references_on(today)?,
        };
        let result: TransitionResult = core_open_case(
            &issued,
            DEFAULT_PREFIX,
            command.clone(),
            actor.clone(),
            cause.clone(),
            today,
            now,
        )
        .map_err(translate_core_error)?;

        match persistence.persist_transition(&result, now) {
            Ok(state) => {
                info!(reference = %state.case.reference, "opened case");
                return Ok(CaseInfo::from_domain(&state.case));
            }
            Err(PersistenceError::DuplicateReference(reference))
                if attempt < MAX_REFERENCE_RETRIES =>
            {
                warn!(
                    reference,
                    attempt, "reference issued concurrently, regenerating"
                );
            }
            Err(other) => return Err(other.into()),
        }
    }
}

/// Looks up a case by its reference.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no case carries the reference.
pub fn get_case(persistence: &mut Persistence, reference: &str) -> Result<CaseInfo, ApiError> {
    let reference = parse_reference(reference)?;
    let state = load_required_state(persistence, &reference)?;
    Ok(CaseInfo::from_domain(&state.case))
}

/// Moves a case to a new lifecycle status.
///
/// # Errors
///
/// Returns an error if the case does not exist or the transition is not
/// permitted by the case lifecycle rules.
pub fn update_case_status(
    persistence: &mut Persistence,
    request: UpdateCaseStatusRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<CaseInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let new_status = CaseStatus::from_str(&request.new_status).map_err(translate_domain_error)?;

    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::UpdateCaseStatus { new_status },
        actor.clone(),
        cause.clone(),
    )?;
    Ok(CaseInfo::from_domain(&stored.case))
}

/// Deletes a case that owns no dependent artifacts.
///
/// Deletion rules are enforced, never cascaded: the operation fails
/// while any document, settlement record, or guide instruction survives.
///
/// # Errors
///
/// Returns an error if the case does not exist or still owns dependents.
pub fn delete_case(
    persistence: &mut Persistence,
    request: DeleteCaseRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<(), ApiError> {
    let reference = parse_reference(&request.reference)?;
    let state = load_required_state(persistence, &reference)?;
    validate_case_deletable(&state).map_err(translate_domain_error)?;

    persistence.delete_case(&reference)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let audit_event = AuditEvent::new(
        actor.clone(),
        cause.clone(),
        Action::new(
            String::from("DeleteCase"),
            Some(format!("Deleted case {reference}")),
        ),
        state.to_snapshot(),
        StateSnapshot::new(String::from("case deleted")),
        reference.clone(),
    );
    persistence.persist_audit_event(&audit_event, now)?;

    info!(reference = %reference, "deleted case");
    Ok(())
}

// ============================================================================
// Documents
// ============================================================================

/// Creates a workflow document for a case.
///
/// # Errors
///
/// Returns an error if the case does not exist, a document of the type
/// already exists, or the workflow prerequisite is not approved.
pub fn create_document(
    persistence: &mut Persistence,
    request: CreateDocumentRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<DocumentInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let document_type =
        DocumentType::from_str(&request.document_type).map_err(translate_domain_error)?;

    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::CreateDocument {
            document_type,
            title: request.title,
            content: request.content,
        },
        actor.clone(),
        cause.clone(),
    )?;

    stored
        .document_by_type(document_type)
        .and_then(DocumentInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: format!("{document_type} document missing after persistence"),
        })
}

/// Returns all documents of a case in workflow order.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the case does not exist.
pub fn list_case_documents(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<Vec<DocumentInfo>, ApiError> {
    let reference = parse_reference(reference)?;
    if !persistence.case_exists(&reference)? {
        return Err(translate_domain_error(DomainError::CaseNotFound {
            reference: reference.value(),
        }));
    }
    Ok(persistence
        .documents_for_case(&reference)?
        .iter()
        .filter_map(DocumentInfo::from_domain)
        .collect())
}

/// Updates the title and/or content of a document, incrementing its
/// version.
///
/// # Errors
///
/// Returns an error if the document does not exist or is approved.
pub fn update_document_content(
    persistence: &mut Persistence,
    request: UpdateDocumentContentRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<DocumentInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::UpdateDocumentContent {
            document_id: request.document_id,
            title: request.title,
            content: request.content,
        },
        actor.clone(),
        cause.clone(),
    )?;
    document_info(&stored, request.document_id)
}

/// Moves a document to a new approval status.
///
/// Approval records the approver identity and the current time, exactly
/// once; nothing transitions away from the approved status.
///
/// # Errors
///
/// Returns an error if the document does not exist, the transition is
/// not permitted, or approval lacks an approver identity.
pub fn transition_document_status(
    persistence: &mut Persistence,
    request: TransitionDocumentStatusRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<DocumentInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let new_status =
        DocumentStatus::from_str(&request.new_status).map_err(translate_domain_error)?;

    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::TransitionDocumentStatus {
            document_id: request.document_id,
            new_status,
            approver: request.approver,
        },
        actor.clone(),
        cause.clone(),
    )?;
    document_info(&stored, request.document_id)
}

/// Deletes a document that has not been approved.
///
/// # Errors
///
/// Returns an error if the document does not exist or is approved.
pub fn delete_document(
    persistence: &mut Persistence,
    request: DeleteDocumentRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<(), ApiError> {
    let reference = parse_reference(&request.reference)?;
    let state = load_required_state(persistence, &reference)?;
    run_transition(
        persistence,
        &state,
        Command::DeleteDocument {
            document_id: request.document_id,
        },
        actor.clone(),
        cause.clone(),
    )?;
    Ok(())
}

// ============================================================================
// Settlement
// ============================================================================

/// Creates or overwrites the settlement record for a case, recomputing
/// every derived amount.
///
/// # Errors
///
/// Returns an error if the case does not exist, an amount is negative,
/// the rate is out of range, or both a commission amount and rate are
/// supplied.
pub fn upsert_settlement(
    persistence: &mut Persistence,
    request: UpsertSettlementRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<SettlementInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;

    let commission = match (request.commission_amount, request.commission_rate) {
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidInput {
                field: String::from("commission"),
                message: String::from(
                    "commission_amount and commission_rate are mutually exclusive",
                ),
            });
        }
        (Some(amount), None) => CommissionInput::Amount(amount),
        (None, Some(rate)) => CommissionInput::Rate(rate),
        (None, None) => CommissionInput::None,
    };

    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::UpsertSettlement {
            received: request.received,
            sold: request.sold,
            operating_cost: request.operating_cost,
            commission,
            notes: request.notes,
        },
        actor.clone(),
        cause.clone(),
    )?;

    stored
        .settlement
        .as_ref()
        .map(SettlementInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("settlement record missing after persistence"),
        })
}

/// Looks up the settlement record for a case.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the case or its settlement record does
/// not exist.
pub fn get_settlement(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<SettlementInfo, ApiError> {
    let reference = parse_reference(reference)?;
    let state = load_required_state(persistence, &reference)?;
    state
        .settlement
        .as_ref()
        .map(SettlementInfo::from_domain)
        .ok_or_else(|| {
            translate_domain_error(DomainError::SettlementNotFound {
                reference: reference.value(),
            })
        })
}

/// Aggregates settlement totals over all records, or over records
/// created within a date range.
///
/// A pure reduction used for reporting: the empty set yields all-zero
/// totals and a zero profit margin.
///
/// # Errors
///
/// Returns an error if only one bound of the range is supplied or a
/// query fails.
pub fn settlement_summary(
    persistence: &mut Persistence,
    request: &SettlementSummaryRequest,
) -> Result<SettlementSummaryInfo, ApiError> {
    let records = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => persistence.settlements_in_range(start, end)?,
        (None, None) => persistence.all_settlements()?,
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("date_range"),
                message: String::from("start_date and end_date must be supplied together"),
            });
        }
    };

    let summary = summarize(&records);
    Ok(SettlementSummaryInfo::from_domain(&summary, records.len()))
}

// ============================================================================
// Guide instructions
// ============================================================================

/// Creates or overwrites the guide instruction for a case.
///
/// # Errors
///
/// Returns an error if the case does not exist, the guide name is
/// invalid, or the instruction is already distributed.
pub fn save_guide_instruction(
    persistence: &mut Persistence,
    request: SaveGuideInstructionRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<GuideInstructionInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let fields = gf_tour_domain::GuideInstructionFields {
        guide_name: request.guide_name,
        guide_phone: request.guide_phone,
        travel_schedule: request.travel_schedule,
        safety_rules: request.safety_rules,
        precautions: request.precautions,
        emergency_contact: request.emergency_contact,
        special_instructions: request.special_instructions,
    };

    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(
        persistence,
        &state,
        Command::SaveGuideInstruction { fields },
        actor.clone(),
        cause.clone(),
    )?;

    stored
        .guide_instruction
        .as_ref()
        .map(GuideInstructionInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("guide instruction missing after persistence"),
        })
}

/// Looks up the guide instruction for a case.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the case or its instruction does not
/// exist.
pub fn get_guide_instruction(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<GuideInstructionInfo, ApiError> {
    let reference = parse_reference(reference)?;
    let state = load_required_state(persistence, &reference)?;
    state
        .guide_instruction
        .as_ref()
        .map(GuideInstructionInfo::from_domain)
        .ok_or_else(|| {
            translate_domain_error(DomainError::GuideInstructionNotFound {
                reference: reference.value(),
            })
        })
}

fn guide_lifecycle_transition(
    persistence: &mut Persistence,
    request: &GuideLifecycleRequest,
    command: Command,
    actor: &Actor,
    cause: &Cause,
) -> Result<GuideInstructionInfo, ApiError> {
    let reference = parse_reference(&request.reference)?;
    let state = load_required_state(persistence, &reference)?;
    let stored = run_transition(persistence, &state, command, actor.clone(), cause.clone())?;
    stored
        .guide_instruction
        .as_ref()
        .map(GuideInstructionInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("guide instruction missing after persistence"),
        })
}

/// Confirms the guide instruction content (draft → finalized).
///
/// # Errors
///
/// Returns an error unless the instruction exists and is a draft.
pub fn finalize_guide_instruction(
    persistence: &mut Persistence,
    request: &GuideLifecycleRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<GuideInstructionInfo, ApiError> {
    guide_lifecycle_transition(
        persistence,
        request,
        Command::FinalizeGuideInstruction,
        actor,
        cause,
    )
}

/// Hands the guide instruction to the guide (finalized → distributed).
///
/// # Errors
///
/// Returns an error unless the instruction exists and is finalized.
pub fn distribute_guide_instruction(
    persistence: &mut Persistence,
    request: &GuideLifecycleRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<GuideInstructionInfo, ApiError> {
    guide_lifecycle_transition(
        persistence,
        request,
        Command::DistributeGuideInstruction,
        actor,
        cause,
    )
}

/// Deletes the guide instruction of a case.
///
/// # Errors
///
/// Returns an error if the instruction does not exist or is distributed.
pub fn delete_guide_instruction(
    persistence: &mut Persistence,
    request: &GuideLifecycleRequest,
    actor: &Actor,
    cause: &Cause,
) -> Result<(), ApiError> {
    let reference = parse_reference(&request.reference)?;
    let state = load_required_state(persistence, &reference)?;
    run_transition(
        persistence,
        &state,
        Command::DeleteGuideInstruction,
        actor.clone(),
        cause.clone(),
    )?;
    Ok(())
}
