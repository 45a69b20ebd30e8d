// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the GF Tour back-office.
//!
//! This crate provides `SQLite` persistence for cases, their workflow
//! documents, settlement records, guide instructions, and audit events.
//! It is built on Diesel with embedded migrations.
//!
//! ## Consistency guarantees
//!
//! - `persist_transition` writes the audit event and the reconciled case
//!   state in one transaction: a transition is either fully recorded or
//!   not at all.
//! - Unique constraints back the core's read-then-write checks: a
//!   reference collision surfaces as `DuplicateReference` (the caller
//!   regenerates and retries), a (case, document type) collision as
//!   `DuplicateDocument`.
//! - Foreign key enforcement is verified at startup.
//!
//! ## Testing
//!
//! In-memory databases receive unique names from an atomic counter, so
//! tests are isolated without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use gf_tour::{CaseState, TransitionResult};
use gf_tour_audit::AuditEvent;
use gf_tour_domain::{
    Case, CaseDocument, CaseReference, DocumentType, GuideInstruction, SettlementRecord,
};
use time::{Date, OffsetDateTime};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::StoredAuditEvent;
pub use error::PersistenceError;

use data_models::{
    NewCaseDocumentRow, NewCaseRow, NewGuideInstructionRow, NewSettlementRow, format_date,
    format_datetime,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the case stores and the audit log.
///
/// The adapter holds the connection exclusively; callers access the
/// database only through it, which serializes the read-validate-write
/// cycles of the core's operations within a process.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_gftour_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Case store
    // ========================================================================

    /// Looks up a case by its reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub fn find_case_by_reference(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Option<Case>, PersistenceError> {
        queries::cases::find_case_row_by_reference(&mut self.conn, &reference.value())?
            .map(data_models::CaseRow::try_into_domain)
            .transpose()
    }

    /// Checks whether a case with the given reference exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn case_exists(&mut self, reference: &CaseReference) -> Result<bool, PersistenceError> {
        queries::cases::case_exists(&mut self.conn, &reference.value())
    }

    /// Returns every reference issued on the given day.
    ///
    /// This is the issued set the reference generator scans; corrupt rows
    /// fail loudly rather than silently shrinking the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored reference does not
    /// parse.
    pub fn issued_references_on(
        &mut self,
        day: Date,
    ) -> Result<Vec<CaseReference>, PersistenceError> {
        let day_text = format_date(day)?;
        queries::cases::issued_references_on_day(&mut self.conn, &day_text)?
            .iter()
            .map(|value| {
                CaseReference::parse(value).map_err(|e| {
                    PersistenceError::SerializationError(format!("stored reference: {e}"))
                })
            })
            .collect()
    }

    /// Loads the complete state of a case: the case row plus its
    /// documents (in workflow order), settlement record, and guide
    /// instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails or a row is corrupt.
    pub fn load_case_state(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Option<CaseState>, PersistenceError> {
        load_state(&mut self.conn, reference)
    }

    /// Deletes a case row.
    ///
    /// The caller validates deletability (no dependent artifacts) through
    /// the core before calling this; the schema's foreign keys reject the
    /// delete otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist, or a query error.
    pub fn delete_case(&mut self, reference: &CaseReference) -> Result<(), PersistenceError> {
        let row = queries::cases::find_case_row_by_reference(&mut self.conn, &reference.value())?
            .ok_or_else(|| {
                PersistenceError::NotFound(format!("case '{reference}' does not exist"))
            })?;
        mutations::cases::delete_case(&mut self.conn, row.case_id)?;
        info!(reference = %reference, "deleted case");
        Ok(())
    }

    // ========================================================================
    // Document store
    // ========================================================================

    /// Returns all documents for a case, ordered by workflow position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist, or a query error.
    pub fn documents_for_case(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Vec<CaseDocument>, PersistenceError> {
        let case_id = require_case_id(&mut self.conn, reference)?;
        queries::documents::document_rows_for_case(&mut self.conn, case_id)?
            .into_iter()
            .map(|row| row.try_into_domain(reference.clone()))
            .collect()
    }

    /// Looks up the document of a given type for a case, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist, or a query error.
    pub fn find_document_by_case_and_type(
        &mut self,
        reference: &CaseReference,
        document_type: DocumentType,
    ) -> Result<Option<CaseDocument>, PersistenceError> {
        let case_id = require_case_id(&mut self.conn, reference)?;
        queries::documents::find_document_row_by_case_and_type(
            &mut self.conn,
            case_id,
            document_type.as_str(),
        )?
        .map(|row| row.try_into_domain(reference.clone()))
        .transpose()
    }

    // ========================================================================
    // Settlement store
    // ========================================================================

    /// Looks up the settlement record for a case, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist, or a query error.
    pub fn find_settlement_by_case(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Option<SettlementRecord>, PersistenceError> {
        let case_id = require_case_id(&mut self.conn, reference)?;
        queries::settlements::find_settlement_row_by_case(&mut self.conn, case_id)?
            .map(|row| row.try_into_domain(reference.clone()))
            .transpose()
    }

    /// Returns every settlement record in the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn all_settlements(&mut self) -> Result<Vec<SettlementRecord>, PersistenceError> {
        queries::settlements::all_settlement_rows(&mut self.conn)?
            .into_iter()
            .map(row_with_reference_into_settlement)
            .collect()
    }

    /// Returns the settlement records created within `[start, end]`
    /// (whole days, inclusive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn settlements_in_range(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<SettlementRecord>, PersistenceError> {
        let start_bound = format_datetime(start.midnight().assume_utc())?;
        let end_bound = format_datetime(
            end.midnight()
                .assume_utc()
                .saturating_add(time::Duration::days(1)),
        )?;
        queries::settlements::settlement_rows_in_range(&mut self.conn, &start_bound, &end_bound)?
            .into_iter()
            .map(row_with_reference_into_settlement)
            .collect()
    }

    // ========================================================================
    // Guide instruction store
    // ========================================================================

    /// Looks up the guide instruction for a case, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist, or a query error.
    pub fn find_guide_instruction_by_case(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Option<GuideInstruction>, PersistenceError> {
        let case_id = require_case_id(&mut self.conn, reference)?;
        queries::guides::find_guide_row_by_case(&mut self.conn, case_id)?
            .map(|row| row.try_into_domain(reference.clone()))
            .transpose()
    }

    // ========================================================================
    // Transitions & audit
    // ========================================================================

    /// Persists a transition result: the audit event plus the reconciled
    /// case state, in one transaction.
    ///
    /// Returns the state re-loaded from storage, with identifiers
    /// assigned to newly inserted artifacts.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition result to persist
    /// * `recorded_at` - The timestamp recorded on the audit event
    ///
    /// # Errors
    ///
    /// Returns `DuplicateReference` or `DuplicateDocument` when a unique
    /// constraint reports a concurrent writer, or another persistence
    /// error; in every case the transaction is rolled back.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        recorded_at: OffsetDateTime,
    ) -> Result<CaseState, PersistenceError> {
        let state = self.conn.transaction::<CaseState, PersistenceError, _>(|conn| {
            mutations::audit::insert_audit_event(conn, &result.audit_event, recorded_at)?;
            reconcile_state(conn, &result.new_state)?;
            load_state(conn, &result.new_state.case.reference)?.ok_or_else(|| {
                PersistenceError::Other(String::from(
                    "case state missing immediately after reconcile",
                ))
            })
        })?;
        info!(
            reference = %state.case.reference,
            action = %result.audit_event.action.name,
            "persisted transition"
        );
        Ok(state)
    }

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn persist_audit_event(
        &mut self,
        event: &AuditEvent,
        recorded_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::audit::insert_audit_event(&mut self.conn, event, recorded_at)
    }

    /// Returns all audit events recorded for a case, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a payload does not decode.
    pub fn audit_events_for_case(
        &mut self,
        reference: &CaseReference,
    ) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
        queries::audit::audit_event_rows_for_case(&mut self.conn, &reference.value())?
            .into_iter()
            .map(data_models::AuditEventRow::try_into_stored)
            .collect()
    }
}

fn row_with_reference_into_settlement(
    (row, reference): (data_models::SettlementRow, String),
) -> Result<SettlementRecord, PersistenceError> {
    let reference = CaseReference::parse(&reference)
        .map_err(|e| PersistenceError::SerializationError(format!("stored reference: {e}")))?;
    row.try_into_domain(reference)
}

fn require_case_id(
    conn: &mut SqliteConnection,
    reference: &CaseReference,
) -> Result<i64, PersistenceError> {
    queries::cases::find_case_row_by_reference(conn, &reference.value())?
        .map(|row| row.case_id)
        .ok_or_else(|| PersistenceError::NotFound(format!("case '{reference}' does not exist")))
}

/// Loads the full state of a case from its rows.
fn load_state(
    conn: &mut SqliteConnection,
    reference: &CaseReference,
) -> Result<Option<CaseState>, PersistenceError> {
    let Some(case_row) = queries::cases::find_case_row_by_reference(conn, &reference.value())?
    else {
        return Ok(None);
    };
    let case_id = case_row.case_id;
    let case = case_row.try_into_domain()?;

    let documents = queries::documents::document_rows_for_case(conn, case_id)?
        .into_iter()
        .map(|row| row.try_into_domain(reference.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let settlement = queries::settlements::find_settlement_row_by_case(conn, case_id)?
        .map(|row| row.try_into_domain(reference.clone()))
        .transpose()?;

    let guide_instruction = queries::guides::find_guide_row_by_case(conn, case_id)?
        .map(|row| row.try_into_domain(reference.clone()))
        .transpose()?;

    Ok(Some(CaseState {
        case,
        documents,
        settlement,
        guide_instruction,
    }))
}

/// Reconciles a transition's new state against the stored rows.
///
/// Artifacts without identifiers are inserted; artifacts with
/// identifiers are updated in place; stored artifacts absent from the
/// new state are deleted.
fn reconcile_state(
    conn: &mut SqliteConnection,
    state: &CaseState,
) -> Result<i64, PersistenceError> {
    let reference = state.case.reference.value();

    // A case without an identifier is a fresh insert: matching on the
    // reference instead would silently overwrite a concurrently issued
    // case rather than surfacing the collision.
    let case_row = NewCaseRow::from_domain(&state.case)?;
    let case_id = match state.case.case_id {
        Some(case_id) => {
            mutations::cases::update_case(conn, case_id, &case_row)?;
            case_id
        }
        None => mutations::cases::insert_case(conn, &case_row)?,
    };

    // Documents: delete rows that disappeared from the state, then
    // insert/update the survivors.
    let kept: Vec<i64> = state
        .documents
        .iter()
        .filter_map(|document| document.document_id)
        .collect();
    for stored_id in queries::documents::document_ids_for_case(conn, case_id)? {
        if !kept.contains(&stored_id) {
            mutations::documents::delete_document(conn, stored_id)?;
        }
    }
    for document in &state.documents {
        let row = NewCaseDocumentRow::from_domain(document, case_id)?;
        match document.document_id {
            Some(document_id) => mutations::documents::update_document(conn, document_id, &row)?,
            None => {
                mutations::documents::insert_document(conn, &row, &reference)?;
            }
        }
    }

    let stored_settlement = queries::settlements::find_settlement_row_by_case(conn, case_id)?;
    match (&state.settlement, stored_settlement) {
        (Some(record), Some(stored)) => {
            let row = NewSettlementRow::from_domain(record, case_id)?;
            mutations::settlements::update_settlement(conn, stored.settlement_id, &row)?;
        }
        (Some(record), None) => {
            let row = NewSettlementRow::from_domain(record, case_id)?;
            mutations::settlements::insert_settlement(conn, &row)?;
        }
        (None, Some(_)) => mutations::settlements::delete_settlement_for_case(conn, case_id)?,
        (None, None) => {}
    }

    let stored_guide = queries::guides::find_guide_row_by_case(conn, case_id)?;
    match (&state.guide_instruction, stored_guide) {
        (Some(instruction), Some(stored)) => {
            let row = NewGuideInstructionRow::from_domain(instruction, case_id)?;
            mutations::guides::update_guide_instruction(conn, stored.instruction_id, &row)?;
        }
        (Some(instruction), None) => {
            let row = NewGuideInstructionRow::from_domain(instruction, case_id)?;
            mutations::guides::insert_guide_instruction(conn, &row)?;
        }
        (None, Some(_)) => mutations::guides::delete_guide_instruction_for_case(conn, case_id)?,
        (None, None) => {}
    }

    Ok(case_id)
}
