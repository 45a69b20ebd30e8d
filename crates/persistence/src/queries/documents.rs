// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document query operations.

use crate::data_models::CaseDocumentRow;
use crate::diesel_schema::case_documents;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Returns all document rows for a case, ordered by workflow position.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_rows_for_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Vec<CaseDocumentRow>, PersistenceError> {
    case_documents::table
        .filter(case_documents::case_id.eq(case_id))
        .order(case_documents::workflow_position.asc())
        .load::<CaseDocumentRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("document_rows_for_case: {e}")))
}

/// Looks up the document of a given type for a case, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_document_row_by_case_and_type(
    conn: &mut SqliteConnection,
    case_id: i64,
    document_type: &str,
) -> Result<Option<CaseDocumentRow>, PersistenceError> {
    case_documents::table
        .filter(case_documents::case_id.eq(case_id))
        .filter(case_documents::document_type.eq(document_type))
        .first::<CaseDocumentRow>(conn)
        .optional()
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("find_document_row_by_case_and_type: {e}"))
        })
}

/// Returns the identifiers of every document belonging to a case.
///
/// Used when reconciling a transition result against the stored rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_ids_for_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    case_documents::table
        .filter(case_documents::case_id.eq(case_id))
        .select(case_documents::document_id)
        .load::<i64>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("document_ids_for_case: {e}")))
}
