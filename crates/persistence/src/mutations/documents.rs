// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document mutation operations.

use crate::data_models::NewCaseDocumentRow;
use crate::diesel_schema::case_documents;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;

/// Inserts a new document row and returns its assigned identifier.
///
/// A unique violation on (`case_id`, `document_type`) means another
/// writer created the same document concurrently; it surfaces as
/// `DuplicateDocument` so the caller can report the domain condition.
///
/// # Errors
///
/// Returns `DuplicateDocument` on a (case, type) collision, or a query
/// error otherwise.
pub fn insert_document(
    conn: &mut SqliteConnection,
    row: &NewCaseDocumentRow,
    case_reference: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(case_documents::table)
        .values(row)
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateDocument {
                    reference: case_reference.to_string(),
                    document_type: row.document_type.clone(),
                }
            }
            other => PersistenceError::QueryFailed(format!("insert_document: {other}")),
        })?;
    get_last_insert_rowid(conn)
}

/// Updates an existing document row in place.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_document(
    conn: &mut SqliteConnection,
    document_id: i64,
    row: &NewCaseDocumentRow,
) -> Result<(), PersistenceError> {
    diesel::update(case_documents::table.filter(case_documents::document_id.eq(document_id)))
        .set(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_document: {e}")))?;
    Ok(())
}

/// Deletes a document row.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_document(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(case_documents::table.filter(case_documents::document_id.eq(document_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_document: {e}")))?;
    Ok(())
}
