// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case mutation operations.

use crate::data_models::NewCaseRow;
use crate::diesel_schema::cases;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;

/// Inserts a new case row and returns its assigned identifier.
///
/// A unique violation on the reference column means another writer
/// issued the same reference concurrently; it surfaces as
/// `DuplicateReference` so the caller can regenerate and retry.
///
/// # Errors
///
/// Returns `DuplicateReference` on a reference collision, or a query
/// error otherwise.
pub fn insert_case(
    conn: &mut SqliteConnection,
    row: &NewCaseRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(cases::table)
        .values(row)
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateReference(row.reference.clone())
            }
            other => PersistenceError::QueryFailed(format!("insert_case: {other}")),
        })?;
    get_last_insert_rowid(conn)
}

/// Updates an existing case row in place.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_case(
    conn: &mut SqliteConnection,
    case_id: i64,
    row: &NewCaseRow,
) -> Result<(), PersistenceError> {
    diesel::update(cases::table.filter(cases::case_id.eq(case_id)))
        .set(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_case: {e}")))?;
    Ok(())
}

/// Deletes a case row.
///
/// The caller has already validated that no dependent artifacts survive;
/// the foreign keys would reject the delete otherwise.
///
/// # Errors
///
/// Returns `NotFound` if no row was deleted, or a query error otherwise.
pub fn delete_case(conn: &mut SqliteConnection, case_id: i64) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(cases::table.filter(cases::case_id.eq(case_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_case: {e}")))?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "case {case_id} does not exist"
        )));
    }
    Ok(())
}
