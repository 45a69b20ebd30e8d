// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settlement mutation operations.

use crate::data_models::NewSettlementRow;
use crate::diesel_schema::settlement_records;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Inserts a new settlement row and returns its assigned identifier.
///
/// # Errors
///
/// Returns an error if the insert fails; a unique violation on `case_id`
/// indicates a concurrent upsert and surfaces as a database error for the
/// caller to retry.
pub fn insert_settlement(
    conn: &mut SqliteConnection,
    row: &NewSettlementRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(settlement_records::table)
        .values(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_settlement: {e}")))?;
    get_last_insert_rowid(conn)
}

/// Updates an existing settlement row in place.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_settlement(
    conn: &mut SqliteConnection,
    settlement_id: i64,
    row: &NewSettlementRow,
) -> Result<(), PersistenceError> {
    diesel::update(
        settlement_records::table.filter(settlement_records::settlement_id.eq(settlement_id)),
    )
    .set(row)
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_settlement: {e}")))?;
    Ok(())
}

/// Deletes the settlement row for a case.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_settlement_for_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(settlement_records::table.filter(settlement_records::case_id.eq(case_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_settlement_for_case: {e}")))?;
    Ok(())
}
