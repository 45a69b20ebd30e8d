// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guide instruction mutation operations.

use crate::data_models::NewGuideInstructionRow;
use crate::diesel_schema::guide_instructions;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Inserts a new guide instruction row and returns its assigned identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_guide_instruction(
    conn: &mut SqliteConnection,
    row: &NewGuideInstructionRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(guide_instructions::table)
        .values(row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_guide_instruction: {e}")))?;
    get_last_insert_rowid(conn)
}

/// Updates an existing guide instruction row in place.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_guide_instruction(
    conn: &mut SqliteConnection,
    instruction_id: i64,
    row: &NewGuideInstructionRow,
) -> Result<(), PersistenceError> {
    diesel::update(
        guide_instructions::table.filter(guide_instructions::instruction_id.eq(instruction_id)),
    )
    .set(row)
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_guide_instruction: {e}")))?;
    Ok(())
}

/// Deletes the guide instruction row for a case.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_guide_instruction_for_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(guide_instructions::table.filter(guide_instructions::case_id.eq(case_id)))
        .execute(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("delete_guide_instruction_for_case: {e}"))
        })?;
    Ok(())
}
