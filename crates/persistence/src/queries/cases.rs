// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case query operations.

use crate::data_models::CaseRow;
use crate::diesel_schema::cases;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Looks up a case row by its reference string.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_case_row_by_reference(
    conn: &mut SqliteConnection,
    reference: &str,
) -> Result<Option<CaseRow>, PersistenceError> {
    cases::table
        .filter(cases::reference.eq(reference))
        .first::<CaseRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_case_row_by_reference: {e}")))
}

/// Checks whether a case with the given reference exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn case_exists(
    conn: &mut SqliteConnection,
    reference: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = cases::table
        .filter(cases::reference.eq(reference))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("case_exists: {e}")))?;
    Ok(count > 0)
}

/// Returns the reference strings of every case issued on the given day.
///
/// The day is the date embedded in the reference, stored denormalized in
/// `reference_day` so issuance scans stay indexed.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn issued_references_on_day(
    conn: &mut SqliteConnection,
    day: &str,
) -> Result<Vec<String>, PersistenceError> {
    cases::table
        .filter(cases::reference_day.eq(day))
        .select(cases::reference)
        .order(cases::reference.asc())
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("issued_references_on_day: {e}")))
}
