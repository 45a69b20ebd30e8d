// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settlement query operations.

use crate::data_models::SettlementRow;
use crate::diesel_schema::{cases, settlement_records};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Looks up the settlement row for a case, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_settlement_row_by_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Option<SettlementRow>, PersistenceError> {
    settlement_records::table
        .filter(settlement_records::case_id.eq(case_id))
        .first::<SettlementRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_settlement_row_by_case: {e}")))
}

/// Returns every settlement row joined with its owning case reference.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_settlement_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<(SettlementRow, String)>, PersistenceError> {
    settlement_records::table
        .inner_join(cases::table)
        .select((settlement_records::all_columns, cases::reference))
        .order(settlement_records::settlement_id.asc())
        .load::<(SettlementRow, String)>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("all_settlement_rows: {e}")))
}

/// Returns settlement rows created within `[start, end)`, joined with
/// their owning case reference.
///
/// Bounds are RFC 3339 TEXT; all timestamps are stored in UTC so the
/// lexicographic comparison matches chronological order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn settlement_rows_in_range(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<(SettlementRow, String)>, PersistenceError> {
    settlement_records::table
        .inner_join(cases::table)
        .filter(settlement_records::created_at.ge(start))
        .filter(settlement_records::created_at.lt(end))
        .select((settlement_records::all_columns, cases::reference))
        .order(settlement_records::settlement_id.asc())
        .load::<(SettlementRow, String)>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("settlement_rows_in_range: {e}")))
}
