// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event query operations.

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Returns all audit event rows for a case, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn audit_event_rows_for_case(
    conn: &mut SqliteConnection,
    case_reference: &str,
) -> Result<Vec<AuditEventRow>, PersistenceError> {
    audit_events::table
        .filter(audit_events::case_reference.eq(case_reference))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("audit_event_rows_for_case: {e}")))
}
