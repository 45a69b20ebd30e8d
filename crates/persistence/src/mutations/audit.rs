// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutation operations.

use crate::data_models::{ActionData, ActorData, CauseData, NewAuditEventRow, format_datetime};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use diesel::SqliteConnection;
use gf_tour_audit::AuditEvent;
use time::OffsetDateTime;

/// Persists an audit event and returns its assigned identifier.
///
/// Events are immutable: there is deliberately no update or delete
/// counterpart to this function.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let row = NewAuditEventRow {
        case_reference: event.case_reference.value(),
        actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
        cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
        action_json: serde_json::to_string(&ActionData::from(&event.action))?,
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
        created_at: format_datetime(recorded_at)?,
    };

    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_audit_event: {e}")))?;
    get_last_insert_rowid(conn)
}
