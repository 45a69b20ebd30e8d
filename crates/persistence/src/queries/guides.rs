// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guide instruction query operations.

use crate::data_models::GuideInstructionRow;
use crate::diesel_schema::guide_instructions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Looks up the guide instruction row for a case, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_guide_row_by_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Option<GuideInstructionRow>, PersistenceError> {
    guide_instructions::table
        .filter(guide_instructions::case_id.eq(case_id))
        .first::<GuideInstructionRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_guide_row_by_case: {e}")))
}
