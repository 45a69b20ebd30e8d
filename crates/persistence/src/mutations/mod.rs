// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Most mutations use Diesel DSL; the only backend-specific helper is
//! `last_insert_rowid()` from the `sqlite` module. Unique-constraint
//! violations on `cases.reference` and `case_documents (case_id,
//! document_type)` are mapped to dedicated error variants so callers can
//! treat the race as the matching domain condition.

pub mod audit;
pub mod cases;
pub mod documents;
pub mod guides;
pub mod settlements;
