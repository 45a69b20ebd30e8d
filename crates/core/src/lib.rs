// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use gf_tour_domain::DomainError;

// Re-export public types and functions
pub use apply::{apply, open_case};
pub use command::Command;
pub use error::CoreError;
pub use state::{CaseState, IssuedReferences, TransitionResult};

/// Validates that a case carries no dependent artifacts and may be deleted.
///
/// Deletion rules are enforced, never cascaded: a case with any surviving
/// document, settlement record, or guide instruction cannot be removed.
///
/// # Arguments
///
/// * `state` - The case state to check
///
/// # Returns
///
/// * `Ok(())` if the case owns no dependent artifacts
/// * `Err(DomainError::CaseHasDependents)` otherwise
///
/// # Errors
///
/// Returns an error naming the surviving dependents if any exist.
pub fn validate_case_deletable(state: &CaseState) -> Result<(), DomainError> {
    if state.has_dependents() {
        return Err(DomainError::CaseHasDependents {
            reference: state.case.reference.value(),
            dependents: state.dependents_description(),
        });
    }
    Ok(())
}
