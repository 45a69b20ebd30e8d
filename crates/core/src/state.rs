// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gf_tour_audit::{AuditEvent, StateSnapshot};
use gf_tour_domain::{Case, CaseDocument, CaseReference, DocumentType, GuideInstruction,
    SettlementRecord};

/// The set of case references already issued, consulted when opening a case.
///
/// This is separate from the scoped `CaseState` and represents global
/// system metadata: reference sequences are derived by scanning this set,
/// never from a wall-clock counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedReferences {
    /// All references issued so far, in no particular order.
    pub references: Vec<CaseReference>,
}

impl IssuedReferences {
    /// Creates an empty issued set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            references: Vec::new(),
        }
    }

    /// Checks if a reference has already been issued.
    #[must_use]
    pub fn contains(&self, reference: &CaseReference) -> bool {
        self.references.contains(reference)
    }

    /// Adds a reference to the issued set.
    pub fn add(&mut self, reference: CaseReference) {
        self.references.push(reference);
    }
}

impl Default for IssuedReferences {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete system state scoped to a single case.
///
/// A case owns its workflow documents, its settlement record, and its
/// guide instruction; no state crosses case boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseState {
    /// The case itself.
    pub case: Case,
    /// All workflow documents for this case.
    pub documents: Vec<CaseDocument>,
    /// The settlement record, if one exists.
    pub settlement: Option<SettlementRecord>,
    /// The guide instruction, if one exists.
    pub guide_instruction: Option<GuideInstruction>,
}

impl CaseState {
    /// Creates the state for a freshly opened case with no artifacts.
    ///
    /// # Arguments
    ///
    /// * `case` - The case this state is scoped to
    #[must_use]
    pub const fn new(case: Case) -> Self {
        Self {
            case,
            documents: Vec::new(),
            settlement: None,
            guide_instruction: None,
        }
    }

    /// Finds a document by its persisted identifier.
    #[must_use]
    pub fn document_by_id(&self, document_id: i64) -> Option<&CaseDocument> {
        self.documents
            .iter()
            .find(|document| document.document_id == Some(document_id))
    }

    /// Finds the document of a given type, if one exists.
    #[must_use]
    pub fn document_by_type(&self, document_type: DocumentType) -> Option<&CaseDocument> {
        self.documents
            .iter()
            .find(|document| document.document_type == document_type)
    }

    /// Returns whether any dependent artifact survives on this case.
    #[must_use]
    pub fn has_dependents(&self) -> bool {
        !self.documents.is_empty() || self.settlement.is_some() || self.guide_instruction.is_some()
    }

    /// Describes the surviving dependents for error reporting.
    #[must_use]
    pub fn dependents_description(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.documents.is_empty() {
            parts.push(format!("{} document(s)", self.documents.len()));
        }
        if self.settlement.is_some() {
            parts.push(String::from("a settlement record"));
        }
        if self.guide_instruction.is_some() {
            parts.push(String::from("a guide instruction"));
        }
        parts.join(", ")
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "case={},status={},documents={},settlement={},guide={}",
            self.case.reference,
            self.case.status,
            self.documents.len(),
            if self.settlement.is_some() {
                "present"
            } else {
                "none"
            },
            self.guide_instruction
                .as_ref()
                .map_or("none", |instruction| instruction.status.as_str()),
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: CaseState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
