// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guide instruction lifecycle.
//!
//! A guide instruction moves draft → finalized → distributed. Both
//! transitions are one-directional; once distributed, no field may change
//! and the record cannot be deleted.

use crate::error::DomainError;
use crate::reference::CaseReference;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of a guide instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuideInstructionStatus {
    /// Being written; freely editable.
    #[default]
    Draft,
    /// Content confirmed; awaiting distribution to the guide.
    Finalized,
    /// Handed to the guide; immutable from here on.
    Distributed,
}

impl GuideInstructionStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
            Self::Distributed => "distributed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "finalized" => Ok(Self::Finalized),
            "distributed" => Ok(Self::Distributed),
            _ => Err(DomainError::InvalidGuideStatus(s.to_string())),
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are Draft → Finalized and Finalized → Distributed.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Finalized) | (Self::Finalized, Self::Distributed)
        )
    }

    /// Returns whether the instruction is locked against edits and deletion.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Distributed)
    }
}

impl std::fmt::Display for GuideInstructionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GuideInstructionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// The editable field set of a guide instruction.
///
/// Grouped so that create-or-update intents carry one value instead of
/// seven parallel parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideInstructionFields {
    /// The assigned guide's name.
    pub guide_name: String,
    /// The assigned guide's phone number.
    pub guide_phone: Option<String>,
    /// The day-by-day travel schedule.
    pub travel_schedule: Option<String>,
    /// Group safety rules.
    pub safety_rules: Option<String>,
    /// Precautions specific to the group or destination.
    pub precautions: Option<String>,
    /// Emergency contact sheet.
    pub emergency_contact: Option<String>,
    /// Any special instructions for the guide.
    pub special_instructions: Option<String>,
}

/// The on-tour safety and logistics document for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideInstruction {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the instruction has not been persisted yet.
    pub instruction_id: Option<i64>,
    /// The case this instruction belongs to.
    pub case_reference: CaseReference,
    /// The editable field set.
    pub fields: GuideInstructionFields,
    /// The lifecycle status.
    pub status: GuideInstructionStatus,
    /// When the instruction was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the instruction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl GuideInstruction {
    /// Creates a new draft instruction, without a persisted ID.
    #[must_use]
    pub const fn new(
        case_reference: CaseReference,
        fields: GuideInstructionFields,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            instruction_id: None,
            case_reference,
            fields,
            status: GuideInstructionStatus::Draft,
            created_at,
            updated_at: created_at,
        }
    }
}
