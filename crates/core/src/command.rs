// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gf_tour_domain::{
    CaseStatus, CommissionInput, DocumentStatus, DocumentType, GuideInstructionFields,
};
use rust_decimal::Decimal;
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new case, generating its reference number.
    OpenCase {
        /// The internal file code.
        file_code: String,
        /// The travel destination.
        destination: String,
        /// The staff member responsible for the case.
        manager: String,
        /// Number of passengers travelling.
        passenger_count: u32,
        /// Departure date.
        departure_date: Date,
        /// Return date.
        return_date: Date,
        /// Free-text remarks.
        remarks: Option<String>,
    },
    /// Move the case to a new lifecycle status.
    UpdateCaseStatus {
        /// The requested status.
        new_status: CaseStatus,
    },
    /// Create a workflow document for the case.
    CreateDocument {
        /// The document type.
        document_type: DocumentType,
        /// The document title.
        title: String,
        /// The free-text document body.
        content: String,
    },
    /// Update the title and/or content of a document.
    UpdateDocumentContent {
        /// The document identifier.
        document_id: i64,
        /// The new title, if changed.
        title: Option<String>,
        /// The new content, if changed.
        content: Option<String>,
    },
    /// Move a document to a new approval status.
    TransitionDocumentStatus {
        /// The document identifier.
        document_id: i64,
        /// The requested status.
        new_status: DocumentStatus,
        /// The approver identity; required when approving.
        approver: Option<String>,
    },
    /// Delete a document.
    DeleteDocument {
        /// The document identifier.
        document_id: i64,
    },
    /// Create or overwrite the settlement record for the case,
    /// recomputing every derived amount.
    UpsertSettlement {
        /// The amount received from the customer.
        received: Decimal,
        /// The amount remitted to suppliers.
        sold: Decimal,
        /// Operating costs for the case.
        operating_cost: Decimal,
        /// How the commission is determined.
        commission: CommissionInput,
        /// Free-text notes.
        notes: Option<String>,
    },
    /// Create or overwrite the guide instruction for the case.
    SaveGuideInstruction {
        /// The editable field set.
        fields: GuideInstructionFields,
    },
    /// Confirm the guide instruction content (draft → finalized).
    FinalizeGuideInstruction,
    /// Hand the guide instruction to the guide (finalized → distributed).
    DistributeGuideInstruction,
    /// Delete the guide instruction.
    DeleteGuideInstruction,
}
