// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These types are distinct from domain types and represent the API
//! contract: enums travel as strings and are parsed explicitly, so a
//! malformed value surfaces as `InvalidInput` rather than a panic.

use gf_tour_domain::{
    Case, CaseDocument, GuideInstruction, SettlementRecord, SettlementSummary,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Request to open a new case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCaseRequest {
    /// The internal file code.
    pub file_code: String,
    /// The travel destination.
    pub destination: String,
    /// The staff member responsible for the case.
    pub manager: String,
    /// Number of passengers travelling.
    pub passenger_count: u32,
    /// Departure date.
    pub departure_date: Date,
    /// Return date.
    pub return_date: Date,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

/// A case as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInfo {
    /// The unique case reference (`PREFIX-YYYYMMDD-NNN`).
    pub reference: String,
    /// The internal file code.
    pub file_code: String,
    /// The travel destination.
    pub destination: String,
    /// The staff member responsible for the case.
    pub manager: String,
    /// Number of passengers travelling.
    pub passenger_count: u32,
    /// Departure date.
    pub departure_date: Date,
    /// Return date.
    pub return_date: Date,
    /// The lifecycle status.
    pub status: String,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// When the case was opened.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the case was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl CaseInfo {
    pub(crate) fn from_domain(case: &Case) -> Self {
        Self {
            reference: case.reference.value(),
            file_code: case.file_code.clone(),
            destination: case.destination.clone(),
            manager: case.manager.clone(),
            passenger_count: case.passenger_count,
            departure_date: case.departure_date,
            return_date: case.return_date,
            status: case.status.as_str().to_string(),
            remarks: case.remarks.clone(),
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

/// Request to move a case to a new lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCaseStatusRequest {
    /// The case reference.
    pub reference: String,
    /// The requested status.
    pub new_status: String,
}

/// Request to delete a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCaseRequest {
    /// The case reference.
    pub reference: String,
}

/// Request to create a workflow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    /// The case reference.
    pub reference: String,
    /// The document type.
    pub document_type: String,
    /// The document title.
    pub title: String,
    /// The free-text document body.
    pub content: String,
}

/// A workflow document as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// The storage-assigned document identifier.
    pub document_id: i64,
    /// The case reference.
    pub reference: String,
    /// The document type.
    pub document_type: String,
    /// The fixed workflow position (1-10).
    pub workflow_position: u8,
    /// The approval status.
    pub status: String,
    /// The document title.
    pub title: String,
    /// The free-text document body.
    pub content: String,
    /// The revision counter.
    pub version: u32,
    /// Who approved the document, once approved.
    pub approved_by: Option<String>,
    /// When the document was approved, once approved.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl DocumentInfo {
    pub(crate) fn from_domain(document: &CaseDocument) -> Option<Self> {
        let document_id = document.document_id?;
        Some(Self {
            document_id,
            reference: document.case_reference.value(),
            document_type: document.document_type.as_str().to_string(),
            workflow_position: document.document_type.position(),
            status: document.status.as_str().to_string(),
            title: document.title.clone(),
            content: document.content.clone(),
            version: document.version,
            approved_by: document.approved_by.clone(),
            approved_at: document.approved_at,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

/// Request to update the title and/or content of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocumentContentRequest {
    /// The case reference.
    pub reference: String,
    /// The document identifier.
    pub document_id: i64,
    /// The new title, if changed.
    pub title: Option<String>,
    /// The new content, if changed.
    pub content: Option<String>,
}

/// Request to move a document to a new approval status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDocumentStatusRequest {
    /// The case reference.
    pub reference: String,
    /// The document identifier.
    pub document_id: i64,
    /// The requested status.
    pub new_status: String,
    /// The approver identity; required when approving.
    pub approver: Option<String>,
}

/// Request to delete a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDocumentRequest {
    /// The case reference.
    pub reference: String,
    /// The document identifier.
    pub document_id: i64,
}

/// Request to create or overwrite the settlement record for a case.
///
/// `commission_amount` and `commission_rate` are mutually exclusive;
/// supplying neither defaults the commission to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertSettlementRequest {
    /// The case reference.
    pub reference: String,
    /// The amount received from the customer.
    pub received: Decimal,
    /// The amount remitted to suppliers.
    pub sold: Decimal,
    /// Operating costs for the case.
    pub operating_cost: Decimal,
    /// An explicit commission amount, used as-is.
    pub commission_amount: Option<Decimal>,
    /// A percentage rate applied to the subtotal.
    pub commission_rate: Option<Decimal>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A settlement record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInfo {
    /// The case reference.
    pub reference: String,
    /// The amount received from the customer.
    pub received: Decimal,
    /// The amount remitted to suppliers.
    pub sold: Decimal,
    /// Operating costs for the case.
    pub operating_cost: Decimal,
    /// Derived: `received − sold − operating_cost`.
    pub sub_total: Decimal,
    /// The commission amount.
    pub commission: Decimal,
    /// Derived: `sub_total − commission`.
    pub unpaid: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the record was last recomputed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SettlementInfo {
    pub(crate) fn from_domain(record: &SettlementRecord) -> Self {
        Self {
            reference: record.case_reference.value(),
            received: record.received,
            sold: record.sold,
            operating_cost: record.operating_cost,
            sub_total: record.sub_total,
            commission: record.commission,
            unpaid: record.unpaid,
            notes: record.notes.clone(),
            updated_at: record.updated_at,
        }
    }
}

/// Request for a settlement summary over all records or a creation-date
/// range (whole days, inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettlementSummaryRequest {
    /// Start of the range, if bounded.
    pub start_date: Option<Date>,
    /// End of the range, if bounded.
    pub end_date: Option<Date>,
}

/// Aggregate settlement totals as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummaryInfo {
    /// Number of records aggregated.
    pub record_count: usize,
    /// Sum of received amounts.
    pub total_received: Decimal,
    /// Sum of sold amounts.
    pub total_sold: Decimal,
    /// Sum of operating costs.
    pub total_operating_cost: Decimal,
    /// Sum of subtotals.
    pub total_sub_total: Decimal,
    /// Sum of commissions.
    pub total_commission: Decimal,
    /// Sum of unpaid amounts.
    pub total_unpaid: Decimal,
    /// `total_sub_total / total_received`, zero when nothing received.
    pub profit_margin: Decimal,
}

impl SettlementSummaryInfo {
    pub(crate) const fn from_domain(summary: &SettlementSummary, record_count: usize) -> Self {
        Self {
            record_count,
            total_received: summary.total_received,
            total_sold: summary.total_sold,
            total_operating_cost: summary.total_operating_cost,
            total_sub_total: summary.total_sub_total,
            total_commission: summary.total_commission,
            total_unpaid: summary.total_unpaid,
            profit_margin: summary.profit_margin,
        }
    }
}

/// Request to create or overwrite the guide instruction for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGuideInstructionRequest {
    /// The case reference.
    pub reference: String,
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

/// A guide instruction as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideInstructionInfo {
    /// The case reference.
    pub reference: String,
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
    /// The lifecycle status.
    pub status: String,
    /// When the instruction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl GuideInstructionInfo {
    pub(crate) fn from_domain(instruction: &GuideInstruction) -> Self {
        Self {
            reference: instruction.case_reference.value(),
            guide_name: instruction.fields.guide_name.clone(),
            guide_phone: instruction.fields.guide_phone.clone(),
            travel_schedule: instruction.fields.travel_schedule.clone(),
            safety_rules: instruction.fields.safety_rules.clone(),
            precautions: instruction.fields.precautions.clone(),
            emergency_contact: instruction.fields.emergency_contact.clone(),
            special_instructions: instruction.fields.special_instructions.clone(),
            status: instruction.status.as_str().to_string(),
            updated_at: instruction.updated_at,
        }
    }
}

/// Request naming only a case, for guide lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideLifecycleRequest {
    /// The case reference.
    pub reference: String,
}
