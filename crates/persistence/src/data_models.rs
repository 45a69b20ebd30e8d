// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and conversions between storage rows and domain types.
//!
//! Timestamps are stored as RFC 3339 TEXT in UTC, dates as ISO `YYYY-MM-DD`
//! TEXT, and monetary amounts as decimal TEXT. Conversions fail with
//! `SerializationError` rather than panicking on corrupt rows.

use crate::diesel_schema::{audit_events, case_documents, cases, guide_instructions,
    settlement_records};
use crate::error::PersistenceError;
use diesel::prelude::*;
use gf_tour_audit::{Action, Actor, Cause};
use gf_tour_domain::{
    Case, CaseDocument, CaseReference, CaseStatus, DocumentStatus, DocumentType, GuideInstruction,
    GuideInstructionFields, GuideInstructionStatus, SettlementRecord,
};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Formats a timestamp as RFC 3339 TEXT.
pub(crate) fn format_datetime(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("format timestamp: {e}")))
}

/// Parses an RFC 3339 TEXT timestamp.
pub(crate) fn parse_datetime(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("parse timestamp '{value}': {e}")))
}

/// Formats a date as ISO `YYYY-MM-DD` TEXT.
pub(crate) fn format_date(value: Date) -> Result<String, PersistenceError> {
    let format = format_description!("[year]-[month]-[day]");
    value
        .format(&format)
        .map_err(|e| PersistenceError::SerializationError(format!("format date: {e}")))
}

/// Parses an ISO `YYYY-MM-DD` TEXT date.
pub(crate) fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|e| PersistenceError::SerializationError(format!("parse date '{value}': {e}")))
}

/// Parses a decimal TEXT amount.
pub(crate) fn parse_decimal(value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value)
        .map_err(|e| PersistenceError::SerializationError(format!("parse amount '{value}': {e}")))
}

fn parse_reference(value: &str) -> Result<CaseReference, PersistenceError> {
    CaseReference::parse(value)
        .map_err(|e| PersistenceError::SerializationError(format!("parse reference: {e}")))
}

fn narrow_u32(value: i32, field: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("column {field} holds invalid value {value}"))
    })
}

fn widen_i32(value: u32, field: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("value {value} overflows column {field}"))
    })
}

// ============================================================================
// Cases
// ============================================================================

/// A persisted case row.
#[derive(Debug, Clone, Queryable)]
pub struct CaseRow {
    pub case_id: i64,
    pub reference: String,
    pub reference_day: String,
    pub file_code: String,
    pub destination: String,
    pub manager: String,
    pub passenger_count: i32,
    pub departure_date: String,
    pub return_date: String,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl CaseRow {
    /// Converts the row to the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if any column holds a value the domain
    /// rejects.
    pub fn try_into_domain(self) -> Result<Case, PersistenceError> {
        let status = CaseStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(Case {
            case_id: Some(self.case_id),
            reference: parse_reference(&self.reference)?,
            file_code: self.file_code,
            destination: self.destination,
            manager: self.manager,
            passenger_count: narrow_u32(self.passenger_count, "passenger_count")?,
            departure_date: parse_date(&self.departure_date)?,
            return_date: parse_date(&self.return_date)?,
            status,
            remarks: self.remarks,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Insert/update payload for a case.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = cases)]
#[diesel(treat_none_as_null = true)]
pub struct NewCaseRow {
    pub reference: String,
    pub reference_day: String,
    pub file_code: String,
    pub destination: String,
    pub manager: String,
    pub passenger_count: i32,
    pub departure_date: String,
    pub return_date: String,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewCaseRow {
    /// Builds the row payload from the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a value cannot be represented.
    pub fn from_domain(case: &Case) -> Result<Self, PersistenceError> {
        Ok(Self {
            reference: case.reference.value(),
            reference_day: format_date(case.reference.day())?,
            file_code: case.file_code.clone(),
            destination: case.destination.clone(),
            manager: case.manager.clone(),
            passenger_count: widen_i32(case.passenger_count, "passenger_count")?,
            departure_date: format_date(case.departure_date)?,
            return_date: format_date(case.return_date)?,
            status: case.status.as_str().to_string(),
            remarks: case.remarks.clone(),
            created_at: format_datetime(case.created_at)?,
            updated_at: format_datetime(case.updated_at)?,
        })
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A persisted document row.
#[derive(Debug, Clone, Queryable)]
pub struct CaseDocumentRow {
    pub document_id: i64,
    pub case_id: i64,
    pub document_type: String,
    pub workflow_position: i32,
    pub status: String,
    pub title: String,
    pub content: String,
    pub version: i32,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl CaseDocumentRow {
    /// Converts the row to the domain type.
    ///
    /// The owning case reference is supplied by the caller, which has
    /// already resolved the case row.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if any column holds a value the domain
    /// rejects.
    pub fn try_into_domain(
        self,
        case_reference: CaseReference,
    ) -> Result<CaseDocument, PersistenceError> {
        let document_type = DocumentType::from_str(&self.document_type)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let status = DocumentStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let approved_at = self
            .approved_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;
        Ok(CaseDocument {
            document_id: Some(self.document_id),
            case_reference,
            document_type,
            status,
            title: self.title,
            content: self.content,
            version: narrow_u32(self.version, "version")?,
            approved_by: self.approved_by,
            approved_at,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Insert/update payload for a document.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = case_documents)]
#[diesel(treat_none_as_null = true)]
pub struct NewCaseDocumentRow {
    pub case_id: i64,
    pub document_type: String,
    pub workflow_position: i32,
    pub status: String,
    pub title: String,
    pub content: String,
    pub version: i32,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewCaseDocumentRow {
    /// Builds the row payload from the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a value cannot be represented.
    pub fn from_domain(document: &CaseDocument, case_id: i64) -> Result<Self, PersistenceError> {
        let approved_at = document.approved_at.map(format_datetime).transpose()?;
        Ok(Self {
            case_id,
            document_type: document.document_type.as_str().to_string(),
            workflow_position: i32::from(document.document_type.position()),
            status: document.status.as_str().to_string(),
            title: document.title.clone(),
            content: document.content.clone(),
            version: widen_i32(document.version, "version")?,
            approved_by: document.approved_by.clone(),
            approved_at,
            created_at: format_datetime(document.created_at)?,
            updated_at: format_datetime(document.updated_at)?,
        })
    }
}

// ============================================================================
// Settlements
// ============================================================================

/// A persisted settlement row.
#[derive(Debug, Clone, Queryable)]
pub struct SettlementRow {
    pub settlement_id: i64,
    pub case_id: i64,
    pub received: String,
    pub sold: String,
    pub operating_cost: String,
    pub sub_total: String,
    pub commission: String,
    pub unpaid: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SettlementRow {
    /// Converts the row to the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if any column holds a value the domain
    /// rejects.
    pub fn try_into_domain(
        self,
        case_reference: CaseReference,
    ) -> Result<SettlementRecord, PersistenceError> {
        Ok(SettlementRecord {
            settlement_id: Some(self.settlement_id),
            case_reference,
            received: parse_decimal(&self.received)?,
            sold: parse_decimal(&self.sold)?,
            operating_cost: parse_decimal(&self.operating_cost)?,
            sub_total: parse_decimal(&self.sub_total)?,
            commission: parse_decimal(&self.commission)?,
            unpaid: parse_decimal(&self.unpaid)?,
            notes: self.notes,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Insert/update payload for a settlement record.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = settlement_records)]
#[diesel(treat_none_as_null = true)]
pub struct NewSettlementRow {
    pub case_id: i64,
    pub received: String,
    pub sold: String,
    pub operating_cost: String,
    pub sub_total: String,
    pub commission: String,
    pub unpaid: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewSettlementRow {
    /// Builds the row payload from the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a value cannot be represented.
    pub fn from_domain(record: &SettlementRecord, case_id: i64) -> Result<Self, PersistenceError> {
        Ok(Self {
            case_id,
            received: record.received.to_string(),
            sold: record.sold.to_string(),
            operating_cost: record.operating_cost.to_string(),
            sub_total: record.sub_total.to_string(),
            commission: record.commission.to_string(),
            unpaid: record.unpaid.to_string(),
            notes: record.notes.clone(),
            created_at: format_datetime(record.created_at)?,
            updated_at: format_datetime(record.updated_at)?,
        })
    }
}

// ============================================================================
// Guide instructions
// ============================================================================

/// A persisted guide instruction row.
#[derive(Debug, Clone, Queryable)]
pub struct GuideInstructionRow {
    pub instruction_id: i64,
    pub case_id: i64,
    pub guide_name: String,
    pub guide_phone: Option<String>,
    pub travel_schedule: Option<String>,
    pub safety_rules: Option<String>,
    pub precautions: Option<String>,
    pub emergency_contact: Option<String>,
    pub special_instructions: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl GuideInstructionRow {
    /// Converts the row to the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if any column holds a value the domain
    /// rejects.
    pub fn try_into_domain(
        self,
        case_reference: CaseReference,
    ) -> Result<GuideInstruction, PersistenceError> {
        let status = GuideInstructionStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(GuideInstruction {
            instruction_id: Some(self.instruction_id),
            case_reference,
            fields: GuideInstructionFields {
                guide_name: self.guide_name,
                guide_phone: self.guide_phone,
                travel_schedule: self.travel_schedule,
                safety_rules: self.safety_rules,
                precautions: self.precautions,
                emergency_contact: self.emergency_contact,
                special_instructions: self.special_instructions,
            },
            status,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Insert/update payload for a guide instruction.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = guide_instructions)]
#[diesel(treat_none_as_null = true)]
pub struct NewGuideInstructionRow {
    pub case_id: i64,
    pub guide_name: String,
    pub guide_phone: Option<String>,
    pub travel_schedule: Option<String>,
    pub safety_rules: Option<String>,
    pub precautions: Option<String>,
    pub emergency_contact: Option<String>,
    pub special_instructions: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NewGuideInstructionRow {
    /// Builds the row payload from the domain type.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a value cannot be represented.
    pub fn from_domain(
        instruction: &GuideInstruction,
        case_id: i64,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            case_id,
            guide_name: instruction.fields.guide_name.clone(),
            guide_phone: instruction.fields.guide_phone.clone(),
            travel_schedule: instruction.fields.travel_schedule.clone(),
            safety_rules: instruction.fields.safety_rules.clone(),
            precautions: instruction.fields.precautions.clone(),
            emergency_contact: instruction.fields.emergency_contact.clone(),
            special_instructions: instruction.fields.special_instructions.clone(),
            status: instruction.status.as_str().to_string(),
            created_at: format_datetime(instruction.created_at)?,
            updated_at: format_datetime(instruction.updated_at)?,
        })
    }
}

// ============================================================================
// Audit events
// ============================================================================

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// A persisted audit event row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub case_reference: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: String,
}

/// A decoded audit event as read back from storage.
#[derive(Debug, Clone)]
pub struct StoredAuditEvent {
    /// The storage-assigned event identifier.
    pub event_id: i64,
    /// The case the event is scoped to.
    pub case_reference: String,
    /// Who performed the action.
    pub actor: Actor,
    /// Why the action was performed.
    pub cause: Cause,
    /// What action was performed.
    pub action: Action,
    /// Snapshot of the state before the transition.
    pub before_snapshot: String,
    /// Snapshot of the state after the transition.
    pub after_snapshot: String,
    /// When the event was recorded.
    pub created_at: OffsetDateTime,
}

impl AuditEventRow {
    /// Decodes the JSON payloads back into audit types.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a payload does not decode.
    pub fn try_into_stored(self) -> Result<StoredAuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        Ok(StoredAuditEvent {
            event_id: self.event_id,
            case_reference: self.case_reference,
            actor: actor.into(),
            cause: cause.into(),
            action: action.into(),
            before_snapshot: self.before_snapshot,
            after_snapshot: self.after_snapshot,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

/// Insert payload for an audit event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub case_reference: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: String,
}
