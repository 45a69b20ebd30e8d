// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    cases (case_id) {
        case_id -> BigInt,
        reference -> Text,
        reference_day -> Text,
        file_code -> Text,
        destination -> Text,
        manager -> Text,
        passenger_count -> Integer,
        departure_date -> Text,
        return_date -> Text,
        status -> Text,
        remarks -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    case_documents (document_id) {
        document_id -> BigInt,
        case_id -> BigInt,
        document_type -> Text,
        workflow_position -> Integer,
        status -> Text,
        title -> Text,
        content -> Text,
        version -> Integer,
        approved_by -> Nullable<Text>,
        approved_at -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    settlement_records (settlement_id) {
        settlement_id -> BigInt,
        case_id -> BigInt,
        received -> Text,
        sold -> Text,
        operating_cost -> Text,
        sub_total -> Text,
        commission -> Text,
        unpaid -> Text,
        notes -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    guide_instructions (instruction_id) {
        instruction_id -> BigInt,
        case_id -> BigInt,
        guide_name -> Text,
        guide_phone -> Nullable<Text>,
        travel_schedule -> Nullable<Text>,
        safety_rules -> Nullable<Text>,
        precautions -> Nullable<Text>,
        emergency_contact -> Nullable<Text>,
        special_instructions -> Nullable<Text>,
        status -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        case_reference -> Text,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot -> Text,
        after_snapshot -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(case_documents -> cases (case_id));
diesel::joinable!(settlement_records -> cases (case_id));
diesel::joinable!(guide_instructions -> cases (case_id));

diesel::allow_tables_to_appear_in_same_query!(
    cases,
    case_documents,
    settlement_records,
    guide_instructions,
    audit_events,
);
