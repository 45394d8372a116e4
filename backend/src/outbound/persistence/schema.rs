//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Events codes can be issued for.
    events (id) {
        id -> Text,
        name -> Text,
        location -> Text,
        description -> Nullable<Text>,
        start_time -> Nullable<Timestamp>,
        end_time -> Nullable<Timestamp>,
        capacity -> Nullable<Int4>,
        attendees -> Int4,
    }
}

diesel::table! {
    /// Replay ledger. One row per consumed code.
    code_usages (content_hash) {
        /// SHA-256 of the canonical code string (32 bytes).
        content_hash -> Bytea,
        event_id -> Text,
        verified_at -> Timestamptz,
    }
}

diesel::table! {
    /// Proofs of attendance.
    proofs (content_hash) {
        /// SHA-256 of the redeemed code (32 bytes).
        content_hash -> Bytea,
        /// Insertion sequence used for ordering.
        seq -> Int8,
        user_address -> Text,
        event_id -> Text,
        recorded_at -> Timestamptz,
        external_reference -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(events, code_usages, proofs);
