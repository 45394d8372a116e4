//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::schema::{code_usages, events, proofs};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub capacity: Option<i32>,
    pub attendees: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = code_usages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CodeUsageRow {
    pub content_hash: Vec<u8>,
    pub event_id: String,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = code_usages)]
pub(crate) struct NewCodeUsageRow<'a> {
    pub content_hash: &'a [u8],
    pub event_id: &'a str,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = proofs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProofRow {
    pub content_hash: Vec<u8>,
    pub user_address: String,
    pub event_id: String,
    pub recorded_at: DateTime<Utc>,
    pub external_reference: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = proofs)]
pub(crate) struct NewProofRow<'a> {
    pub content_hash: &'a [u8],
    pub user_address: &'a str,
    pub event_id: &'a str,
    pub recorded_at: DateTime<Utc>,
    pub external_reference: &'a str,
}
