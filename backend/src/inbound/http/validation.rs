//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors whose details name the offending
//! field, its value, and a stable code.

use serde_json::json;

use crate::domain::{Error, EventId, EventIdValidationError, UserAddress, UserAddressValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidEventId,
    InvalidUserAddress,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEventId => "invalid_event_id",
            Self::InvalidUserAddress => "invalid_user_address",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, value: &str, reason: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} is invalid: {reason}")).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_event_id(value: String, field: FieldName) -> Result<EventId, Error> {
    EventId::new(value.clone()).map_err(|err: EventIdValidationError| {
        field_error(field, ValidationCode::InvalidEventId, &value, &err.to_string())
    })
}

pub(crate) fn parse_user_address(value: String, field: FieldName) -> Result<UserAddress, Error> {
    UserAddress::new(value.clone()).map_err(|err: UserAddressValidationError| {
        field_error(field, ValidationCode::InvalidUserAddress, &value, &err.to_string())
    })
}
