pub mod comment;
pub mod diet;
pub mod notification;
pub mod pt_contract;
pub mod push_token;

use uuid::Uuid;

use ptdiary_auth_types::identity::IdentityHeaders;

use crate::domain::types::Actor;
use crate::error::ValidationError;

impl From<IdentityHeaders> for Actor {
    fn from(identity: IdentityHeaders) -> Self {
        Self {
            user_id: identity.user_id,
            role: identity.role,
        }
    }
}

/// Text field that must be present. The value is kept exactly as sent.
pub(crate) fn required_text(
    value: Option<String>,
    field: &'static str,
    errors: &mut ValidationError,
) -> Option<String> {
    if value.is_none() {
        errors.push(field);
    }
    value
}

/// UUID field sent as a string. Records `field` when absent or malformed.
pub(crate) fn required_uuid(
    value: Option<&str>,
    field: &'static str,
    errors: &mut ValidationError,
) -> Option<Uuid> {
    match value.map(|v| Uuid::parse_str(v.trim())) {
        Some(Ok(id)) => Some(id),
        _ => {
            errors.push(field);
            None
        }
    }
}
