//! Local validation of database and collection names, applied before any
//! server call.

use crate::error::ProvisionError;

const MAX_DATABASE_NAME_BYTES: usize = 64;
const FORBIDDEN_DATABASE_CHARS: &[char] = &[
    '/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?', '\0',
];

pub fn validate_database_name(name: &str) -> Result<(), ProvisionError> {
    let invalid = |reason| ProvisionError::InvalidName {
        kind: "database",
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.len() >= MAX_DATABASE_NAME_BYTES {
        return Err(invalid("must be shorter than 64 bytes"));
    }
    if name.contains(FORBIDDEN_DATABASE_CHARS) {
        return Err(invalid("contains a forbidden character"));
    }
    Ok(())
}

pub fn validate_collection_name(name: &str) -> Result<(), ProvisionError> {
    let invalid = |reason| ProvisionError::InvalidName {
        kind: "collection",
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.contains('$') || name.contains('\0') {
        return Err(invalid("contains a forbidden character"));
    }
    if name.starts_with("system.") {
        return Err(invalid("the system. prefix is reserved"));
    }
    Ok(())
}

pub fn validate_username(name: &str) -> Result<(), ProvisionError> {
    if name.trim().is_empty() {
        return Err(ProvisionError::InvalidName {
            kind: "user",
            name: name.to_string(),
            reason: "must not be blank",
        });
    }
    Ok(())
}
