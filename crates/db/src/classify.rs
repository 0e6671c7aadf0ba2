use mongodb::error::{Error, ErrorKind};

use dbseed_kernel::ProvisionError;

pub(crate) const UNAUTHORIZED: i32 = 13;
pub(crate) const AUTHENTICATION_FAILED: i32 = 18;
pub(crate) const COLLECTION_EXISTS: i32 = 48;
pub(crate) const USER_EXISTS: i32 = 51003;

/// Server error code of a failed command, if the error is one.
pub(crate) fn command_code(err: &Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => Some(command.code),
        _ => None,
    }
}

/// Map a driver error onto the provisioning taxonomy.
pub(crate) fn classify(err: Error) -> ProvisionError {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => from_command(command.code, &command.message),
        ErrorKind::Authentication { .. } => ProvisionError::Unauthorized(err.to_string()),
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => ProvisionError::Connection(err.to_string()),
        _ => ProvisionError::Driver(err.to_string()),
    }
}

pub(crate) fn from_command(code: i32, message: &str) -> ProvisionError {
    match code {
        UNAUTHORIZED | AUTHENTICATION_FAILED => ProvisionError::Unauthorized(message.to_string()),
        _ => ProvisionError::Command {
            code,
            message: message.to_string(),
        },
    }
}
