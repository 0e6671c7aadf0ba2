//! Failure taxonomy shared by every dbseed crate.

use thiserror::Error;

/// Errors raised while provisioning a database.
///
/// Server-originated failures fall into two classes: the admin interface could
/// not be reached or refused us (`Connection`, `Unauthorized`), or the object
/// being created is already there (`UserExists`, `CollectionExists`).
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("cannot reach database server: {0}")]
    Connection(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("user '{username}' already exists in database '{database}'")]
    UserExists { username: String, database: String },

    #[error("collection '{collection}' already exists in database '{database}'")]
    CollectionExists {
        collection: String,
        database: String,
    },

    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("no database selected")]
    NoActiveDatabase,

    #[error("command failed ({code}): {message}")]
    Command { code: i32, message: String },

    #[error("database driver error: {0}")]
    Driver(String),
}

impl ProvisionError {
    /// True for the "target already exists" class of failures.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ProvisionError::UserExists { .. } | ProvisionError::CollectionExists { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_classified() {
        let user = ProvisionError::UserExists {
            username: "admin".into(),
            database: "graylog".into(),
        };
        assert!(user.is_conflict());
        assert_eq!(
            user.to_string(),
            "user 'admin' already exists in database 'graylog'"
        );

        let conn = ProvisionError::Connection("server selection timeout".into());
        assert!(!conn.is_conflict());
    }
}
