//! The administrative surface of the database server that provisioning needs.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ProvisionError;

/// Binding of a named role to a database scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            db: db.into(),
        }
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

/// A secret credential. Never printed, logged or serialized in clear.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"***\"")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

/// Principal to create.
#[derive(Debug, Clone, Serialize)]
pub struct UserSpec {
    pub username: String,
    pub password: Password,
    pub roles: Vec<RoleGrant>,
}

/// Principal as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub db: String,
    pub roles: Vec<RoleGrant>,
}

/// Administrative operations against a running database server.
///
/// Implementations surface server failures unmodified as [`ProvisionError`];
/// no retrying happens at this layer.
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Round-trip to the server to prove the connection is usable.
    async fn ping(&self) -> Result<(), ProvisionError>;

    /// Look up a principal defined in `database`.
    async fn find_user(
        &self,
        database: &str,
        username: &str,
    ) -> Result<Option<UserInfo>, ProvisionError>;

    /// Create a principal in `database`. Fails with `UserExists` on a duplicate.
    async fn create_user(&self, database: &str, user: &UserSpec) -> Result<(), ProvisionError>;

    async fn collection_exists(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<bool, ProvisionError>;

    /// Create an empty collection. Fails with `CollectionExists` on a duplicate.
    async fn create_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(), ProvisionError>;

    async fn count_documents(&self, database: &str, collection: &str)
        -> Result<u64, ProvisionError>;
}
