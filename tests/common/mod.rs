// In-memory stand-in for a MongoDB deployment, used by the plan-level tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use dbseed_kernel::{AdminClient, ProvisionError, UserInfo, UserSpec};

#[derive(Default)]
struct DatabaseState {
    users: BTreeMap<String, (UserInfo, String)>,
    collections: BTreeMap<String, u64>,
}

#[derive(Default)]
pub struct InMemoryAdmin {
    databases: Mutex<HashMap<String, DatabaseState>>,
    pub calls: Mutex<Vec<String>>,
}

impl InMemoryAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn user_count(&self) -> usize {
        let databases = self.databases.lock().unwrap();
        databases.values().map(|db| db.users.len()).sum()
    }

    pub fn collection_names(&self, database: &str) -> Vec<String> {
        let databases = self.databases.lock().unwrap();
        databases
            .get(database)
            .map(|db| db.collections.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn database_names(&self) -> Vec<String> {
        let databases = self.databases.lock().unwrap();
        let mut names: Vec<_> = databases.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn find_user_sync(&self, database: &str, username: &str) -> Option<UserInfo> {
        let databases = self.databases.lock().unwrap();
        databases
            .get(database)
            .and_then(|db| db.users.get(username))
            .map(|(info, _)| info.clone())
    }

    pub fn password_of(&self, database: &str, username: &str) -> Option<String> {
        let databases = self.databases.lock().unwrap();
        databases
            .get(database)
            .and_then(|db| db.users.get(username))
            .map(|(_, password)| password.clone())
    }

    pub fn insert_documents(&self, database: &str, collection: &str, count: u64) {
        let mut databases = self.databases.lock().unwrap();
        let db = databases.entry(database.to_string()).or_default();
        *db.collections.entry(collection.to_string()).or_default() += count;
    }

    pub fn put_user(&self, database: &str, info: UserInfo) {
        let mut databases = self.databases.lock().unwrap();
        let db = databases.entry(database.to_string()).or_default();
        db.users
            .insert(info.username.clone(), (info, "preexisting".to_string()));
    }
}

#[async_trait]
impl AdminClient for InMemoryAdmin {
    async fn ping(&self) -> Result<(), ProvisionError> {
        self.log("ping".to_string());
        Ok(())
    }

    async fn find_user(
        &self,
        database: &str,
        username: &str,
    ) -> Result<Option<UserInfo>, ProvisionError> {
        self.log(format!("find_user {database}.{username}"));
        let databases = self.databases.lock().unwrap();
        Ok(databases
            .get(database)
            .and_then(|db| db.users.get(username))
            .map(|(info, _)| info.clone()))
    }

    async fn create_user(&self, database: &str, user: &UserSpec) -> Result<(), ProvisionError> {
        self.log(format!("create_user {database}.{}", user.username));
        let mut databases = self.databases.lock().unwrap();
        let db = databases.entry(database.to_string()).or_default();
        if db.users.contains_key(&user.username) {
            return Err(ProvisionError::UserExists {
                username: user.username.clone(),
                database: database.to_string(),
            });
        }
        let info = UserInfo {
            username: user.username.clone(),
            db: database.to_string(),
            roles: user.roles.clone(),
        };
        db.users.insert(
            user.username.clone(),
            (info, user.password.expose().to_string()),
        );
        Ok(())
    }

    async fn collection_exists(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<bool, ProvisionError> {
        self.log(format!("collection_exists {database}.{collection}"));
        let databases = self.databases.lock().unwrap();
        Ok(databases
            .get(database)
            .is_some_and(|db| db.collections.contains_key(collection)))
    }

    async fn create_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(), ProvisionError> {
        self.log(format!("create_collection {database}.{collection}"));
        let mut databases = self.databases.lock().unwrap();
        let db = databases.entry(database.to_string()).or_default();
        if db.collections.contains_key(collection) {
            return Err(ProvisionError::CollectionExists {
                collection: collection.to_string(),
                database: database.to_string(),
            });
        }
        db.collections.insert(collection.to_string(), 0);
        Ok(())
    }

    async fn count_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<u64, ProvisionError> {
        let databases = self.databases.lock().unwrap();
        Ok(databases
            .get(database)
            .and_then(|db| db.collections.get(collection))
            .copied()
            .unwrap_or(0))
    }
}

/// A server that cannot be reached at all.
pub struct UnreachableAdmin;

#[async_trait]
impl AdminClient for UnreachableAdmin {
    async fn ping(&self) -> Result<(), ProvisionError> {
        Err(down())
    }

    async fn find_user(&self, _: &str, _: &str) -> Result<Option<UserInfo>, ProvisionError> {
        Err(down())
    }

    async fn create_user(&self, _: &str, _: &UserSpec) -> Result<(), ProvisionError> {
        Err(down())
    }

    async fn collection_exists(&self, _: &str, _: &str) -> Result<bool, ProvisionError> {
        Err(down())
    }

    async fn create_collection(&self, _: &str, _: &str) -> Result<(), ProvisionError> {
        Err(down())
    }

    async fn count_documents(&self, _: &str, _: &str) -> Result<u64, ProvisionError> {
        Err(down())
    }
}

fn down() -> ProvisionError {
    ProvisionError::Connection("server selection timed out".to_string())
}
