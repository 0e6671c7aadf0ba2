//! MongoDB implementation of the dbseed admin seam.

mod classify;

use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use serde::Deserialize;

use dbseed_kernel::settings::DatabaseSettings;
use dbseed_kernel::{AdminClient, ProvisionError, RoleGrant, UserInfo, UserSpec};

use classify::{classify, command_code, COLLECTION_EXISTS, USER_EXISTS};

/// Administrative handle on a MongoDB deployment.
#[derive(Clone)]
pub struct MongoAdmin {
    client: Client,
}

impl MongoAdmin {
    /// Build a client from the configured URI and ping the server once.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, ProvisionError> {
        let mut options = ClientOptions::parse(settings.uri.as_str()).await.map_err(classify)?;
        options.app_name = Some(settings.app_name.clone());

        let client = Client::with_options(options).map_err(classify)?;
        let admin = Self { client };
        admin.ping().await?;

        tracing::info!(target: "dbseed-db", app_name = %settings.app_name, "connected to MongoDB");
        Ok(admin)
    }
}

#[derive(Deserialize)]
struct UsersInfoReply {
    users: Vec<UserEntry>,
}

#[derive(Deserialize)]
struct UserEntry {
    user: String,
    db: String,
    #[serde(default)]
    roles: Vec<RoleGrant>,
}

#[async_trait]
impl AdminClient for MongoAdmin {
    async fn ping(&self) -> Result<(), ProvisionError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| match classify(err) {
                unauthorized @ ProvisionError::Unauthorized(_) => unauthorized,
                other => ProvisionError::Connection(other.to_string()),
            })?;
        Ok(())
    }

    async fn find_user(
        &self,
        database: &str,
        username: &str,
    ) -> Result<Option<UserInfo>, ProvisionError> {
        let reply = self
            .client
            .database(database)
            .run_command(doc! { "usersInfo": { "user": username, "db": database } })
            .await
            .map_err(classify)?;

        let reply: UsersInfoReply = bson::from_document(reply)
            .map_err(|err| ProvisionError::Driver(format!("malformed usersInfo reply: {err}")))?;

        Ok(reply.users.into_iter().next().map(|entry| UserInfo {
            username: entry.user,
            db: entry.db,
            roles: entry.roles,
        }))
    }

    async fn create_user(&self, database: &str, user: &UserSpec) -> Result<(), ProvisionError> {
        let roles: Vec<Document> = user
            .roles
            .iter()
            .map(|grant| doc! { "role": grant.role.as_str(), "db": grant.db.as_str() })
            .collect();

        self.client
            .database(database)
            .run_command(doc! {
                "createUser": user.username.as_str(),
                "pwd": user.password.expose(),
                "roles": roles,
            })
            .await
            .map_err(|err| match command_code(&err) {
                Some(USER_EXISTS) => ProvisionError::UserExists {
                    username: user.username.clone(),
                    database: database.to_string(),
                },
                _ => classify(err),
            })?;

        Ok(())
    }

    async fn collection_exists(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<bool, ProvisionError> {
        let names = self
            .client
            .database(database)
            .list_collection_names()
            .filter(doc! { "name": collection })
            .await
            .map_err(classify)?;

        Ok(names.iter().any(|name| name == collection))
    }

    async fn create_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(), ProvisionError> {
        self.client
            .database(database)
            .create_collection(collection)
            .await
            .map_err(|err| match command_code(&err) {
                Some(COLLECTION_EXISTS) => ProvisionError::CollectionExists {
                    collection: collection.to_string(),
                    database: database.to_string(),
                },
                _ => classify(err),
            })
    }

    async fn count_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<u64, ProvisionError> {
        self.client
            .database(database)
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await
            .map_err(classify)
    }
}
