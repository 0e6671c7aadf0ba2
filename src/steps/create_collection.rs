use async_trait::async_trait;
use dbseed_kernel::names::validate_collection_name;
use dbseed_kernel::settings::ConflictPolicy;
use dbseed_kernel::{ProvisionError, ProvisionStep, Session, StepOutcome};
use serde_json::json;

/// Creates an empty collection in the active database.
pub struct CreateCollection {
    collection: String,
}

impl CreateCollection {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl ProvisionStep for CreateCollection {
    fn name(&self) -> &'static str {
        "create_collection"
    }

    fn describe(&self) -> serde_json::Value {
        json!({ "collection": self.collection })
    }

    async fn run(&self, session: &mut Session<'_>) -> Result<StepOutcome, ProvisionError> {
        validate_collection_name(&self.collection)?;
        let database = session.active_database()?.to_string();

        // Recent servers accept `create` on an existing collection with
        // identical options, so existence is checked up front.
        if session
            .admin
            .collection_exists(&database, &self.collection)
            .await?
        {
            return match session.policy {
                ConflictPolicy::Skip => {
                    tracing::info!(
                        step = self.name(),
                        database = %database,
                        collection = %self.collection,
                        "collection already exists, skipping"
                    );
                    Ok(StepOutcome::Skipped)
                }
                ConflictPolicy::Fail => Err(ProvisionError::CollectionExists {
                    collection: self.collection.clone(),
                    database,
                }),
            };
        }

        session
            .admin
            .create_collection(&database, &self.collection)
            .await?;

        tracing::info!(
            step = self.name(),
            database = %database,
            collection = %self.collection,
            "collection created"
        );
        Ok(StepOutcome::Created)
    }
}
