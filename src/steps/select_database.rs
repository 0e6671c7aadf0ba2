use async_trait::async_trait;
use dbseed_kernel::names::validate_database_name;
use dbseed_kernel::{ProvisionError, ProvisionStep, Session, StepOutcome};
use serde_json::json;

/// Switches the session to the target database. The server creates the
/// namespace lazily on first write, so no round-trip happens here.
pub struct SelectDatabase {
    database: String,
}

impl SelectDatabase {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

#[async_trait]
impl ProvisionStep for SelectDatabase {
    fn name(&self) -> &'static str {
        "select_database"
    }

    fn describe(&self) -> serde_json::Value {
        json!({ "database": self.database })
    }

    async fn run(&self, session: &mut Session<'_>) -> Result<StepOutcome, ProvisionError> {
        validate_database_name(&self.database)?;
        session.select_database(self.database.clone());

        tracing::info!(step = self.name(), database = %self.database, "database selected");
        Ok(StepOutcome::Selected)
    }
}
