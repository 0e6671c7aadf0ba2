use async_trait::async_trait;
use serde::Serialize;

use crate::admin::AdminClient;
use crate::error::ProvisionError;
use crate::settings::ConflictPolicy;

/// State threaded through the steps of a single provisioning run
pub struct Session<'a> {
    pub admin: &'a dyn AdminClient,
    pub policy: ConflictPolicy,
    active_database: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(admin: &'a dyn AdminClient, policy: ConflictPolicy) -> Self {
        Self {
            admin,
            policy,
            active_database: None,
        }
    }

    /// Switch the namespace later steps operate in
    pub fn select_database(&mut self, database: impl Into<String>) {
        self.active_database = Some(database.into());
    }

    pub fn active_database(&self) -> Result<&str, ProvisionError> {
        self.active_database
            .as_deref()
            .ok_or(ProvisionError::NoActiveDatabase)
    }
}

/// What a step did to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Selected,
    Created,
    Skipped,
}

/// One administrative action in a provisioning plan
#[async_trait]
pub trait ProvisionStep: Sync + Send {
    /// Unique name for this step
    fn name(&self) -> &'static str;

    /// Parameters of this step, for plan listings. Must not contain secrets.
    fn describe(&self) -> serde_json::Value;

    /// Execute the step against the session's server
    async fn run(&self, session: &mut Session<'_>) -> Result<StepOutcome, ProvisionError>;
}
