use async_trait::async_trait;
use dbseed_kernel::names::validate_username;
use dbseed_kernel::settings::ConflictPolicy;
use dbseed_kernel::{
    Password, ProvisionError, ProvisionStep, RoleGrant, Session, StepOutcome, UserSpec,
};
use serde_json::json;

/// Creates a principal in the active database holding exactly one role,
/// scoped to that same database.
pub struct CreateUser {
    username: String,
    password: Password,
    role: String,
}

impl CreateUser {
    pub fn new(username: impl Into<String>, password: Password, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password,
            role: role.into(),
        }
    }
}

#[async_trait]
impl ProvisionStep for CreateUser {
    fn name(&self) -> &'static str {
        "create_user"
    }

    fn describe(&self) -> serde_json::Value {
        json!({
            "username": self.username,
            "password": self.password,
            "role": self.role,
        })
    }

    async fn run(&self, session: &mut Session<'_>) -> Result<StepOutcome, ProvisionError> {
        validate_username(&self.username)?;
        let database = session.active_database()?.to_string();

        if session.policy == ConflictPolicy::Skip
            && session
                .admin
                .find_user(&database, &self.username)
                .await?
                .is_some()
        {
            tracing::info!(
                step = self.name(),
                database = %database,
                username = %self.username,
                "user already exists, skipping"
            );
            return Ok(StepOutcome::Skipped);
        }

        let user = UserSpec {
            username: self.username.clone(),
            password: self.password.clone(),
            roles: vec![RoleGrant::new(&self.role, &database)],
        };
        session.admin.create_user(&database, &user).await?;

        tracing::info!(
            step = self.name(),
            database = %database,
            username = %self.username,
            role = %self.role,
            "user created"
        );
        Ok(StepOutcome::Created)
    }
}
