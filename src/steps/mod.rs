pub mod create_collection;
pub mod create_user;
pub mod select_database;

use std::sync::Arc;

use dbseed_kernel::settings::BootstrapSettings;
use dbseed_kernel::ProvisionPlan;

pub use create_collection::CreateCollection;
pub use create_user::CreateUser;
pub use select_database::SelectDatabase;

/// The bootstrap sequence: select the database, create the scoped user,
/// create the collection.
pub fn default_plan(bootstrap: &BootstrapSettings) -> ProvisionPlan {
    let mut plan = ProvisionPlan::new();
    plan.push(Arc::new(SelectDatabase::new(&bootstrap.database)));
    plan.push(Arc::new(CreateUser::new(
        &bootstrap.username,
        bootstrap.password.clone(),
        &bootstrap.role,
    )));
    plan.push(Arc::new(CreateCollection::new(&bootstrap.collection)));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_plan_matches_bootstrap_settings() {
        let plan = default_plan(&BootstrapSettings::default());

        assert_eq!(
            plan.describe(),
            json!([
                { "order": 1, "step": "select_database", "params": { "database": "graylog" } },
                {
                    "order": 2,
                    "step": "create_user",
                    "params": { "username": "admin", "password": "***", "role": "readWrite" }
                },
                { "order": 3, "step": "create_collection", "params": { "collection": "dummy" } },
            ])
        );
    }
}
