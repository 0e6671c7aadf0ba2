//! dbseed application library
//!
//! Bootstrap steps for a MongoDB deployment: select the target database,
//! create a user scoped to it, create an empty collection.

pub mod steps;
pub mod verify;

use dbseed_kernel::settings::{ConflictPolicy, Settings};
use dbseed_kernel::{AdminClient, Session, StepReport};
use tracing::Instrument;
use uuid::Uuid;

pub use steps::default_plan;
pub use verify::{verify, VerifyReport};

/// Run the default plan once against `admin`.
pub async fn bootstrap(
    settings: &Settings,
    admin: &dyn AdminClient,
    policy: ConflictPolicy,
) -> anyhow::Result<Vec<StepReport>> {
    let run_id = Uuid::now_v7();
    let span = tracing::info_span!(
        "bootstrap",
        run_id = %run_id,
        database = %settings.bootstrap.database,
        policy = ?policy,
    );

    async move {
        let plan = default_plan(&settings.bootstrap);
        let mut session = Session::new(admin, policy);
        plan.run(&mut session).await
    }
    .instrument(span)
    .await
}
