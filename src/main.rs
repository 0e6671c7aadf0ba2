use anyhow::Context;
use dbseed_db::MongoAdmin;
use dbseed_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load dbseed settings")?;
    dbseed_telemetry::init(&settings.telemetry)?;

    if settings.uses_local_default_password() {
        tracing::warn!("no bootstrap password configured; using the local default");
    }

    tracing::info!(
        env = ?settings.environment,
        database = %settings.bootstrap.database,
        "dbseed-app bootstrap starting"
    );

    let admin = MongoAdmin::connect(&settings.database)
        .await
        .with_context(|| "failed to connect to MongoDB")?;

    let reports = dbseed_app::bootstrap(&settings, &admin, settings.bootstrap.if_exists).await?;

    tracing::info!(steps = reports.len(), "dbseed-app bootstrap complete");
    Ok(())
}
