use std::sync::Arc;

use anyhow::Context;
use bookstore_app::{modules, ApiContext};
use bookstore_db::PgQueries;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;
    bookstore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        bind = %settings.server.bind_address(),
        "bookstore bootstrap starting"
    );

    let pool = bookstore_db::connect(&settings.database).await?;
    let ctx = ApiContext::new(Arc::new(PgQueries::new(pool.clone())));

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &ctx);

    let init_ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&init_ctx).await?;
    registry.start_modules(&init_ctx).await?;

    tracing::info!("bookstore bootstrap complete");

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    pool.close().await;
    served
}
