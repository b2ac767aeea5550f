use async_trait::async_trait;
use axum::Router;

/// Context handed to modules while the application boots
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A self-contained slice of the HTTP API
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module; also the URL segment it is mounted under
    fn name(&self) -> &'static str;

    /// Called once during startup, before any module is started
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Routes are mounted under `/api/v1/{module_name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI document describing this module's routes, merged into the
    /// service-wide document
    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        None
    }

    /// Called after every module has been initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during shutdown, after the HTTP server has drained
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
