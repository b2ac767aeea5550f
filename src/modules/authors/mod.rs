use async_trait::async_trait;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use bookstore_db::{Author, AuthorStats};
use bookstore_http::{path_id, respond, AppError, ErrorBody};
use bookstore_kernel::{InitCtx, Module};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::context::ApiContext;

#[derive(OpenApi)]
#[openapi(
    paths(list_authors, get_author_stats),
    tags((name = "authors", description = "Read-only author views"))
)]
struct AuthorsApi;

/// `{"authors": [...]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorList {
    pub authors: Vec<Author>,
}

/// `{"stats": {...}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsEnvelope {
    pub stats: AuthorStats,
}

/// Author listing and per-author statistics, mounted at `/api/v1/authors`
pub struct AuthorsModule {
    ctx: ApiContext,
}

impl AuthorsModule {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_authors))
            .route("/{id}/stats", get(get_author_stats))
            .with_state(self.ctx.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(AuthorsApi::openapi())
    }
}

/// List every author
#[utoipa::path(
    get,
    path = "/api/v1/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = AuthorList),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_authors(State(ctx): State<ApiContext>) -> Result<Response, AppError> {
    let authors = ctx.queries().list_authors().await.map_err(|err| {
        tracing::error!(error = %err, "listing authors failed");
        AppError::internal("Failed fetching list of authors")
    })?;

    Ok(respond(StatusCode::OK, Some(&AuthorList { authors })))
}

/// Aggregate statistics for one author.
///
/// Every storage failure, an unknown author included, is a 500.
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}/stats",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author statistics", body = StatsEnvelope),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 500, description = "Storage failure or unknown author", body = ErrorBody)
    )
)]
pub async fn get_author_stats(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let id = path_id(path, "Invalid author ID")?;

    let stats = ctx
        .queries()
        .get_author_stats(id)
        .await
        .map_err(|err| AppError::internal(err.to_string()))?;

    Ok(respond(StatusCode::OK, Some(&StatsEnvelope { stats })))
}

/// Create a new instance of the authors module
pub fn create_module(ctx: ApiContext) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(ctx))
}
