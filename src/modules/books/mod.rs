pub mod handlers;
pub mod models;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstore_kernel::{InitCtx, Module};
use utoipa::OpenApi;

use crate::context::ApiContext;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_books,
        handlers::create_book,
        handlers::get_book,
        handlers::update_book,
        handlers::delete_book
    ),
    tags((name = "books", description = "Book catalogue"))
)]
struct BooksApi;

/// Book CRUD, mounted at `/api/v1/books`
pub struct BooksModule {
    ctx: ApiContext,
}

impl BooksModule {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books).post(handlers::create_book))
            .route(
                "/{id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.ctx.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(BooksApi::openapi())
    }
}

/// Create a new instance of the books module
pub fn create_module(ctx: ApiContext) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(ctx))
}
