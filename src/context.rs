use std::sync::Arc;

use bookstore_db::Queries;

/// Immutable dependencies handed to every module at construction.
///
/// Cloned into each router as axum state; clones share the same storage
/// handle.
#[derive(Clone)]
pub struct ApiContext {
    queries: Arc<dyn Queries>,
}

impl ApiContext {
    pub fn new(queries: Arc<dyn Queries>) -> Self {
        Self { queries }
    }

    pub fn queries(&self) -> &dyn Queries {
        self.queries.as_ref()
    }
}
