pub mod authors;
pub mod books;

use bookstore_kernel::ModuleRegistry;

use crate::context::ApiContext;

/// Register all bookstore modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, ctx: &ApiContext) {
    registry.register(authors::create_module(ctx.clone()));
    registry.register(books::create_module(ctx.clone()));
}
