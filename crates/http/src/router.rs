//! Router builder for the bookstore HTTP server

use axum::{
    http::{HeaderValue, Request},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};
use utoipa_swagger_ui::SwaggerUi;
use uuid::{Timestamp, Uuid};

use bookstore_kernel::ModuleRegistry;

/// Version prefix every module is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Builder for constructing the main HTTP router.
///
/// Routes and modules can be added in any order; middleware is applied in
/// [`RouterBuilder::build`] so it wraps every route.
pub struct RouterBuilder {
    router: Router,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout: Option<Duration>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            tracing: false,
            cors: false,
            request_id: false,
            timeout: None,
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/v1/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("{}/{}", API_PREFIX, module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add per-request tracing spans
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Add permissive CORS
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Assign an `x-request-id` to each request and echo it on the response
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Bound request handling time. `None` leaves requests unbounded.
    pub fn with_timeout(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout = timeout_ms.map(Duration::from_millis);
        self
    }

    /// Serve the merged OpenAPI document of every module at
    /// `/docs/openapi.json`, with Swagger UI at `/swagger-ui`
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi = merged_openapi(registry);
        self.router = self
            .router
            .merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", openapi));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let mut router = self.router;

        if let Some(timeout) = self.timeout {
            #[allow(deprecated)]
            let layer = TimeoutLayer::new(timeout);
            router = router.layer(layer);
        }

        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        // Outermost, so the id exists before the trace span is opened.
        if self.request_id {
            router = router
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine the module documents into one service-wide document
pub fn merged_openapi(registry: &ModuleRegistry) -> OpenApi {
    let mut openapi = OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Bookstore API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some("CRUD over authors and books"))
                .build(),
        )
        .build();

    for module in registry.modules() {
        if let Some(module_doc) = module.openapi() {
            tracing::debug!(module = module.name(), "merging module OpenAPI document");
            openapi.merge(module_doc);
        }
    }

    openapi
}

/// Time-ordered request ids
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
