//! OpenAPI documentation configuration

use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing events"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    modifiers(&DomainApis)
)]
pub struct ApiDoc;

/// Merges the domain documents, whose paths are already absolute.
struct DomainApis;

impl Modify for DomainApis {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi.merge(domain_events::ApiDoc::openapi());
    }
}
