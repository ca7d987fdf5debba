use utoipa::OpenApi;

pub mod documents;
pub mod render;

pub use documents::ApiDocuments;
pub use render::{render, DescriptorAddon};

/// Base OpenAPI document: tags and shared schemas.
///
/// Info and security are filled from an [`product_core::ApiDescriptor`] by
/// [`render`], since the OAuth2 endpoints are only known at startup. Kept in
/// its own crate so it can be reused by:
/// - the server (Swagger UI + `/api-docs/openapi.json`)
/// - the `export_openapi` tool binary
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            product_core::HealthResponse,
        )
    ),
    tags(
        (name = "Observability", description = "Health checks"),
    )
)]
pub struct ApiDoc;
