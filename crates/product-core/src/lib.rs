//! Framework-agnostic API descriptor types for the Product Service.
//!
//! The descriptor is a plain value assembled once at startup: API metadata,
//! the security schemes the API offers and the requirements applied globally.
//! Rendering it into an OpenAPI document is left to `product-openapi`.

pub mod models;

pub use models::*;
