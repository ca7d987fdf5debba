//! Library exports.
//!
//! The root package only re-exports the workspace crates so binaries and
//! integration tests have a single import path.

pub use product_config as config;
pub use product_core as models;
pub use product_observability as observability;
pub use product_openapi as openapi;
pub use product_server as server;
