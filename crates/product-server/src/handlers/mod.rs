pub mod docs;
pub mod health;

pub use docs::{openapi_json, openapi_yaml};
pub use health::{health, readiness};
