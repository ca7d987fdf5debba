pub mod descriptor;
pub mod error;
pub mod health;
pub mod metadata;
pub mod security;

pub use descriptor::*;
pub use error::*;
pub use health::*;
pub use metadata::*;
pub use security::*;
