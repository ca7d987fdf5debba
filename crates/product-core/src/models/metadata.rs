pub const PRODUCT_API_TITLE: &str = "Product Service API";
pub const PRODUCT_API_DESCRIPTION: &str = "Product API documentation";
pub const PRODUCT_API_VERSION: &str = "1.0";

/// Title, description and version shown at the top of the API document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMetadata {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl ApiMetadata {
    pub fn new(title: &str, description: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            version: version.to_string(),
        }
    }

    pub fn product_service() -> Self {
        Self::new(
            PRODUCT_API_TITLE,
            PRODUCT_API_DESCRIPTION,
            PRODUCT_API_VERSION,
        )
    }
}
