use std::fmt;

use utoipa::openapi::OpenApi;

use product_core::StartupConfigError;

/// An OpenAPI document serialized once at startup.
///
/// Shared read-only by every server worker; handlers only copy out the
/// pre-rendered strings.
#[derive(Clone)]
pub struct ApiDocuments {
    openapi: OpenApi,
    json: String,
    yaml: String,
}

impl ApiDocuments {
    pub fn new(openapi: OpenApi) -> Result<Self, StartupConfigError> {
        let json = openapi
            .to_pretty_json()
            .map_err(|e| StartupConfigError::Render(e.to_string()))?;
        let yaml = openapi
            .to_yaml()
            .map_err(|e| StartupConfigError::Render(e.to_string()))?;

        tracing::debug!(
            json_bytes = json.len(),
            yaml_bytes = yaml.len(),
            "Rendered API documents"
        );

        Ok(Self {
            openapi,
            json,
            yaml,
        })
    }

    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn yaml(&self) -> &str {
        &self.yaml
    }
}

impl fmt::Debug for ApiDocuments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiDocuments")
            .field("title", &self.openapi.info.title)
            .field("json_bytes", &self.json.len())
            .field("yaml_bytes", &self.yaml.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use product_core::{product_api_descriptor, OAuthEndpoints};

    fn documents() -> ApiDocuments {
        let endpoints =
            OAuthEndpoints::new("https://idp.example/auth", "https://idp.example/token")
                .expect("endpoints");
        let descriptor = product_api_descriptor(&endpoints).expect("descriptor");
        ApiDocuments::new(render(&descriptor)).expect("documents")
    }

    #[test]
    fn json_and_yaml_describe_same_api() {
        let docs = documents();

        let json: serde_json::Value = serde_json::from_str(docs.json()).expect("json");
        assert_eq!(json["info"]["title"], "Product Service API");

        assert!(docs.yaml().contains("title: Product Service API"));
        assert!(docs.yaml().contains("oauth2_bearer"));
        assert!(docs.yaml().contains("https://idp.example/token"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(documents().json(), documents().json());
        assert_eq!(documents().yaml(), documents().yaml());
    }

    #[test]
    fn debug_summarizes_documents() {
        let docs = documents();
        let debug = format!("{docs:?}");

        assert!(debug.starts_with("ApiDocuments"));
        assert!(debug.contains("Product Service API"));
        assert!(debug.contains(&format!("json_bytes: {}", docs.json().len())));
        assert!(!debug.contains("oauth2_bearer"));
    }
}
