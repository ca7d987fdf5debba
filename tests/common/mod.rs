#![allow(dead_code)]

use product_service::config::Config;
use product_service::openapi::ApiDocuments;

pub const AUTH_URL: &str = "http://identity/realms/yas/protocol/openid-connect/auth";
pub const TOKEN_URL: &str = "http://identity/realms/yas/protocol/openid-connect/token";

/// Configuration with both identity provider endpoints set.
pub fn config_with_endpoints(authorization_url: &str, token_url: &str) -> Config {
    let mut config = Config::default();
    config.docs.oauth_flow.authorization_url = Some(authorization_url.to_string());
    config.docs.oauth_flow.token_url = Some(token_url.to_string());
    config
}

pub fn documents() -> ApiDocuments {
    product_service::server::build_documents(&config_with_endpoints(AUTH_URL, TOKEN_URL))
        .expect("documents should build from valid configuration")
}
