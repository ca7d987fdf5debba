use std::collections::BTreeMap;

use validator::ValidateUrl;

use super::error::StartupConfigError;

/// Name under which the OAuth2 scheme is registered and required.
pub const OAUTH2_BEARER: &str = "oauth2_bearer";
pub const OPENID_SCOPE: &str = "openid";

pub const AUTHORIZATION_URL_KEY: &str = "docs.oauth_flow.authorization-url";
pub const TOKEN_URL_KEY: &str = "docs.oauth_flow.token-url";

/// Scope name to human-readable description.
pub type Scopes = BTreeMap<String, String>;

/// The `openid` scope, described as itself.
pub fn openid_scopes() -> Scopes {
    Scopes::from([(OPENID_SCOPE.to_string(), OPENID_SCOPE.to_string())])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecuritySchemeType {
    OAuth2,
    ApiKey,
    Http,
    OpenIdConnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpAuthScheme {
    Basic,
    Bearer,
}

/// Authorization and token endpoints of the identity provider.
///
/// Only constructible from absolute `http`/`https` URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    authorization_url: String,
    token_url: String,
}

impl OAuthEndpoints {
    pub fn new(authorization_url: &str, token_url: &str) -> Result<Self, StartupConfigError> {
        Ok(Self {
            authorization_url: parse_endpoint(AUTHORIZATION_URL_KEY, authorization_url)?,
            token_url: parse_endpoint(TOKEN_URL_KEY, token_url)?,
        })
    }

    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

fn parse_endpoint(key: &str, raw: &str) -> Result<String, StartupConfigError> {
    let value = raw.trim().to_string();
    if value.is_empty() {
        return Err(StartupConfigError::missing(key));
    }

    let lower = value.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(StartupConfigError::invalid(
            key,
            format!("expected an http(s) URL, got {value:?}"),
        ));
    }

    if !value.validate_url() {
        return Err(StartupConfigError::invalid(
            key,
            format!("{value:?} is not a valid URL"),
        ));
    }

    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthFlow {
    AuthorizationCode {
        authorization_url: String,
        token_url: String,
        scopes: Scopes,
    },
    ClientCredentials {
        token_url: String,
        scopes: Scopes,
    },
    Implicit {
        authorization_url: String,
        scopes: Scopes,
    },
    Password {
        token_url: String,
        scopes: Scopes,
    },
}

impl OAuthFlow {
    pub fn authorization_code(endpoints: &OAuthEndpoints, scopes: Scopes) -> Self {
        Self::AuthorizationCode {
            authorization_url: endpoints.authorization_url().to_string(),
            token_url: endpoints.token_url().to_string(),
            scopes,
        }
    }

    pub fn scopes(&self) -> &Scopes {
        match self {
            Self::AuthorizationCode { scopes, .. }
            | Self::ClientCredentials { scopes, .. }
            | Self::Implicit { scopes, .. }
            | Self::Password { scopes, .. } => scopes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecuritySchemeKind {
    OAuth2 {
        flows: Vec<OAuthFlow>,
    },
    ApiKey {
        location: ApiKeyLocation,
        parameter: String,
    },
    Http {
        scheme: HttpAuthScheme,
        bearer_format: Option<String>,
    },
    OpenIdConnect {
        discovery_url: String,
    },
}

/// A named authentication mechanism offered by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityScheme {
    pub name: String,
    pub description: Option<String>,
    pub kind: SecuritySchemeKind,
}

impl SecurityScheme {
    pub fn new(name: &str, kind: SecuritySchemeKind) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            kind,
        }
    }

    pub fn oauth2_authorization_code(
        name: &str,
        endpoints: &OAuthEndpoints,
        scopes: Scopes,
    ) -> Self {
        Self::new(
            name,
            SecuritySchemeKind::OAuth2 {
                flows: vec![OAuthFlow::authorization_code(endpoints, scopes)],
            },
        )
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn scheme_type(&self) -> SecuritySchemeType {
        match self.kind {
            SecuritySchemeKind::OAuth2 { .. } => SecuritySchemeType::OAuth2,
            SecuritySchemeKind::ApiKey { .. } => SecuritySchemeType::ApiKey,
            SecuritySchemeKind::Http { .. } => SecuritySchemeType::Http,
            SecuritySchemeKind::OpenIdConnect { .. } => SecuritySchemeType::OpenIdConnect,
        }
    }

    /// Whether a requirement on this scheme may ask for `scope`.
    ///
    /// Only OAuth2 schemes declare scopes; every other type accepts any role
    /// name the way OpenAPI treats them.
    pub fn declares_scope(&self, scope: &str) -> bool {
        match &self.kind {
            SecuritySchemeKind::OAuth2 { flows } => {
                flows.iter().any(|flow| flow.scopes().contains_key(scope))
            }
            _ => true,
        }
    }
}
