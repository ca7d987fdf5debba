use std::collections::HashSet;

use super::error::StartupConfigError;
use super::metadata::ApiMetadata;
use super::security::{openid_scopes, OAuthEndpoints, SecurityScheme, OAUTH2_BEARER};

/// Applies a registered security scheme to every operation of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub scheme: String,
    pub scopes: Vec<String>,
}

impl SecurityRequirement {
    pub fn new(scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            scopes: Vec::new(),
        }
    }

    pub fn with_scopes<I, S>(scheme: &str, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scheme: scheme.to_string(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the documentation layer needs to describe the API.
///
/// Built once through [`ApiDescriptorBuilder`], which guarantees scheme names
/// are unique and every requirement points at a registered scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDescriptor {
    metadata: ApiMetadata,
    security_schemes: Vec<SecurityScheme>,
    security: Vec<SecurityRequirement>,
}

impl ApiDescriptor {
    pub fn builder(metadata: ApiMetadata) -> ApiDescriptorBuilder {
        ApiDescriptorBuilder {
            metadata,
            security_schemes: Vec::new(),
            security: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &ApiMetadata {
        &self.metadata
    }

    pub fn security_schemes(&self) -> &[SecurityScheme] {
        &self.security_schemes
    }

    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    pub fn security_scheme(&self, name: &str) -> Option<&SecurityScheme> {
        self.security_schemes.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct ApiDescriptorBuilder {
    metadata: ApiMetadata,
    security_schemes: Vec<SecurityScheme>,
    security: Vec<SecurityRequirement>,
}

impl ApiDescriptorBuilder {
    pub fn security_scheme(mut self, scheme: SecurityScheme) -> Self {
        self.security_schemes.push(scheme);
        self
    }

    pub fn require(mut self, requirement: SecurityRequirement) -> Self {
        self.security.push(requirement);
        self
    }

    pub fn build(self) -> Result<ApiDescriptor, StartupConfigError> {
        let mut names = HashSet::new();
        for scheme in &self.security_schemes {
            if !names.insert(scheme.name.as_str()) {
                return Err(StartupConfigError::DuplicateScheme(scheme.name.clone()));
            }
        }

        for requirement in &self.security {
            let scheme = self
                .security_schemes
                .iter()
                .find(|s| s.name == requirement.scheme)
                .ok_or_else(|| StartupConfigError::UnknownScheme(requirement.scheme.clone()))?;

            if let Some(scope) = requirement
                .scopes
                .iter()
                .find(|scope| !scheme.declares_scope(scope))
            {
                return Err(StartupConfigError::UnknownScope {
                    scheme: scheme.name.clone(),
                    scope: scope.clone(),
                });
            }
        }

        Ok(ApiDescriptor {
            metadata: self.metadata,
            security_schemes: self.security_schemes,
            security: self.security,
        })
    }
}

/// Descriptor for the Product Service API.
///
/// One OAuth2 authorization-code scheme named `oauth2_bearer`, pointing at the
/// configured identity provider, required globally.
pub fn product_api_descriptor(
    endpoints: &OAuthEndpoints,
) -> Result<ApiDescriptor, StartupConfigError> {
    ApiDescriptor::builder(ApiMetadata::product_service())
        .security_scheme(SecurityScheme::oauth2_authorization_code(
            OAUTH2_BEARER,
            endpoints,
            openid_scopes(),
        ))
        .require(SecurityRequirement::new(OAUTH2_BEARER))
        .build()
}
