use utoipa::openapi::security::{
    self, ApiKey, ApiKeyValue, AuthorizationCode, ClientCredentials, Flow, HttpBuilder, Implicit,
    OAuth2, OpenIdConnect, Password, Scopes,
};
use utoipa::openapi::{InfoBuilder, OpenApi as OpenApiDocument};
use utoipa::{Modify, OpenApi};

use product_core::{
    ApiDescriptor, ApiKeyLocation, HttpAuthScheme, OAuthFlow, SecurityScheme, SecuritySchemeKind,
};

use crate::ApiDoc;

/// Writes a descriptor's info, security schemes and global requirements into
/// an OpenAPI document.
pub struct DescriptorAddon<'a>(pub &'a ApiDescriptor);

impl Modify for DescriptorAddon<'_> {
    fn modify(&self, openapi: &mut OpenApiDocument) {
        let metadata = self.0.metadata();
        openapi.info = InfoBuilder::new()
            .title(metadata.title.as_str())
            .description(Some(metadata.description.as_str()))
            .version(metadata.version.as_str())
            .build();

        let components = openapi.components.get_or_insert_with(Default::default);
        for scheme in self.0.security_schemes() {
            components.add_security_scheme(scheme.name.as_str(), security_scheme(scheme));
        }

        let requirements: Vec<_> = self
            .0
            .security()
            .iter()
            .map(|r| security::SecurityRequirement::new(r.scheme.as_str(), r.scopes.iter()))
            .collect();
        if !requirements.is_empty() {
            openapi.security = Some(requirements);
        }
    }
}

/// Render a descriptor on top of [`ApiDoc`].
pub fn render(descriptor: &ApiDescriptor) -> OpenApiDocument {
    let mut openapi = ApiDoc::openapi();
    DescriptorAddon(descriptor).modify(&mut openapi);
    openapi
}

fn security_scheme(scheme: &SecurityScheme) -> security::SecurityScheme {
    let description = scheme.description.as_deref();

    match &scheme.kind {
        SecuritySchemeKind::OAuth2 { flows } => {
            let flows = flows.iter().map(flow);
            let oauth2 = match description {
                Some(d) => OAuth2::with_description(flows, d),
                None => OAuth2::new(flows),
            };
            security::SecurityScheme::OAuth2(oauth2)
        }
        SecuritySchemeKind::ApiKey {
            location,
            parameter,
        } => {
            let value = match description {
                Some(d) => ApiKeyValue::with_description(parameter.as_str(), d),
                None => ApiKeyValue::new(parameter.as_str()),
            };
            security::SecurityScheme::ApiKey(match location {
                ApiKeyLocation::Header => ApiKey::Header(value),
                ApiKeyLocation::Query => ApiKey::Query(value),
                ApiKeyLocation::Cookie => ApiKey::Cookie(value),
            })
        }
        SecuritySchemeKind::Http {
            scheme: http_scheme,
            bearer_format,
        } => {
            let mut builder = HttpBuilder::new()
                .scheme(match http_scheme {
                    HttpAuthScheme::Basic => security::HttpAuthScheme::Basic,
                    HttpAuthScheme::Bearer => security::HttpAuthScheme::Bearer,
                })
                .description(description);
            if let Some(format) = bearer_format {
                builder = builder.bearer_format(format.as_str());
            }
            security::SecurityScheme::Http(builder.build())
        }
        SecuritySchemeKind::OpenIdConnect { discovery_url } => {
            security::SecurityScheme::OpenIdConnect(match description {
                Some(d) => OpenIdConnect::with_description(discovery_url.as_str(), d),
                None => OpenIdConnect::new(discovery_url.as_str()),
            })
        }
    }
}

fn flow(flow: &OAuthFlow) -> Flow {
    let scopes = |scopes: &product_core::Scopes| {
        Scopes::from_iter(scopes.iter().map(|(name, desc)| (name.clone(), desc.clone())))
    };

    match flow {
        OAuthFlow::AuthorizationCode {
            authorization_url,
            token_url,
            scopes: s,
        } => Flow::AuthorizationCode(AuthorizationCode::new(
            authorization_url.as_str(),
            token_url.as_str(),
            scopes(s),
        )),
        OAuthFlow::ClientCredentials {
            token_url,
            scopes: s,
        } => Flow::ClientCredentials(ClientCredentials::new(token_url.as_str(), scopes(s))),
        OAuthFlow::Implicit {
            authorization_url,
            scopes: s,
        } => Flow::Implicit(Implicit::new(authorization_url.as_str(), scopes(s))),
        OAuthFlow::Password {
            token_url,
            scopes: s,
        } => Flow::Password(Password::new(token_url.as_str(), scopes(s))),
    }
}
