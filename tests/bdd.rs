// BDD tests using Cucumber
//
// Scenarios live in tests/features and drive the same startup path as the
// server: configuration -> descriptor -> rendered documents.

use cucumber::{given, then, when, World};
use serde_json::Value;

use product_service::config::Config;
use product_service::models::{
    product_api_descriptor, ApiDescriptor, OAuthFlow, SecuritySchemeKind, SecuritySchemeType,
    StartupConfigError,
};
use product_service::openapi::ApiDocuments;
use product_service::server::build_documents;

#[derive(Debug, Default, World)]
pub struct DocsWorld {
    pub config: Config,
    pub descriptor: Option<Result<ApiDescriptor, StartupConfigError>>,
    pub documents: Vec<ApiDocuments>,
}

impl DocsWorld {
    fn register(&mut self) {
        let descriptor = self
            .config
            .oauth_endpoints()
            .and_then(|endpoints| product_api_descriptor(&endpoints));

        if descriptor.is_ok() {
            let documents = build_documents(&self.config).expect("documents should render");
            self.documents.push(documents);
        }
        self.descriptor = Some(descriptor);
    }

    fn descriptor(&self) -> &ApiDescriptor {
        match &self.descriptor {
            Some(Ok(descriptor)) => descriptor,
            other => panic!("expected a registered descriptor, got {other:?}"),
        }
    }

    fn error(&self) -> &StartupConfigError {
        match &self.descriptor {
            Some(Err(err)) => err,
            other => panic!("expected startup to fail, got {other:?}"),
        }
    }

    fn document(&self) -> Value {
        let docs = self.documents.first().expect("documents rendered");
        serde_json::from_str(docs.json()).expect("document is JSON")
    }
}

#[given(expr = "the authorization URL {string}")]
fn authorization_url(world: &mut DocsWorld, url: String) {
    world.config.docs.oauth_flow.authorization_url = Some(url);
}

#[given(expr = "the token URL {string}")]
fn token_url(world: &mut DocsWorld, url: String) {
    world.config.docs.oauth_flow.token_url = Some(url);
}

#[when("the API documentation is registered")]
fn register(world: &mut DocsWorld) {
    world.register();
}

#[when("the API documentation is registered twice")]
fn register_twice(world: &mut DocsWorld) {
    world.register();
    world.register();
}

#[then(expr = "the API is titled {string} with description {string} and version {string}")]
fn api_metadata(world: &mut DocsWorld, title: String, description: String, version: String) {
    let metadata = world.descriptor().metadata();
    assert_eq!(metadata.title, title);
    assert_eq!(metadata.description, description);
    assert_eq!(metadata.version, version);

    let doc = world.document();
    assert_eq!(doc["info"]["title"], title.as_str());
    assert_eq!(doc["info"]["description"], description.as_str());
    assert_eq!(doc["info"]["version"], version.as_str());
}

#[then(expr = "the only security scheme is the OAuth2 scheme {string}")]
fn only_scheme(world: &mut DocsWorld, name: String) {
    let schemes = world.descriptor().security_schemes();
    assert_eq!(schemes.len(), 1);
    assert_eq!(schemes[0].name, name);
    assert_eq!(schemes[0].scheme_type(), SecuritySchemeType::OAuth2);

    let doc = world.document();
    let rendered = doc["components"]["securitySchemes"]
        .as_object()
        .expect("securitySchemes");
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[&name]["type"], "oauth2");
}

#[then("its authorization code flow uses the configured endpoints")]
fn flow_endpoints(world: &mut DocsWorld) {
    let flows = match &world.descriptor().security_schemes()[0].kind {
        SecuritySchemeKind::OAuth2 { flows } => flows,
        other => panic!("expected OAuth2, got {other:?}"),
    };
    assert_eq!(flows.len(), 1);

    let OAuthFlow::AuthorizationCode {
        authorization_url,
        token_url,
        ..
    } = &flows[0]
    else {
        panic!("expected an authorization code flow, got {:?}", flows[0]);
    };
    assert_eq!(
        Some(authorization_url),
        world.config.docs.oauth_flow.authorization_url.as_ref()
    );
    assert_eq!(Some(token_url), world.config.docs.oauth_flow.token_url.as_ref());
}

#[then(expr = "its only scope is {string} described as {string}")]
fn only_scope(world: &mut DocsWorld, scope: String, description: String) {
    let doc = world.document();
    let scopes = doc["components"]["securitySchemes"]["oauth2_bearer"]["flows"]
        ["authorizationCode"]["scopes"]
        .as_object()
        .expect("scopes");

    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[&scope], description.as_str());
}

#[then(expr = "every operation requires {string}")]
fn global_requirement(world: &mut DocsWorld, name: String) {
    let descriptor = world.descriptor();
    assert_eq!(descriptor.security().len(), 1);
    assert_eq!(descriptor.security()[0].scheme, name);
    assert!(descriptor.security_scheme(&name).is_some());
}

#[then("both documents are identical")]
fn identical(world: &mut DocsWorld) {
    assert_eq!(world.documents.len(), 2);
    assert_eq!(world.documents[0].json(), world.documents[1].json());
    assert_eq!(world.documents[0].yaml(), world.documents[1].yaml());
}

#[then(expr = "startup fails because {string} is missing")]
fn fails_missing(world: &mut DocsWorld, key: String) {
    assert_eq!(world.error(), &StartupConfigError::Missing { key });
    assert!(world.documents.is_empty());
}

#[then(expr = "startup fails because {string} is invalid")]
fn fails_invalid(world: &mut DocsWorld, key: String) {
    assert!(
        matches!(world.error(), StartupConfigError::Invalid { key: k, .. } if *k == key),
        "unexpected error: {:?}",
        world.error()
    );
    assert!(world.documents.is_empty());
}

#[tokio::main]
async fn main() {
    DocsWorld::cucumber()
        .run_and_exit(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/features"))
        .await;
}
