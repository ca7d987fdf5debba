//! Documentation server for the Product Service API.
//!
//! Startup builds the API descriptor from configuration, renders it once and
//! shares the result with every worker. Configuration problems abort startup
//! before the server binds.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::{oauth, SwaggerUi};

use product_config::{Config, SwaggerUiConfig};
use product_core::{product_api_descriptor, StartupConfigError, OPENID_SCOPE};
use product_openapi::ApiDocuments;

pub mod handlers;

pub const SERVICE_NAME: &str = "product-service";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const OPENAPI_YAML_PATH: &str = "/api-docs/openapi.yaml";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui/{_:.*}";

/// Operations served next to the documentation itself.
#[derive(OpenApi)]
#[openapi(paths(handlers::health::health, handlers::health::readiness))]
pub struct HealthApi;

/// Build and render the API documents for `config`.
pub fn build_documents(config: &Config) -> Result<ApiDocuments, StartupConfigError> {
    let endpoints = config.oauth_endpoints()?;
    let descriptor = product_api_descriptor(&endpoints)?;

    let mut openapi = product_openapi::render(&descriptor);
    openapi.merge(HealthApi::openapi());

    ApiDocuments::new(openapi)
}

/// Document and health routes. Expects `web::Data<ApiDocuments>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(OPENAPI_JSON_PATH, web::get().to(handlers::openapi_json))
        .route(OPENAPI_YAML_PATH, web::get().to(handlers::openapi_yaml))
        .route("/health", web::get().to(handlers::health))
        .route("/ready", web::get().to(handlers::readiness));
}

/// Swagger UI reading the served JSON document, with the authorization-code
/// login pre-filled.
pub fn swagger_ui(ui: &SwaggerUiConfig) -> SwaggerUi {
    let mut oauth = oauth::Config::new()
        .scopes(vec![OPENID_SCOPE.to_string()])
        .use_pkce_with_authorization_code_grant(true);
    if let Some(client_id) = ui.client_id.as_deref() {
        oauth = oauth.client_id(client_id);
    }

    SwaggerUi::new(SWAGGER_UI_PATH)
        .config(utoipa_swagger_ui::Config::from(OPENAPI_JSON_PATH))
        .oauth(oauth)
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let telemetry = product_observability::init_telemetry(SERVICE_NAME)?;

    let result = serve().await;
    if let Err(ref e) = result {
        tracing::error!(error = %e, "Product Service documentation server failed");
    }

    telemetry.shutdown();
    result
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing::info!(config = ?config.sanitized(), "Loaded configuration");

    let documents = web::Data::new(build_documents(&config)?);
    tracing::info!(
        json = OPENAPI_JSON_PATH,
        yaml = OPENAPI_YAML_PATH,
        swagger_ui = config.docs.swagger_ui.enabled,
        "Registered API documentation"
    );

    let ui = config.docs.swagger_ui.clone();
    let bind_addr = (config.server.host.clone(), config.server.port);
    tracing::info!(host = %bind_addr.0, port = bind_addr.1, "Starting HTTP server");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .max_age(3600);

        let mut app = App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(documents.clone())
            .configure(configure);

        if ui.enabled {
            app = app.service(swagger_ui(&ui));
        }

        app
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
