use hocon::HoconLoader;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use validator::Validate;

use product_core::{OAuthEndpoints, StartupConfigError, AUTHORIZATION_URL_KEY, TOKEN_URL_KEY};

/// Environment variable naming the HOCON file to load.
pub const CONFIG_PATH_ENV: &str = "PRODUCT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "application.conf";
pub const ENV_PREFIX: &str = "PRODUCT";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub docs: DocsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DocsConfig {
    #[serde(default)]
    pub oauth_flow: OAuthFlowConfig,
    #[serde(default)]
    pub swagger_ui: SwaggerUiConfig,
}

/// Identity provider endpoints advertised by the OAuth2 security scheme.
///
/// Both are required; they stay optional here so a missing value surfaces as
/// [`StartupConfigError::Missing`] rather than a deserializer message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OAuthFlowConfig {
    #[serde(
        default,
        rename = "authorization-url",
        alias = "authorization_url"
    )]
    pub authorization_url: Option<String>,
    #[serde(default, rename = "token-url", alias = "token_url")]
    pub token_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwaggerUiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// OAuth client the documentation UI logs in with.
    #[serde(default)]
    pub client_id: Option<String>,
}

impl Default for SwaggerUiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration for startup.
    ///
    /// Reads the HOCON file named by `PRODUCT_CONFIG` (or `application.conf`
    /// when it exists) and layers `PRODUCT_*` environment variables on top;
    /// without a file the environment alone is used. The result is validated
    /// before it is returned.
    pub fn load() -> Result<Self, StartupConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_hocon_path(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_hocon_path(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => {
                tracing::info!(
                    "No {} found; reading configuration from {}_* environment variables",
                    DEFAULT_CONFIG_PATH,
                    ENV_PREFIX
                );
                Self::from_env()?
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific HOCON file path
    pub fn from_hocon_path<P: AsRef<Path>>(path: P) -> Result<Self, StartupConfigError> {
        let path: PathBuf = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(StartupConfigError::Source(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        resolve_hocon(|| HoconLoader::new().load_file(&path))
    }

    /// Load configuration from an in-memory HOCON document.
    pub fn from_hocon_str(source: &str) -> Result<Self, StartupConfigError> {
        resolve_hocon(|| HoconLoader::new().load_str(source))
    }

    /// Configuration from `PRODUCT_*` environment variables, `__` separating
    /// nested keys (`PRODUCT_DOCS__OAUTH_FLOW__TOKEN_URL`).
    pub fn from_env() -> Result<Self, StartupConfigError> {
        environment()?
            .try_deserialize()
            .map_err(|e| StartupConfigError::Source(e.to_string()))
    }

    /// Override file values with any `PRODUCT_*` environment variables set.
    pub fn apply_env_overrides(&mut self) -> Result<(), StartupConfigError> {
        let env = environment()?;

        if let Some(host) = env_value(&env, "server.host")? {
            self.server.host = host;
        }
        if let Some(port) = env_value(&env, "server.port")? {
            self.server.port = port;
        }
        if let Some(url) = env_value(&env, "docs.oauth_flow.authorization_url")? {
            self.docs.oauth_flow.authorization_url = Some(url);
        }
        if let Some(url) = env_value(&env, "docs.oauth_flow.token_url")? {
            self.docs.oauth_flow.token_url = Some(url);
        }
        if let Some(enabled) = env_value(&env, "docs.swagger_ui.enabled")? {
            self.docs.swagger_ui.enabled = enabled;
        }
        if let Some(client_id) = env_value(&env, "docs.swagger_ui.client_id")? {
            self.docs.swagger_ui.client_id = Some(client_id);
        }

        Ok(())
    }

    /// Check everything startup depends on, failing on the first problem.
    pub fn validate(&self) -> Result<(), StartupConfigError> {
        self.server
            .validate()
            .map_err(|e| StartupConfigError::invalid("server", e.to_string()))?;
        self.oauth_endpoints()?;
        Ok(())
    }

    /// The identity provider endpoints, parsed and checked.
    pub fn oauth_endpoints(&self) -> Result<OAuthEndpoints, StartupConfigError> {
        let flow = &self.docs.oauth_flow;
        let authorization_url = flow
            .authorization_url
            .as_deref()
            .ok_or_else(|| StartupConfigError::missing(AUTHORIZATION_URL_KEY))?;
        let token_url = flow
            .token_url
            .as_deref()
            .ok_or_else(|| StartupConfigError::missing(TOKEN_URL_KEY))?;

        OAuthEndpoints::new(authorization_url, token_url)
    }

    /// Produce a version safe to log (client id masked).
    pub fn sanitized(&self) -> Self {
        let mut clone = self.clone();
        if let Some(ref mut client_id) = clone.docs.swagger_ui.client_id {
            *client_id = "***MASKED***".to_string();
        }
        clone
    }
}

fn environment() -> Result<config::Config, StartupConfigError> {
    config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| StartupConfigError::Source(e.to_string()))
}

fn env_value<T: DeserializeOwned>(
    env: &config::Config,
    key: &str,
) -> Result<Option<T>, StartupConfigError> {
    match env.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(StartupConfigError::invalid(key, e.to_string())),
    }
}

/// Load and resolve a HOCON document.
///
/// The hocon loader panics on some inputs (an optional `${?VAR}` substitution
/// on a key with no earlier value), so panics become a
/// [`StartupConfigError::Source`] as well.
fn resolve_hocon<F>(load: F) -> Result<Config, StartupConfigError>
where
    F: FnOnce() -> Result<HoconLoader, hocon::Error>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        load()
            .map_err(|e| StartupConfigError::Source(format!("Failed to load HOCON: {}", e)))?
            .resolve::<Config>()
            .map_err(|e| {
                StartupConfigError::Source(format!("Failed to parse and resolve HOCON: {}", e))
            })
    }));

    outcome.unwrap_or_else(|_| {
        Err(StartupConfigError::Source(
            "HOCON loader panicked while resolving the document".to_string(),
        ))
    })
}
