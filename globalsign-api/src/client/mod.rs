//! GlobalSign SOAP client

mod api;
mod http;
pub(crate) mod request;
pub(crate) mod response;

use std::time::Duration;

use reqwest::Client;

use crate::config::{ClientConfig, EndpointOverrides, EndpointSet, Environment};
use crate::error::{ApiError, Result};
use crate::types::Credentials;

/// Client for the five GlobalSign SOAP services.
///
/// Holds only configuration and one pooled HTTP client; it is cheap to share behind an
/// `Arc` and carries no per-order state.
///
/// # Construction
///
/// ```rust,no_run
/// use globalsign_api::{Environment, GlobalSignClient};
///
/// let client = GlobalSignClient::new("api-user", "api-password", Environment::Sandbox)?;
/// # Ok::<(), globalsign_api::ApiError>(())
/// ```
pub struct GlobalSignClient {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) endpoints: EndpointSet,
    pub(crate) max_reconnects: u32,
}

/// Builder for [`GlobalSignClient`].
pub struct GlobalSignClientBuilder {
    config: ClientConfig,
}

impl GlobalSignClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Selects production or sandbox endpoints (default: production).
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Set the connection-establishment timeout (default: 30s).
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout_secs = timeout.as_secs();
        self
    }

    /// Set the whole-request timeout (default: 300s).
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set how often a failed connection attempt is repeated (default: 1).
    #[must_use]
    pub fn max_reconnects(mut self, reconnects: u32) -> Self {
        self.config.max_reconnects = reconnects;
        self
    }

    /// Override endpoint URLs per service group.
    #[must_use]
    pub fn endpoints(mut self, overrides: EndpointOverrides) -> Self {
        self.config.endpoints = overrides;
        self
    }

    /// Build the [`GlobalSignClient`] instance.
    pub fn build(self) -> Result<GlobalSignClient> {
        let config = self.config;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::InvalidParameter {
                param: "http_client".to_string(),
                detail: e.to_string(),
            })?;

        let endpoints = EndpointSet::resolve(config.environment, &config.endpoints);
        log::debug!(
            "[globalsign] Client ready for {:?} as {}",
            config.environment,
            config.credentials.username
        );

        Ok(GlobalSignClient {
            client,
            credentials: config.credentials,
            endpoints,
            max_reconnects: config.max_reconnects,
        })
    }
}

impl GlobalSignClient {
    /// Creates a client with default timeouts.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        Self::builder(Credentials::new(username, password))
            .environment(environment)
            .build()
    }

    /// Creates a client from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        GlobalSignClientBuilder::new(config).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(credentials: Credentials) -> GlobalSignClientBuilder {
        GlobalSignClientBuilder::new(ClientConfig::new(credentials, Environment::default()))
    }

    /// Resolved endpoint URLs.
    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }
}
