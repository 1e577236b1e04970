//! Client factory.

use std::sync::Arc;

use crate::client::GlobalSignClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::traits::CertificateApi;

/// Creates a [`CertificateApi`] from a loaded configuration.
///
/// The client is wrapped in `Arc<dyn CertificateApi>` so it can be shared across async
/// tasks and swapped for a test double by the services that consume it.
///
/// # Examples
///
/// ```rust,no_run
/// use globalsign_api::{ClientConfig, Credentials, Environment, create_client};
///
/// let credentials = Credentials::new("api-user", "api-password");
/// let config = ClientConfig::new(credentials, Environment::Sandbox);
/// let api = create_client(config).unwrap();
/// ```
pub fn create_client(config: ClientConfig) -> Result<Arc<dyn CertificateApi>> {
    Ok(Arc::new(GlobalSignClient::from_config(config)?))
}
