//! Client configuration and endpoint resolution.

use serde::{Deserialize, Serialize};

use crate::types::Credentials;

/// Default connection-establishment timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
/// Default whole-request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
/// Default number of reconnect attempts when a connection cannot be established.
pub const DEFAULT_MAX_RECONNECTS: u32 = 1;

const PRODUCTION_HOST: &str = "https://system.globalsign.com";
const SANDBOX_HOST: &str = "https://testsystem.globalsign.com";

/// Default `User-Agent` header.
pub fn default_user_agent() -> String {
    format!("globalsign-api/{}", env!("CARGO_PKG_VERSION"))
}

/// GlobalSign environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    /// `testsystem.globalsign.com`
    Sandbox,
}

impl Environment {
    fn host(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_HOST,
            Self::Sandbox => SANDBOX_HOST,
        }
    }
}

/// The five SOAP services operations are dispatched to.
///
/// Each service has its own endpoint and XML namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceGroup {
    /// ServerSSL v1 functions (`ChangeApproverEmail`).
    Functions,
    /// Legacy `GasOrder` service (validation, DV/OV/EV orders, resend).
    LegacyOrder,
    /// GAS v1 service (`ReIssue`).
    ModernOrder,
    /// `GasQuery` service (approver list, order lookups).
    Query,
    /// `GasOrderWithoutCSR` service (vendor-generated key pairs).
    AutoCsr,
}

impl ServiceGroup {
    /// All service groups.
    pub const ALL: [Self; 5] = [
        Self::Functions,
        Self::LegacyOrder,
        Self::ModernOrder,
        Self::Query,
        Self::AutoCsr,
    ];

    /// Short name used in log prefixes and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Functions => "functions",
            Self::LegacyOrder => "order",
            Self::ModernOrder => "gas",
            Self::Query => "query",
            Self::AutoCsr => "order-woc",
        }
    }

    /// Namespace of the operation element.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Functions | Self::ModernOrder => "https://system.globalsign.com/kb/ws/v1/",
            Self::LegacyOrder => "http://stub.order.gasapiserver.esp.globalsign.com",
            Self::Query => "http://stub.query.gasapiserver.esp.globalsign.com",
            Self::AutoCsr => "http://stub.orderwoc.gasapiserver.esp.globalsign.com",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Functions => "/kb/ws/v1/ServerSSLService",
            Self::LegacyOrder => "/kb/ws/GasOrder",
            Self::ModernOrder => "/kb/ws/v1/GASService",
            Self::Query => "/kb/ws/GasQuery",
            Self::AutoCsr => "/kb/ws/GasOrderWithoutCSR",
        }
    }

    /// Default endpoint URL of this group in `environment`.
    pub fn default_endpoint(self, environment: Environment) -> String {
        format!("{}{}", environment.host(), self.path())
    }
}

/// Per-group endpoint URL overrides. `None` keeps the environment default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointOverrides {
    pub functions: Option<String>,
    pub legacy_order: Option<String>,
    pub modern_order: Option<String>,
    pub query: Option<String>,
    pub auto_csr: Option<String>,
}

impl EndpointOverrides {
    /// Points every group at `base_url` followed by the group's usual path.
    ///
    /// Handy for stub servers and proxies.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let url = |group: ServiceGroup| Some(format!("{base}{}", group.path()));
        Self {
            functions: url(ServiceGroup::Functions),
            legacy_order: url(ServiceGroup::LegacyOrder),
            modern_order: url(ServiceGroup::ModernOrder),
            query: url(ServiceGroup::Query),
            auto_csr: url(ServiceGroup::AutoCsr),
        }
    }

    fn get(&self, group: ServiceGroup) -> Option<&str> {
        match group {
            ServiceGroup::Functions => self.functions.as_deref(),
            ServiceGroup::LegacyOrder => self.legacy_order.as_deref(),
            ServiceGroup::ModernOrder => self.modern_order.as_deref(),
            ServiceGroup::Query => self.query.as_deref(),
            ServiceGroup::AutoCsr => self.auto_csr.as_deref(),
        }
    }
}

/// Endpoint URLs resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    urls: [String; 5],
}

impl EndpointSet {
    /// Resolves every group against `environment`, applying `overrides`.
    pub fn resolve(environment: Environment, overrides: &EndpointOverrides) -> Self {
        let urls = ServiceGroup::ALL.map(|group| {
            overrides
                .get(group)
                .map_or_else(|| group.default_endpoint(environment), str::to_string)
        });
        Self { urls }
    }

    /// Endpoint URL of `group`.
    pub fn url(&self, group: ServiceGroup) -> &str {
        let index = match group {
            ServiceGroup::Functions => 0,
            ServiceGroup::LegacyOrder => 1,
            ServiceGroup::ModernOrder => 2,
            ServiceGroup::Query => 3,
            ServiceGroup::AutoCsr => 4,
        };
        &self.urls[index]
    }
}

/// Everything needed to build a [`GlobalSignClient`](crate::GlobalSignClient).
///
/// Deserializable so a host application can load it from its own configuration source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_reconnects")]
    pub max_reconnects: u32,
    #[serde(default)]
    pub endpoints: EndpointOverrides,
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_reconnects() -> u32 {
    DEFAULT_MAX_RECONNECTS
}

impl ClientConfig {
    /// Configuration with default timeouts for `environment`.
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            max_reconnects: DEFAULT_MAX_RECONNECTS,
            endpoints: EndpointOverrides::default(),
        }
    }
}
