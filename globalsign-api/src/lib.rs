//! # globalsign-api
//!
//! Typed client for the GlobalSign certificate ordering SOAP services.
//!
//! ## Services
//!
//! | Group | Operations |
//! |-------|------------|
//! | `GasOrder` | `GSValidateOrderParameters`, `GSDVOrder`, `GSOVOrder`, `GSEVOrder`, `ResendEmail` |
//! | `GasOrderWithoutCSR` | `GSDVOrderWithoutCSR`, `GSOVOrderWithoutCSR` |
//! | `GasQuery` | `GetDVApproverList`, `GetOrderByOrderID`, `GetOrderByDataRange`, `GetCertificateOrders` |
//! | GAS v1 | `ReIssue` |
//! | ServerSSL v1 | `ChangeApproverEmail` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use globalsign_api::{
//!     CertificateApi, Environment, GlobalSignClient, OrderKind, OrderRequest, ProductCode,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GlobalSignClient::new("api-user", "api-password", Environment::Sandbox)?;
//!
//!     let order = OrderRequest {
//!         product: ProductCode::DomainSsl,
//!         kind: OrderKind::New,
//!         fqdn: "example.com".to_string(),
//!         csr: Some(std::fs::read_to_string("example.com.csr")?),
//!         wildcard: false,
//!     };
//!     let outcome = client.validate_order_parameters(&order).await?;
//!     let validation = outcome.into_result()?;
//!     println!("reserved order id: {:?}", validation.order_id);
//!
//!     let approvers = client.get_approver_list("example.com").await?.into_result()?;
//!     for approver in &approvers.approvers {
//!         println!("{}", approver.email);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<OperationOutcome<T>, ApiError>`. `Err` means the vendor's
//! verdict is unknown (connection, timeout, HTTP status, SOAP fault, unparseable body).
//! A parsed response is always `Ok`, whatever its success code;
//! [`OperationOutcome::into_result`] turns a non-zero code into [`ApiError::Rejected`].
//!
//! Only connection-establishment failures are retried (see [`ClientConfig::max_reconnects`]).

mod client;
mod config;
mod error;
mod factory;
mod http_client;
mod soap;
mod traits;
mod types;
mod utils;
mod xml;

// Re-export error types
pub use error::{
    ApiError, BALANCE_ERROR_FRAGMENT, BALANCE_ERROR_MESSAGE, Result, VendorError,
    is_balance_error, join_vendor_messages,
};

// Re-export client and configuration
pub use client::{GlobalSignClient, GlobalSignClientBuilder};
pub use config::{
    ClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_RECONNECTS,
    DEFAULT_REQUEST_TIMEOUT_SECS, EndpointOverrides, EndpointSet, Environment, ServiceGroup,
};

// Re-export factory functions
pub use factory::create_client;

// Re-export core trait
pub use traits::CertificateApi;

// Re-export types
pub use types::{
    Approver, ApproverList, BusinessCategory, CaCertificate, CertificateInfo, ContactInfo,
    Credentials, DEFAULT_COUNTRY, DateRange, Exchange, ExtendedValidationInfo, Fulfillment,
    HashAlgorithm, LICENSES, OperationOutcome, OrderDetail, OrderKind, OrderPlacement,
    OrderRequest, OrganizationAddress, OrganizationInfo, ParsedCsr, PlaceOrderRequest,
    ProductCode, ProductFamily, ReissueResult, ResendEmailType, ResponseHeader, SanEntry,
    VALIDITY_MONTHS, ValidationResult,
};

// Re-export utils module
pub use utils::{datetime, log_sanitizer};
