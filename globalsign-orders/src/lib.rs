//! # globalsign-orders
//!
//! SSL certificate order workflows on top of [`globalsign_api`].
//!
//! - [`OrderWorkflowService`]: validate, resolve the DV approver and place
//!   AlphaSSL, DomainSSL, OrganizationSSL and ExtendedSSL orders, new or renewal.
//! - [`OrderManagementService`]: resend or change the approver mail, reissue, query
//!   and list orders.
//!
//! Workflow failures are reported once to an [`OperatorNotifier`] with the full
//! [`DiagnosticTrace`]; completed orders are acknowledged once through a
//! [`CustomerAcknowledger`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use globalsign_api::{ClientConfig, ContactInfo, Credentials, Environment, create_client};
//! use globalsign_orders::{OrderSubject, OrderWorkflowService, ServiceContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("api-user", "api-password");
//!     let config = ClientConfig::new(credentials, Environment::Sandbox);
//!     let ctx = Arc::new(ServiceContext::with_log_delivery(create_client(config)?));
//!     let workflows = OrderWorkflowService::new(ctx);
//!
//!     let contact = ContactInfo {
//!         first_name: "Jane".into(),
//!         last_name: "Doe".into(),
//!         phone: "+1 555 0100".into(),
//!         email: "jane@example.com".into(),
//!     };
//!     let subject = OrderSubject::new("example.com", contact)
//!         .with_csr(std::fs::read_to_string("example.com.csr")?);
//!
//!     match workflows.create_domainssl(subject).await {
//!         Ok(done) => println!("order {}", done.order_id),
//!         Err(failure) => eprintln!("{failure} (trace {})", failure.trace.trace_id),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{OrderError, OrderResult, WorkflowFailure};
pub use services::{OrderManagementService, OrderWorkflowService, ServiceContext};
pub use traits::{CustomerAcknowledger, LogAcknowledger, LogNotifier, OperatorNotifier};
pub use types::{
    Acknowledgement, CertificateOrder, CompletedOrder, DiagnosticTrace, Notification,
    NotificationCategory, OrderSubject, TraceStep, WorkflowStep,
};
