//! Order services

mod order_management_service;
mod order_workflow_service;

pub use order_management_service::OrderManagementService;
pub use order_workflow_service::OrderWorkflowService;

use std::sync::Arc;

use globalsign_api::CertificateApi;

use crate::error::OrderError;
use crate::traits::{CustomerAcknowledger, LogAcknowledger, LogNotifier, OperatorNotifier};
use crate::types::{Acknowledgement, Notification};

/// Service context holding every dependency
///
/// The host builds this with its GlobalSign client and delivery implementations.
pub struct ServiceContext {
    /// GlobalSign API client
    pub api: Arc<dyn CertificateApi>,
    /// Receives workflow failure reports
    pub notifier: Arc<dyn OperatorNotifier>,
    /// Receives completed-order confirmations
    pub acknowledger: Arc<dyn CustomerAcknowledger>,
}

impl ServiceContext {
    /// Creates a service context
    #[must_use]
    pub fn new(
        api: Arc<dyn CertificateApi>,
        notifier: Arc<dyn OperatorNotifier>,
        acknowledger: Arc<dyn CustomerAcknowledger>,
    ) -> Self {
        Self {
            api,
            notifier,
            acknowledger,
        }
    }

    /// Context that reports through the `log` facade only.
    #[must_use]
    pub fn with_log_delivery(api: Arc<dyn CertificateApi>) -> Self {
        Self::new(api, Arc::new(LogNotifier), Arc::new(LogAcknowledger))
    }

    /// Sends an operator notification; delivery errors are logged and swallowed.
    pub async fn notify_operator(&self, notification: &Notification) {
        if let Err(e) = self.notifier.notify(notification).await {
            log::error!(
                "Failed to deliver notification '{}': {e}",
                notification.subject
            );
        }
    }

    /// Sends a customer acknowledgement; delivery errors are logged and swallowed.
    pub async fn acknowledge_customer(&self, acknowledgement: &Acknowledgement) {
        if let Err(e) = self.acknowledger.acknowledge(acknowledgement).await {
            log::warn!(
                "Failed to acknowledge order {}: {e}",
                acknowledgement.order_id
            );
        }
    }

    /// Logs an error at the level its kind calls for.
    pub fn log_error(context: &str, error: &OrderError) {
        if error.is_expected() {
            log::warn!("{context}: {error}");
        } else {
            log::error!("{context}: {error}");
        }
    }
}
