//! Workflow and service error types

use serde::Serialize;
use thiserror::Error;

pub use globalsign_api::{ApiError, VendorError, join_vendor_messages};

use crate::types::{DiagnosticTrace, NotificationCategory, WorkflowStep};

/// Order layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum OrderError {
    /// `GSValidateOrderParameters` returned a non-zero success code
    #[error("Order parameters rejected for {fqdn} (code {success_code}): {}", join_vendor_messages(.errors))]
    ValidationRejected {
        fqdn: String,
        success_code: i32,
        errors: Vec<VendorError>,
    },

    /// `GetDVApproverList` failed or yielded nothing usable
    #[error("Approver resolution failed for {fqdn}: {reason}")]
    ApproverResolutionFailed {
        fqdn: String,
        reason: String,
        errors: Vec<VendorError>,
    },

    /// The order was refused because the account cannot pay for it
    #[error("Insufficient balance to order {fqdn}: {}", join_vendor_messages(.errors))]
    BalanceRejected {
        fqdn: String,
        operation: String,
        errors: Vec<VendorError>,
    },

    /// The order operation returned any other non-zero success code
    #[error("{operation} rejected for {fqdn} (code {success_code}): {}", join_vendor_messages(.errors))]
    OrderRejected {
        fqdn: String,
        operation: String,
        success_code: i32,
        errors: Vec<VendorError>,
    },

    /// A transport or protocol failure; the vendor's verdict is unknown
    #[error("Transport failure during {step}: {source}")]
    TransportFault {
        step: WorkflowStep,
        #[source]
        source: ApiError,
    },

    /// The order is malformed; nothing was sent for the failing step
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Notification or acknowledgement delivery failed
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Maintenance and query operations
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl OrderError {
    /// Whether this is expected behavior (vendor refusal, bad input), used for log levels.
    ///
    /// Returns `true` when `warn` is appropriate, `false` for `error`.
    /// **Update this method when adding variants.**
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationRejected { .. }
            | Self::ApproverResolutionFailed { .. }
            | Self::BalanceRejected { .. }
            | Self::OrderRejected { .. }
            | Self::InvalidOrder(_) => true,
            Self::TransportFault { .. } | Self::DeliveryFailed(_) => false,
            Self::Api(e) => e.is_expected(),
        }
    }

    /// Notification category for a workflow failure.
    pub fn notification_category(&self) -> NotificationCategory {
        match self {
            Self::ValidationRejected { .. } => NotificationCategory::Validation,
            Self::ApproverResolutionFailed { .. } => NotificationCategory::ApproverList,
            Self::BalanceRejected { .. } => NotificationCategory::Balance,
            Self::TransportFault { .. } => NotificationCategory::Transport,
            Self::OrderRejected { .. }
            | Self::InvalidOrder(_)
            | Self::DeliveryFailed(_)
            | Self::Api(_) => NotificationCategory::Order,
        }
    }
}

/// A terminated order workflow: the classified error and everything exchanged so far.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{error}")]
pub struct WorkflowFailure {
    #[source]
    pub error: OrderError,
    pub trace: DiagnosticTrace,
}

/// Order layer Result type alias
pub type OrderResult<T> = std::result::Result<T, OrderError>;
