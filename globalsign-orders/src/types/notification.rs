//! Operator notifications and customer acknowledgements

use serde::{Deserialize, Serialize};

use crate::types::DiagnosticTrace;
use crate::utils::html::escape_html;

/// Subject of the customer acknowledgement.
pub const ACKNOWLEDGEMENT_SUBJECT: &str = "Order Completed";

/// Body of the customer acknowledgement.
pub const ACKNOWLEDGEMENT_BODY: &str =
    "Your SSL Certificate order has been successfully processed.";

/// Kind of workflow failure an operator notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationCategory {
    Validation,
    ApproverList,
    Balance,
    Order,
    Transport,
}

impl NotificationCategory {
    /// Mail subject for a failure on `fqdn`.
    pub fn subject(self, fqdn: &str) -> String {
        match self {
            Self::Validation => format!("GlobalSign SSL Error while processing order {fqdn}"),
            Self::ApproverList => format!(
                "GlobalSign SSL Error While Getting ApproverList for Registering {fqdn}"
            ),
            Self::Balance => format!("GlobalSign Balance/Funds Error While Registering {fqdn}"),
            Self::Order => format!("GlobalSign SSL Error While Registering {fqdn}"),
            Self::Transport => {
                format!("GlobalSign SSL Transport Error While Registering {fqdn}")
            }
        }
    }
}

/// Failure report sent to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub category: NotificationCategory,
    pub subject: String,
    /// HTML body: the subject followed by the escaped trace in a `<pre>` block.
    pub body: String,
}

impl Notification {
    pub fn new(category: NotificationCategory, fqdn: &str, trace: &DiagnosticTrace) -> Self {
        let subject = category.subject(fqdn);
        let body = format!(
            "{subject}<br><pre>{}</pre>",
            escape_html(&trace.to_pretty_json())
        );
        Self {
            category,
            subject,
            body,
        }
    }
}

/// Confirmation sent to the customer after a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub order_id: String,
    pub fqdn: String,
    pub subject: String,
    pub body: String,
}

impl Acknowledgement {
    pub fn new(order_id: &str, fqdn: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            fqdn: fqdn.to_string(),
            subject: ACKNOWLEDGEMENT_SUBJECT.to_string(),
            body: ACKNOWLEDGEMENT_BODY.to_string(),
        }
    }
}
