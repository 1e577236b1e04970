//! Operator notification abstraction

use async_trait::async_trait;

use crate::error::OrderResult;
use crate::types::Notification;

/// Delivers workflow failure reports to the operator.
///
/// Implementations typically send mail; the body is HTML. A delivery error is logged by
/// the workflow and does not change the workflow's outcome.
#[async_trait]
pub trait OperatorNotifier: Send + Sync {
    /// Sends one notification.
    async fn notify(&self, notification: &Notification) -> OrderResult<()>;
}

/// Writes notifications to the `log` facade at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl OperatorNotifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> OrderResult<()> {
        log::error!(
            "[notify] {}\n{}",
            notification.subject,
            notification.body
        );
        Ok(())
    }
}
