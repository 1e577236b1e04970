//! Customer acknowledgement abstraction

use async_trait::async_trait;

use crate::error::OrderResult;
use crate::types::Acknowledgement;

/// Tells the customer their order went through.
#[async_trait]
pub trait CustomerAcknowledger: Send + Sync {
    /// Sends one acknowledgement.
    async fn acknowledge(&self, acknowledgement: &Acknowledgement) -> OrderResult<()>;
}

/// Writes acknowledgements to the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAcknowledger;

#[async_trait]
impl CustomerAcknowledger for LogAcknowledger {
    async fn acknowledge(&self, acknowledgement: &Acknowledgement) -> OrderResult<()> {
        log::info!(
            "[acknowledge] {} for {} (order {}): {}",
            acknowledgement.subject,
            acknowledgement.fqdn,
            acknowledgement.order_id,
            acknowledgement.body
        );
        Ok(())
    }
}
