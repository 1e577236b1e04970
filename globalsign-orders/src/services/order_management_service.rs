//! Order maintenance and query service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use globalsign_api::{
    DateRange, HashAlgorithm, OperationOutcome, OrderDetail, ReissueResult, ResendEmailType,
};

use crate::error::{OrderError, OrderResult};
use crate::services::ServiceContext;

/// Maintenance and query operations on existing orders
pub struct OrderManagementService {
    ctx: Arc<ServiceContext>,
}

impl OrderManagementService {
    /// Creates the management service
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Sends the domain approval mail for `order_id` again.
    pub async fn resend_approver_email(&self, order_id: &str) -> OrderResult<()> {
        let result = self
            .ctx
            .api
            .resend_approver_email(order_id, ResendEmailType::ApproverEmail)
            .await;
        settle("resend approver email", order_id, result)?;
        log::info!("Approver email resent for order {order_id}");
        Ok(())
    }

    /// Points a pending DV order at another approver mailbox.
    pub async fn change_approver_email(
        &self,
        order_id: &str,
        approver_email: &str,
        fqdn: &str,
    ) -> OrderResult<()> {
        let result = self
            .ctx
            .api
            .change_approver_email(order_id, approver_email, fqdn)
            .await;
        settle("change approver email", order_id, result)?;
        log::info!("Approver for order {order_id} changed to {approver_email}");
        Ok(())
    }

    /// Reissues the certificate of `order_id` for a new CSR (SHA-256).
    pub async fn reissue(&self, order_id: &str, csr: &str) -> OrderResult<ReissueResult> {
        if csr.trim().is_empty() {
            return Err(OrderError::InvalidOrder("reissue requires a CSR".to_string()));
        }
        let result = self
            .ctx
            .api
            .reissue_certificate(order_id, csr, HashAlgorithm::Sha256)
            .await;
        let reissued = settle("reissue", order_id, result)?;
        log::info!(
            "Order {order_id} reissued as {}",
            reissued.order_id.as_deref().unwrap_or("unknown")
        );
        Ok(reissued)
    }

    /// Order status, certificate info and fulfillment of `order_id`.
    pub async fn get_order(&self, order_id: &str) -> OrderResult<OrderDetail> {
        let result = self.ctx.api.get_order_by_id(order_id).await;
        settle("get order", order_id, result)
    }

    /// Orders placed between `from` and `to`, inclusive.
    pub async fn get_orders_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> OrderResult<Vec<OrderDetail>> {
        let range = DateRange { from, to };
        let result = self.ctx.api.get_orders_by_date_range(&range).await;
        settle("get orders by date range", &format!("{from}..{to}"), result)
    }

    /// Every order of the account.
    pub async fn list_certs(&self) -> OrderResult<Vec<OrderDetail>> {
        let result = self.ctx.api.list_orders().await;
        let orders = settle("list certificates", "all", result)?;
        log::debug!("Listed {} order(s)", orders.len());
        Ok(orders)
    }
}

/// Turns a call result into the payload, logging any failure.
fn settle<T>(
    action: &str,
    target: &str,
    result: globalsign_api::Result<OperationOutcome<T>>,
) -> OrderResult<T> {
    result
        .and_then(OperationOutcome::into_result)
        .map_err(|e| {
            let error = OrderError::from(e);
            ServiceContext::log_error(&format!("Failed to {action} ({target})"), &error);
            error
        })
}
