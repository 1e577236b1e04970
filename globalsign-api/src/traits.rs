use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ApproverList, DateRange, HashAlgorithm, OperationOutcome, OrderDetail, OrderPlacement,
    OrderRequest, PlaceOrderRequest, ReissueResult, ResendEmailType, ValidationResult,
};

/// GlobalSign certificate ordering API.
///
/// Each method performs exactly one remote call. `Err` means the call failed at the
/// transport or protocol level; a vendor refusal is an `Ok` outcome with a non-zero
/// success code (see [`OperationOutcome::into_result`]).
#[async_trait]
pub trait CertificateApi: Send + Sync {
    /// `GSValidateOrderParameters`: checks product, subject and CSR before ordering.
    ///
    /// Sends the CSR when the order has one, otherwise the FQDN.
    async fn validate_order_parameters(
        &self,
        order: &OrderRequest,
    ) -> Result<OperationOutcome<ValidationResult>>;

    /// `GetDVApproverList`: approver mailboxes for `fqdn` and a reserved order ID.
    async fn get_approver_list(&self, fqdn: &str) -> Result<OperationOutcome<ApproverList>>;

    /// Places a DV, OV or EV order. The vendor operation and service follow from the
    /// product: `GSDVOrder`, `GSOVOrder`, `GSEVOrder`, or the `*WithoutCSR` variants for
    /// vendor-generated key pairs.
    async fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> Result<OperationOutcome<OrderPlacement>>;

    /// `ResendEmail`: sends the approval (or fulfillment) mail again.
    async fn resend_approver_email(
        &self,
        order_id: &str,
        email_type: ResendEmailType,
    ) -> Result<OperationOutcome<()>>;

    /// `ChangeApproverEmail`: redirects domain validation to another mailbox.
    async fn change_approver_email(
        &self,
        order_id: &str,
        approver_email: &str,
        fqdn: &str,
    ) -> Result<OperationOutcome<()>>;

    /// `ReIssue`: issues a new certificate for an existing order from a new CSR.
    async fn reissue_certificate(
        &self,
        order_id: &str,
        csr: &str,
        hash_algorithm: HashAlgorithm,
    ) -> Result<OperationOutcome<ReissueResult>>;

    /// `GetOrderByOrderID` with certificate info, fulfillment and CA chain.
    async fn get_order_by_id(&self, order_id: &str) -> Result<OperationOutcome<OrderDetail>>;

    /// `GetOrderByDataRange`: orders placed within `range`.
    async fn get_orders_by_date_range(
        &self,
        range: &DateRange,
    ) -> Result<OperationOutcome<Vec<OrderDetail>>>;

    /// `GetCertificateOrders`: every order on the account.
    async fn list_orders(&self) -> Result<OperationOutcome<Vec<OrderDetail>>>;
}
