use async_trait::async_trait;

use crate::config::ServiceGroup;
use crate::error::Result;
use crate::traits::CertificateApi;
use crate::types::{
    ApproverList, DateRange, HashAlgorithm, OperationOutcome, OrderDetail, OrderPlacement,
    OrderRequest, PlaceOrderRequest, ReissueResult, ResendEmailType, ValidationResult,
};
use crate::utils::log_sanitizer::pem_fingerprint;
use crate::xml::XmlElement;

use super::GlobalSignClient;
use super::http::SoapReply;
use super::request;
use super::response;

impl SoapReply {
    fn into_outcome<T>(self, parse: impl FnOnce(&XmlElement) -> T) -> OperationOutcome<T> {
        OperationOutcome {
            data: parse(&self.response),
            header: self.header,
            exchange: self.exchange,
        }
    }
}

#[async_trait]
impl CertificateApi for GlobalSignClient {
    async fn validate_order_parameters(
        &self,
        order: &OrderRequest,
    ) -> Result<OperationOutcome<ValidationResult>> {
        log::info!(
            "[globalsign] Validating {} {} order for {} (csr: {})",
            order.product,
            order.kind.as_str(),
            order.fqdn,
            order.csr().map_or_else(|| "none".to_string(), pem_fingerprint)
        );
        let body = request::validate_order_request(self.order_header(), order)?;
        let reply = self
            .call(ServiceGroup::LegacyOrder, "GSValidateOrderParameters", body)
            .await?;
        Ok(reply.into_outcome(response::parse_validation))
    }

    async fn get_approver_list(&self, fqdn: &str) -> Result<OperationOutcome<ApproverList>> {
        let body = request::approver_list_request(self.query_header(), fqdn)?;
        let reply = self
            .call(ServiceGroup::Query, "GetDVApproverList", body)
            .await?;
        Ok(reply.into_outcome(response::parse_approver_list))
    }

    async fn place_order(
        &self,
        order: &PlaceOrderRequest,
    ) -> Result<OperationOutcome<OrderPlacement>> {
        let (group, operation) = request::place_order_target(order);
        let body = request::place_order_request(self.order_header(), order)?;
        log::info!(
            "[globalsign] Placing {} via {operation} for {}",
            order.order.product,
            order.order.fqdn
        );
        let reply = self.call(group, operation, body).await?;
        Ok(reply.into_outcome(response::parse_placement))
    }

    async fn resend_approver_email(
        &self,
        order_id: &str,
        email_type: ResendEmailType,
    ) -> Result<OperationOutcome<()>> {
        let body = request::resend_email_request(self.order_header(), order_id, email_type)?;
        let reply = self
            .call(ServiceGroup::LegacyOrder, "ResendEmail", body)
            .await?;
        Ok(reply.into_outcome(|_| ()))
    }

    async fn change_approver_email(
        &self,
        order_id: &str,
        approver_email: &str,
        fqdn: &str,
    ) -> Result<OperationOutcome<()>> {
        let body = request::change_approver_email_request(
            self.order_header(),
            order_id,
            approver_email,
            fqdn,
        )?;
        let reply = self
            .call(ServiceGroup::Functions, "ChangeApproverEmail", body)
            .await?;
        Ok(reply.into_outcome(|_| ()))
    }

    async fn reissue_certificate(
        &self,
        order_id: &str,
        csr: &str,
        hash_algorithm: HashAlgorithm,
    ) -> Result<OperationOutcome<ReissueResult>> {
        log::info!(
            "[globalsign] Reissuing {order_id} with {} ({})",
            pem_fingerprint(csr),
            hash_algorithm.as_str()
        );
        let body = request::reissue_request(self.order_header(), order_id, csr, hash_algorithm)?;
        let reply = self
            .call(ServiceGroup::ModernOrder, "ReIssue", body)
            .await?;
        Ok(reply.into_outcome(response::parse_reissue))
    }

    async fn get_order_by_id(&self, order_id: &str) -> Result<OperationOutcome<OrderDetail>> {
        let body = request::order_by_id_request(self.query_header(), order_id)?;
        let reply = self
            .call(ServiceGroup::Query, "GetOrderByOrderID", body)
            .await?;
        Ok(reply.into_outcome(response::parse_order))
    }

    async fn get_orders_by_date_range(
        &self,
        range: &DateRange,
    ) -> Result<OperationOutcome<Vec<OrderDetail>>> {
        let body = request::date_range_request(self.query_header(), range)?;
        let reply = self
            .call(ServiceGroup::Query, "GetOrderByDataRange", body)
            .await?;
        Ok(reply.into_outcome(response::parse_order_list))
    }

    async fn list_orders(&self) -> Result<OperationOutcome<Vec<OrderDetail>>> {
        let body = request::list_orders_request(self.query_header());
        let reply = self
            .call(ServiceGroup::Query, "GetCertificateOrders", body)
            .await?;
        Ok(reply.into_outcome(response::parse_order_list))
    }
}
