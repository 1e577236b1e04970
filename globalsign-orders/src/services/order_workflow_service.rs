//! Certificate order workflows
//!
//! Every entry point builds a [`CertificateOrder`] and runs it through
//! [`OrderWorkflowService::place`]. The first failing step ends the workflow with one
//! operator notification; success sends one customer acknowledgement.

use std::sync::Arc;

use globalsign_api::{
    ApiError, ExtendedValidationInfo, OrganizationInfo, ProductCode, ProductFamily,
    VendorError, is_balance_error,
};

use crate::error::{OrderError, OrderResult, WorkflowFailure};
use crate::services::ServiceContext;
use crate::types::{
    Acknowledgement, CertificateOrder, CompletedOrder, DiagnosticTrace, Notification,
    OrderSubject, WorkflowStep,
};

const VALIDATE_OPERATION: &str = "GSValidateOrderParameters";
const APPROVER_LIST_OPERATION: &str = "GetDVApproverList";

/// Certificate order workflow service
pub struct OrderWorkflowService {
    ctx: Arc<ServiceContext>,
}

impl OrderWorkflowService {
    /// Creates the workflow service
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// New AlphaSSL order.
    pub async fn create_alphassl(
        &self,
        subject: OrderSubject,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(CertificateOrder::new(ProductCode::AlphaSsl, subject))
            .await
    }

    /// New DomainSSL order.
    pub async fn create_domainssl(
        &self,
        subject: OrderSubject,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(CertificateOrder::new(ProductCode::DomainSsl, subject))
            .await
    }

    /// New DomainSSL order with a key pair generated by GlobalSign.
    pub async fn create_domainssl_autocsr(
        &self,
        subject: OrderSubject,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(CertificateOrder::new(ProductCode::DomainSslAutoCsr, subject))
            .await
    }

    /// New OrganizationSSL order.
    pub async fn create_organizationssl(
        &self,
        subject: OrderSubject,
        organization: OrganizationInfo,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(
            CertificateOrder::new(ProductCode::OrganizationSsl, subject)
                .with_organization(organization),
        )
        .await
    }

    /// New OrganizationSSL order with a key pair generated by GlobalSign.
    pub async fn create_organizationssl_autocsr(
        &self,
        subject: OrderSubject,
        organization: OrganizationInfo,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(
            CertificateOrder::new(ProductCode::OrganizationSslAutoCsr, subject)
                .with_organization(organization),
        )
        .await
    }

    /// New ExtendedSSL order.
    pub async fn create_extendedssl(
        &self,
        subject: OrderSubject,
        organization: OrganizationInfo,
        extended_validation: ExtendedValidationInfo,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(
            CertificateOrder::new(ProductCode::ExtendedSsl, subject)
                .with_organization(organization)
                .with_extended_validation(extended_validation),
        )
        .await
    }

    /// Renews an AlphaSSL or DomainSSL order.
    pub async fn renew_alpha_domain(
        &self,
        product: ProductCode,
        subject: OrderSubject,
        old_order_id: &str,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        let order = CertificateOrder::new(product, subject).renewing(old_order_id);
        if !matches!(product, ProductCode::AlphaSsl | ProductCode::DomainSsl) {
            let error = OrderError::InvalidOrder(format!(
                "{product} cannot be renewed as AlphaSSL or DomainSSL"
            ));
            let trace = DiagnosticTrace::new(product, order.fqdn());
            return Err(self.fail(&order, error, trace).await);
        }
        self.place(order).await
    }

    /// Renews an OrganizationSSL order.
    pub async fn renew_organizationssl(
        &self,
        subject: OrderSubject,
        organization: OrganizationInfo,
        old_order_id: &str,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(
            CertificateOrder::new(ProductCode::OrganizationSsl, subject)
                .with_organization(organization)
                .renewing(old_order_id),
        )
        .await
    }

    /// Renews an ExtendedSSL order.
    pub async fn renew_extendedssl(
        &self,
        subject: OrderSubject,
        organization: OrganizationInfo,
        extended_validation: ExtendedValidationInfo,
        old_order_id: &str,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        self.place(
            CertificateOrder::new(ProductCode::ExtendedSsl, subject)
                .with_organization(organization)
                .with_extended_validation(extended_validation)
                .renewing(old_order_id),
        )
        .await
    }

    /// Runs the order pipeline.
    pub async fn place(
        &self,
        order: CertificateOrder,
    ) -> Result<CompletedOrder, WorkflowFailure> {
        let mut trace = DiagnosticTrace::new(order.product, order.fqdn());
        log::info!(
            "[workflow {}] {} {} order for {}",
            trace.trace_id,
            order.product,
            order.kind.as_str(),
            order.fqdn()
        );

        match self.run(&order, &mut trace).await {
            Ok(order_id) => {
                trace.finish(&order_id);
                log::info!(
                    "[workflow {}] Order {order_id} placed for {}",
                    trace.trace_id,
                    order.fqdn()
                );
                self.ctx
                    .acknowledge_customer(&Acknowledgement::new(&order_id, order.fqdn()))
                    .await;
                Ok(CompletedOrder {
                    order_id,
                    finished: true,
                    trace,
                })
            }
            Err(error) => Err(self.fail(&order, error, trace).await),
        }
    }

    async fn fail(
        &self,
        order: &CertificateOrder,
        error: OrderError,
        trace: DiagnosticTrace,
    ) -> WorkflowFailure {
        ServiceContext::log_error(
            &format!("[workflow {}] Order failed", trace.trace_id),
            &error,
        );
        let notification =
            Notification::new(error.notification_category(), order.fqdn(), &trace);
        self.ctx.notify_operator(&notification).await;
        WorkflowFailure { error, trace }
    }

    async fn run(
        &self,
        order: &CertificateOrder,
        trace: &mut DiagnosticTrace,
    ) -> OrderResult<String> {
        order.check()?;
        let fqdn = order.fqdn();

        // Validation
        let validation = self
            .ctx
            .api
            .validate_order_parameters(&order.order_request())
            .await
            .map_err(|e| step_failure(trace, WorkflowStep::Validation, VALIDATE_OPERATION, e))?;
        trace.record_outcome(WorkflowStep::Validation, &validation);
        if !validation.is_success() {
            return Err(OrderError::ValidationRejected {
                fqdn: fqdn.to_string(),
                success_code: validation.header.success_code,
                errors: validation.header.errors,
            });
        }

        // Approver resolution
        let (order_id, approver_email) = match order.product.family() {
            ProductFamily::Dv => {
                let (order_id, email) = self.resolve_approver(order, trace).await?;
                (Some(order_id), Some(email))
            }
            ProductFamily::Ov => (
                validation.data.order_id,
                order.approver_email().map(str::to_string),
            ),
            ProductFamily::Ev => (None, None),
        };

        // Order
        let operation = order.product.order_operation();
        let request = order.place_order_request(order_id.clone(), approver_email);
        let placement = self
            .ctx
            .api
            .place_order(&request)
            .await
            .map_err(|e| step_failure(trace, WorkflowStep::PlaceOrder, operation, e))?;
        trace.record_outcome(WorkflowStep::PlaceOrder, &placement);

        if !placement.is_success() {
            let errors = placement.header.errors;
            return Err(if is_balance_error(&errors) {
                OrderError::BalanceRejected {
                    fqdn: fqdn.to_string(),
                    operation: operation.to_string(),
                    errors,
                }
            } else {
                OrderError::OrderRejected {
                    fqdn: fqdn.to_string(),
                    operation: operation.to_string(),
                    success_code: placement.header.success_code,
                    errors,
                }
            });
        }

        placement.data.order_id.or(order_id).ok_or_else(|| {
            OrderError::OrderRejected {
                fqdn: fqdn.to_string(),
                operation: operation.to_string(),
                success_code: placement.header.success_code,
                errors: Vec::new(),
            }
        })
    }

    /// Fetches the DV approver list and picks the order ID and approver mailbox.
    async fn resolve_approver(
        &self,
        order: &CertificateOrder,
        trace: &mut DiagnosticTrace,
    ) -> OrderResult<(String, String)> {
        let fqdn = order.fqdn();
        let outcome = self
            .ctx
            .api
            .get_approver_list(fqdn)
            .await
            .map_err(|e| {
                step_failure(trace, WorkflowStep::ApproverList, APPROVER_LIST_OPERATION, e)
            })?;
        trace.record_outcome(WorkflowStep::ApproverList, &outcome);

        let failed = |reason: String, errors: Vec<VendorError>| {
            OrderError::ApproverResolutionFailed {
                fqdn: fqdn.to_string(),
                reason,
                errors,
            }
        };

        if !outcome.is_success() {
            return Err(failed(
                format!(
                    "{APPROVER_LIST_OPERATION} returned success code {}",
                    outcome.header.success_code
                ),
                outcome.header.errors,
            ));
        }

        let list = outcome.data;
        let Some(order_id) = list.order_id.clone() else {
            return Err(failed("no order ID was reserved".to_string(), Vec::new()));
        };
        let Some(email) = order
            .approver_email()
            .or_else(|| list.first_email())
            .map(str::to_string)
        else {
            return Err(failed("no approver e-mail is available".to_string(), Vec::new()));
        };

        log::info!("Approver for {fqdn}: {email} (order {order_id})");
        Ok((order_id, email))
    }
}

/// Records a call that returned no parsed response and classifies the error.
fn step_failure(
    trace: &mut DiagnosticTrace,
    step: WorkflowStep,
    operation: &str,
    error: ApiError,
) -> OrderError {
    match error {
        ApiError::InvalidParameter { param, detail } => {
            OrderError::InvalidOrder(format!("{param}: {detail}"))
        }
        source => {
            trace.record_failure(step, operation, &source);
            OrderError::TransportFault { step, source }
        }
    }
}
