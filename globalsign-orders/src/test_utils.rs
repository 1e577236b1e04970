//! Test helpers
//!
//! Scripted API mock, recording delivery implementations and fixture factories.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use globalsign_api::{
    ApiError, Approver, ApproverList, BusinessCategory, CertificateApi, ContactInfo, DateRange,
    Exchange, ExtendedValidationInfo, HashAlgorithm, OperationOutcome, OrderDetail,
    OrderPlacement, OrderRequest, OrganizationAddress, OrganizationInfo, PlaceOrderRequest,
    ReissueResult, ResendEmailType, ResponseHeader, ValidationResult, VendorError,
};
use tokio::sync::RwLock;

use crate::error::OrderResult;
use crate::services::ServiceContext;
use crate::traits::{CustomerAcknowledger, OperatorNotifier};
use crate::types::{Acknowledgement, Notification, OrderSubject};

pub const TEST_CSR: &str =
    "-----BEGIN CERTIFICATE REQUEST-----\nMIIBTEST\n-----END CERTIFICATE REQUEST-----";

type Scripted<T> = RwLock<VecDeque<Result<OperationOutcome<T>, ApiError>>>;

/// Builds an outcome as the client would return it.
pub fn outcome<T>(
    operation: &str,
    success_code: i32,
    errors: Vec<VendorError>,
    data: T,
) -> OperationOutcome<T> {
    OperationOutcome {
        header: ResponseHeader {
            success_code,
            errors,
            timestamp: None,
        },
        data,
        exchange: Exchange {
            operation: operation.to_string(),
            request: serde_json::json!({ "operation": operation }),
            response: serde_json::json!({ "SuccessCode": success_code }),
        },
    }
}

pub fn vendor_error(message: &str) -> VendorError {
    VendorError {
        code: Some("-1".to_string()),
        field: None,
        message: message.to_string(),
    }
}

// ===== MockCertificateApi =====

/// Every call the mock received, in order.
#[derive(Debug, Clone)]
pub enum ApiCall {
    Validate(OrderRequest),
    ApproverList(String),
    PlaceOrder(Box<PlaceOrderRequest>),
    ResendEmail(String, ResendEmailType),
    ChangeApproverEmail {
        order_id: String,
        approver_email: String,
        fqdn: String,
    },
    Reissue {
        order_id: String,
        hash_algorithm: HashAlgorithm,
    },
    GetOrder(String),
    OrdersByDateRange(DateRange),
    ListOrders,
}

/// Returns scripted results in order, then a successful default for each operation.
pub struct MockCertificateApi {
    calls: RwLock<Vec<ApiCall>>,
    validation: Scripted<ValidationResult>,
    approvers: Scripted<ApproverList>,
    placement: Scripted<OrderPlacement>,
    maintenance: Scripted<()>,
    reissue: Scripted<ReissueResult>,
    order: Scripted<OrderDetail>,
    orders: Scripted<Vec<OrderDetail>>,
}

impl MockCertificateApi {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            validation: RwLock::new(VecDeque::new()),
            approvers: RwLock::new(VecDeque::new()),
            placement: RwLock::new(VecDeque::new()),
            maintenance: RwLock::new(VecDeque::new()),
            reissue: RwLock::new(VecDeque::new()),
            order: RwLock::new(VecDeque::new()),
            orders: RwLock::new(VecDeque::new()),
        }
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    pub async fn placed_orders(&self) -> Vec<PlaceOrderRequest> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                ApiCall::PlaceOrder(request) => Some(request.as_ref().clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn script_validation(
        &self,
        result: Result<OperationOutcome<ValidationResult>, ApiError>,
    ) {
        self.validation.write().await.push_back(result);
    }

    pub async fn script_approvers(&self, result: Result<OperationOutcome<ApproverList>, ApiError>) {
        self.approvers.write().await.push_back(result);
    }

    pub async fn script_placement(
        &self,
        result: Result<OperationOutcome<OrderPlacement>, ApiError>,
    ) {
        self.placement.write().await.push_back(result);
    }

    /// Scripts `ResendEmail` and `ChangeApproverEmail`.
    pub async fn script_maintenance(&self, result: Result<OperationOutcome<()>, ApiError>) {
        self.maintenance.write().await.push_back(result);
    }

    pub async fn script_order(&self, result: Result<OperationOutcome<OrderDetail>, ApiError>) {
        self.order.write().await.push_back(result);
    }

    async fn record(&self, call: ApiCall) {
        self.calls.write().await.push(call);
    }

    async fn next<T>(
        script: &Scripted<T>,
        default: impl FnOnce() -> OperationOutcome<T>,
    ) -> Result<OperationOutcome<T>, ApiError> {
        script.write().await.pop_front().unwrap_or_else(|| Ok(default()))
    }
}

#[async_trait]
impl CertificateApi for MockCertificateApi {
    async fn validate_order_parameters(
        &self,
        order: &OrderRequest,
    ) -> Result<OperationOutcome<ValidationResult>, ApiError> {
        self.record(ApiCall::Validate(order.clone())).await;
        Self::next(&self.validation, || {
            outcome(
                "GSValidateOrderParameters",
                0,
                vec![],
                ValidationResult {
                    order_id: Some("CE-VALIDATED".to_string()),
                    parsed_csr: None,
                },
            )
        })
        .await
    }

    async fn get_approver_list(
        &self,
        fqdn: &str,
    ) -> Result<OperationOutcome<ApproverList>, ApiError> {
        self.record(ApiCall::ApproverList(fqdn.to_string())).await;
        let approvers = ["admin", "hostmaster"]
            .into_iter()
            .map(|mailbox| Approver {
                approver_type: Some("Domain".to_string()),
                email: format!("{mailbox}@{fqdn}"),
            })
            .collect();
        Self::next(&self.approvers, || {
            outcome(
                "GetDVApproverList",
                0,
                vec![],
                ApproverList {
                    order_id: Some("CE-APPROVER".to_string()),
                    approvers,
                },
            )
        })
        .await
    }

    async fn place_order(
        &self,
        order: &PlaceOrderRequest,
    ) -> Result<OperationOutcome<OrderPlacement>, ApiError> {
        self.record(ApiCall::PlaceOrder(Box::new(order.clone()))).await;
        let operation = order.order.product.order_operation();
        Self::next(&self.placement, || {
            outcome(
                operation,
                0,
                vec![],
                OrderPlacement {
                    order_id: Some("CE-PLACED".to_string()),
                },
            )
        })
        .await
    }

    async fn resend_approver_email(
        &self,
        order_id: &str,
        email_type: ResendEmailType,
    ) -> Result<OperationOutcome<()>, ApiError> {
        self.record(ApiCall::ResendEmail(order_id.to_string(), email_type))
            .await;
        Self::next(&self.maintenance, || outcome("ResendEmail", 0, vec![], ())).await
    }

    async fn change_approver_email(
        &self,
        order_id: &str,
        approver_email: &str,
        fqdn: &str,
    ) -> Result<OperationOutcome<()>, ApiError> {
        self.record(ApiCall::ChangeApproverEmail {
            order_id: order_id.to_string(),
            approver_email: approver_email.to_string(),
            fqdn: fqdn.to_string(),
        })
        .await;
        Self::next(&self.maintenance, || {
            outcome("ChangeApproverEmail", 0, vec![], ())
        })
        .await
    }

    async fn reissue_certificate(
        &self,
        order_id: &str,
        _csr: &str,
        hash_algorithm: HashAlgorithm,
    ) -> Result<OperationOutcome<ReissueResult>, ApiError> {
        self.record(ApiCall::Reissue {
            order_id: order_id.to_string(),
            hash_algorithm,
        })
        .await;
        Self::next(&self.reissue, || {
            outcome(
                "ReIssue",
                0,
                vec![],
                ReissueResult {
                    order_id: Some("CE-REISSUED".to_string()),
                    target_order_id: Some(order_id.to_string()),
                },
            )
        })
        .await
    }

    async fn get_order_by_id(
        &self,
        order_id: &str,
    ) -> Result<OperationOutcome<OrderDetail>, ApiError> {
        self.record(ApiCall::GetOrder(order_id.to_string())).await;
        Self::next(&self.order, || {
            outcome(
                "GetOrderByOrderID",
                0,
                vec![],
                OrderDetail {
                    order_id: Some(order_id.to_string()),
                    order_status: Some("4".to_string()),
                    ..OrderDetail::default()
                },
            )
        })
        .await
    }

    async fn get_orders_by_date_range(
        &self,
        range: &DateRange,
    ) -> Result<OperationOutcome<Vec<OrderDetail>>, ApiError> {
        self.record(ApiCall::OrdersByDateRange(*range)).await;
        Self::next(&self.orders, || {
            outcome("GetOrderByDataRange", 0, vec![], test_order_list())
        })
        .await
    }

    async fn list_orders(&self) -> Result<OperationOutcome<Vec<OrderDetail>>, ApiError> {
        self.record(ApiCall::ListOrders).await;
        Self::next(&self.orders, || {
            outcome("GetCertificateOrders", 0, vec![], test_order_list())
        })
        .await
    }
}

fn test_order_list() -> Vec<OrderDetail> {
    ["CE-A", "CE-B"]
        .into_iter()
        .map(|id| OrderDetail {
            order_id: Some(id.to_string()),
            ..OrderDetail::default()
        })
        .collect()
}

// ===== RecordingNotifier =====

pub struct RecordingNotifier {
    sent: RwLock<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
        }
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl OperatorNotifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> OrderResult<()> {
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}

// ===== RecordingAcknowledger =====

pub struct RecordingAcknowledger {
    sent: RwLock<Vec<Acknowledgement>>,
}

impl RecordingAcknowledger {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
        }
    }

    pub async fn sent(&self) -> Vec<Acknowledgement> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl CustomerAcknowledger for RecordingAcknowledger {
    async fn acknowledge(&self, acknowledgement: &Acknowledgement) -> OrderResult<()> {
        self.sent.write().await.push(acknowledgement.clone());
        Ok(())
    }
}

// ===== Fixtures =====

pub fn test_subject() -> OrderSubject {
    let contact = ContactInfo {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone: "+1 555 0100".to_string(),
        email: "jane@example.com".to_string(),
    };
    OrderSubject::new("example.com", contact).with_csr(TEST_CSR)
}

pub fn test_organization() -> OrganizationInfo {
    OrganizationInfo {
        name: "Example Inc".to_string(),
        address: OrganizationAddress {
            address_line1: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
            phone: "+1 555 0100".to_string(),
        },
    }
}

pub fn test_ev_info() -> ExtendedValidationInfo {
    ExtendedValidationInfo {
        business_category: BusinessCategory::PrivateOrganization,
        incorporating_agency_registration_number: "12345".to_string(),
    }
}

/// Context wired to a fresh mock API and recording delivery.
pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockCertificateApi>,
    Arc<RecordingNotifier>,
    Arc<RecordingAcknowledger>,
) {
    let api = Arc::new(MockCertificateApi::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let acknowledger = Arc::new(RecordingAcknowledger::new());
    let ctx = Arc::new(ServiceContext::new(
        api.clone(),
        notifier.clone(),
        acknowledger.clone(),
    ));
    (ctx, api, notifier, acknowledger)
}
