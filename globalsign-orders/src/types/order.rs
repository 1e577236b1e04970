//! Order input and result types

use globalsign_api::{
    ContactInfo, ExtendedValidationInfo, OrderKind, OrderRequest, OrganizationInfo,
    PlaceOrderRequest, ProductCode, ProductFamily, SanEntry,
};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::types::DiagnosticTrace;

/// Subject fields shared by every order entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubject {
    pub fqdn: String,
    /// PEM CSR; ignored by auto-CSR products.
    pub csr: Option<String>,
    pub contact: ContactInfo,
    /// DV approver mailbox. `None` or empty selects the first approver GlobalSign lists.
    pub approver_email: Option<String>,
    #[serde(default)]
    pub wildcard: bool,
}

impl OrderSubject {
    pub fn new(fqdn: impl Into<String>, contact: ContactInfo) -> Self {
        Self {
            fqdn: fqdn.into(),
            contact,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_csr(mut self, csr: impl Into<String>) -> Self {
        self.csr = Some(csr.into());
        self
    }

    #[must_use]
    pub fn with_approver_email(mut self, email: impl Into<String>) -> Self {
        self.approver_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn wildcard(mut self, wildcard: bool) -> Self {
        self.wildcard = wildcard;
        self
    }
}

/// A complete certificate order as accepted by the order workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOrder {
    pub product: ProductCode,
    pub kind: OrderKind,
    pub subject: OrderSubject,
    pub organization: Option<OrganizationInfo>,
    pub extended_validation: Option<ExtendedValidationInfo>,
    #[serde(default)]
    pub san_entries: Vec<SanEntry>,
}

impl CertificateOrder {
    pub fn new(product: ProductCode, subject: OrderSubject) -> Self {
        Self {
            product,
            kind: OrderKind::New,
            subject,
            organization: None,
            extended_validation: None,
            san_entries: Vec::new(),
        }
    }

    /// Turns this order into a renewal of `target_order_id`.
    #[must_use]
    pub fn renewing(mut self, target_order_id: impl Into<String>) -> Self {
        self.kind = OrderKind::Renewal {
            target_order_id: target_order_id.into(),
        };
        self
    }

    #[must_use]
    pub fn with_organization(mut self, organization: OrganizationInfo) -> Self {
        self.organization = Some(organization);
        self
    }

    #[must_use]
    pub fn with_extended_validation(mut self, info: ExtendedValidationInfo) -> Self {
        self.extended_validation = Some(info);
        self
    }

    #[must_use]
    pub fn with_san_entries(mut self, entries: Vec<SanEntry>) -> Self {
        self.san_entries = entries;
        self
    }

    pub fn fqdn(&self) -> &str {
        &self.subject.fqdn
    }

    /// Caller-supplied approver, if non-empty.
    pub fn approver_email(&self) -> Option<&str> {
        self.subject
            .approver_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Rejects orders that cannot be expressed before anything is sent.
    pub fn check(&self) -> OrderResult<()> {
        if self.subject.fqdn.trim().is_empty() {
            return Err(OrderError::InvalidOrder("FQDN is required".to_string()));
        }
        if let OrderKind::Renewal { target_order_id } = &self.kind
            && target_order_id.trim().is_empty()
        {
            return Err(OrderError::InvalidOrder(
                "renewal requires the order ID being renewed".to_string(),
            ));
        }
        if !self.product.vendor_generates_csr() && self.csr().is_none() {
            return Err(OrderError::InvalidOrder(format!(
                "{} orders require a CSR",
                self.product
            )));
        }
        let family = self.product.family();
        if family != ProductFamily::Dv && self.organization.is_none() {
            return Err(OrderError::InvalidOrder(format!(
                "{} orders require organization details",
                self.product
            )));
        }
        if family == ProductFamily::Ev && self.extended_validation.is_none() {
            return Err(OrderError::InvalidOrder(
                "EV orders require extended validation details".to_string(),
            ));
        }
        Ok(())
    }

    fn csr(&self) -> Option<&str> {
        if self.product.vendor_generates_csr() {
            return None;
        }
        self.subject
            .csr
            .as_deref()
            .filter(|csr| !csr.trim().is_empty())
    }

    /// Request for the validation step: the CSR when one is used, the FQDN otherwise.
    pub fn order_request(&self) -> OrderRequest {
        OrderRequest {
            product: self.product,
            kind: self.kind.clone(),
            fqdn: self.subject.fqdn.clone(),
            csr: self.csr().map(str::to_string),
            wildcard: self.subject.wildcard,
        }
    }

    /// Request for the order step.
    pub fn place_order_request(
        &self,
        order_id: Option<String>,
        approver_email: Option<String>,
    ) -> PlaceOrderRequest {
        PlaceOrderRequest {
            order: self.order_request(),
            order_id,
            approver_email,
            contact: self.subject.contact.clone(),
            organization: self.organization.clone(),
            extended_validation: self.extended_validation.clone(),
            san_entries: self.san_entries.clone(),
        }
    }
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    pub order_id: String,
    pub finished: bool,
    pub trace: DiagnosticTrace,
}
