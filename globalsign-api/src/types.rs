use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result, VendorError};

/// Validity period every order is placed with, in months.
pub const VALIDITY_MONTHS: u32 = 12;

/// Number of licenses every order is placed with.
pub const LICENSES: u32 = 1;

/// Country used in generated CSR and organization blocks when the caller gives none.
pub const DEFAULT_COUNTRY: &str = "US";

// ============ Credentials ============

/// GlobalSign API account credentials, sent in every request's `AuthToken`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// API user name.
    pub username: String,
    /// API password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"******")
            .finish()
    }
}

// ============ Products ============

/// Identity-proofing level of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductFamily {
    /// Domain validation.
    Dv,
    /// Organization validation.
    Ov,
    /// Extended validation.
    Ev,
}

/// GlobalSign product SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCode {
    /// AlphaSSL (`DV_LOW_SHA2`).
    AlphaSsl,
    /// DomainSSL (`DV_SHA2`).
    DomainSsl,
    /// DomainSSL with a vendor-generated key pair (`DV_SKIP_SHA2`).
    DomainSslAutoCsr,
    /// OrganizationSSL (`OV_SHA2`).
    OrganizationSsl,
    /// OrganizationSSL with a vendor-generated key pair (`OV_SKIP_SHA2`).
    OrganizationSslAutoCsr,
    /// ExtendedSSL (`EV_SHA2`).
    ExtendedSsl,
}

impl ProductCode {
    /// The SKU string sent as `ProductCode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlphaSsl => "DV_LOW_SHA2",
            Self::DomainSsl => "DV_SHA2",
            Self::DomainSslAutoCsr => "DV_SKIP_SHA2",
            Self::OrganizationSsl => "OV_SHA2",
            Self::OrganizationSslAutoCsr => "OV_SKIP_SHA2",
            Self::ExtendedSsl => "EV_SHA2",
        }
    }

    /// Parses a SKU string as returned by the query service.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DV_LOW_SHA2" => Some(Self::AlphaSsl),
            "DV_SHA2" => Some(Self::DomainSsl),
            "DV_SKIP_SHA2" => Some(Self::DomainSslAutoCsr),
            "OV_SHA2" => Some(Self::OrganizationSsl),
            "OV_SKIP_SHA2" => Some(Self::OrganizationSslAutoCsr),
            "EV_SHA2" => Some(Self::ExtendedSsl),
            _ => None,
        }
    }

    /// Validation level of this product.
    pub fn family(self) -> ProductFamily {
        match self {
            Self::AlphaSsl | Self::DomainSsl | Self::DomainSslAutoCsr => ProductFamily::Dv,
            Self::OrganizationSsl | Self::OrganizationSslAutoCsr => ProductFamily::Ov,
            Self::ExtendedSsl => ProductFamily::Ev,
        }
    }

    /// Vendor operation that places an order for this product.
    pub fn order_operation(self) -> &'static str {
        match self {
            Self::AlphaSsl | Self::DomainSsl => "GSDVOrder",
            Self::DomainSslAutoCsr => "GSDVOrderWithoutCSR",
            Self::OrganizationSsl => "GSOVOrder",
            Self::OrganizationSslAutoCsr => "GSOVOrderWithoutCSR",
            Self::ExtendedSsl => "GSEVOrder",
        }
    }

    /// Whether GlobalSign generates the key pair and CSR for this product.
    pub fn vendor_generates_csr(self) -> bool {
        matches!(self, Self::DomainSslAutoCsr | Self::OrganizationSslAutoCsr)
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an order is new or renews an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OrderKind {
    /// A fresh order (`new`).
    New,
    /// A renewal (`renewal`) of `target_order_id`.
    #[serde(rename_all = "camelCase")]
    Renewal {
        /// Order being renewed, sent as `RenewalTargetOrderID`.
        target_order_id: String,
    },
}

impl OrderKind {
    /// The `OrderKind` string sent to the vendor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Renewal { .. } => "renewal",
        }
    }

    /// Order being renewed, if any.
    pub fn renewal_target(&self) -> Option<&str> {
        match self {
            Self::New => None,
            Self::Renewal { target_order_id } => Some(target_order_id),
        }
    }
}

/// Product, kind and subject of a certificate order.
///
/// When `csr` is `None` the FQDN is sent instead (validation of auto-CSR orders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Product being ordered.
    pub product: ProductCode,
    /// New order or renewal.
    pub kind: OrderKind,
    /// Fully qualified domain name of the certificate subject.
    pub fqdn: String,
    /// PEM-encoded certificate signing request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csr: Option<String>,
    /// Request a wildcard certificate (`BaseOption = wildcard`).
    #[serde(default)]
    pub wildcard: bool,
}

impl OrderRequest {
    /// Non-empty CSR, if one was supplied.
    pub fn csr(&self) -> Option<&str> {
        self.csr.as_deref().filter(|csr| !csr.trim().is_empty())
    }
}

// ============ Subject identity ============

/// Person the vendor contacts about the order (`ContactInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Postal address of the organization (`OrganizationAddress`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAddress {
    pub address_line1: String,
    pub city: String,
    /// State or province.
    pub region: String,
    pub postal_code: String,
    /// ISO 3166 two-letter country code.
    pub country: String,
    pub phone: String,
}

/// Organization named in OV and EV certificates (`OrganizationInfo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInfo {
    pub name: String,
    pub address: OrganizationAddress,
}

/// EV business category (`BusinessCategoryCode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessCategory {
    /// `PO`
    PrivateOrganization,
    /// `GE`
    GovernmentEntity,
    /// `BE`
    BusinessEntity,
}

impl BusinessCategory {
    /// Code sent as `BusinessCategoryCode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrivateOrganization => "PO",
            Self::GovernmentEntity => "GE",
            Self::BusinessEntity => "BE",
        }
    }
}

/// Additional identity data required by ExtendedSSL orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValidationInfo {
    pub business_category: BusinessCategory,
    /// `IncorporatingAgencyRegistrationNumber` of the jurisdiction block.
    pub incorporating_agency_registration_number: String,
}

/// One `SANEntry` of an auto-CSR order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanEntry {
    /// `SANOptionType` as defined by GlobalSign (e.g. `1` for a `www`/mail host, `3` for a
    /// subdomain).
    pub option_type: u8,
    pub subject_alt_name: String,
}

/// Everything the order-placement operations need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub order: OrderRequest,
    /// Order ID reserved by `GetDVApproverList` or `GSValidateOrderParameters`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Approver mailbox for domain validation (DV only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_email: Option<String>,
    pub contact: ContactInfo,
    /// Required for OV and EV products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationInfo>,
    /// Required for EV products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_validation: Option<ExtendedValidationInfo>,
    /// Extra names for auto-CSR orders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub san_entries: Vec<SanEntry>,
}

/// Signature hash algorithm requested on reissue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Value sent as `HashAlgorithm`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }
}

/// Which mail `ResendEmail` sends again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResendEmailType {
    /// The domain-control approval request.
    #[default]
    ApproverEmail,
    /// The issued certificate.
    Fulfillment,
}

impl ResendEmailType {
    /// Value sent as `ResendEmailType`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApproverEmail => "APPROVEREMAIL",
            Self::Fulfillment => "FULFILLMENT",
        }
    }
}

/// Inclusive order-date window for `GetOrderByDataRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

// ============ Responses ============

/// `OrderResponseHeader` / `QueryResponseHeader` of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    /// `0` on success; anything else is a failure.
    pub success_code: i32,
    pub errors: Vec<VendorError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ResponseHeader {
    /// An order is only complete when the success code is exactly zero.
    pub fn is_success(&self) -> bool {
        self.success_code == 0
    }
}

/// Request and response of one call, for diagnostics. Passwords are masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    /// Vendor operation name, e.g. `GetDVApproverList`.
    pub operation: String,
    /// The `<Request>` element as JSON.
    pub request: serde_json::Value,
    /// The `<Response>` element as JSON.
    pub response: serde_json::Value,
}

/// A parsed vendor response, successful or not.
///
/// Transport failures never produce an outcome; they are returned as [`ApiError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome<T> {
    pub header: ResponseHeader,
    /// Typed payload. Fields are optional because failed responses carry little data.
    pub data: T,
    pub exchange: Exchange,
}

impl<T> OperationOutcome<T> {
    /// Whether the vendor accepted the request.
    pub fn is_success(&self) -> bool {
        self.header.is_success()
    }

    /// Converts a non-zero success code into [`ApiError::Rejected`].
    pub fn into_result(self) -> Result<T> {
        if self.header.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                operation: self.exchange.operation,
                success_code: self.header.success_code,
                errors: self.header.errors,
            })
        }
    }
}

/// Subject fields GlobalSign decoded from the submitted CSR (`ParsedCSR`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCsr {
    pub domain_name: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
    pub locality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
}

/// Payload of `GSValidateOrderParameters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub order_id: Option<String>,
    pub parsed_csr: Option<ParsedCsr>,
}

/// One candidate approver mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approver {
    /// `ApproverType`, e.g. `Domain` or `Manual`.
    pub approver_type: Option<String>,
    pub email: String,
}

/// Payload of `GetDVApproverList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproverList {
    /// Order ID reserved for the DV order that follows.
    pub order_id: Option<String>,
    pub approvers: Vec<Approver>,
}

impl ApproverList {
    /// First approver in vendor order.
    pub fn first_email(&self) -> Option<&str> {
        self.approvers.first().map(|a| a.email.as_str())
    }
}

/// Payload of the order-placement operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacement {
    pub order_id: Option<String>,
}

/// Payload of `ReIssue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReissueResult {
    /// Order ID of the reissued certificate.
    pub order_id: Option<String>,
    pub target_order_id: Option<String>,
}

/// `CertificateInfo` block of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    pub status: Option<String>,
    pub common_name: Option<String>,
    pub subject_name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// One CA certificate of the issued chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaCertificate {
    /// `CACertType`, `ROOT` or `INTER`.
    pub cert_type: Option<String>,
    /// PEM certificate.
    pub certificate: String,
}

/// Issued certificate material (`Fulfillment`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    /// PEM server certificate (`ServerCertificate/X509Cert`).
    pub server_certificate: Option<String>,
    /// PKCS#7 bundle (`ServerCertificate/PKCS7Cert`).
    pub pkcs7: Option<String>,
    pub ca_certificates: Vec<CaCertificate>,
}

/// One order as returned by the query service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: Option<String>,
    /// Raw `ProductCode`; see [`ProductCode::from_code`].
    pub product_code: Option<String>,
    pub order_kind: Option<String>,
    /// Numeric `OrderStatus` as text.
    pub order_status: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub fqdn: Option<String>,
    pub certificate: Option<CertificateInfo>,
    pub fulfillment: Option<Fulfillment>,
}
