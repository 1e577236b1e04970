//! Request document builders
//!
//! One builder per request shape. Order documents are keyed by product family and CSR
//! mode; the auth header is passed in so the builders stay pure.

use crate::config::ServiceGroup;
use crate::error::{ApiError, Result};
use crate::types::{
    ContactInfo, DEFAULT_COUNTRY, DateRange, ExtendedValidationInfo, HashAlgorithm, LICENSES,
    OrderRequest, OrganizationAddress, OrganizationInfo, PlaceOrderRequest, ProductFamily,
    ResendEmailType, SanEntry, VALIDITY_MONTHS,
};
use crate::utils::datetime::format_vendor_datetime;
use crate::xml::XmlElement;

/// Vendor operation and service group that place orders for `request`'s product.
pub(crate) fn place_order_target(request: &PlaceOrderRequest) -> (ServiceGroup, &'static str) {
    let product = request.order.product;
    let group = if product.vendor_generates_csr() {
        ServiceGroup::AutoCsr
    } else {
        ServiceGroup::LegacyOrder
    };
    (group, product.order_operation())
}

/// Product, kind, licenses and validity shared by both parameter blocks.
fn base_parameter(name: &str, order: &OrderRequest) -> XmlElement {
    XmlElement::new(name)
        .text_child("ProductCode", order.product.as_str())
        .text_child("OrderKind", order.kind.as_str())
        .text_child("Licenses", LICENSES.to_string())
}

fn validity_period() -> XmlElement {
    XmlElement::new("ValidityPeriod").text_child("Months", VALIDITY_MONTHS.to_string())
}

fn base_option(order: &OrderRequest) -> Option<&'static str> {
    order.wildcard.then_some("wildcard")
}

/// `OrderRequestParameter` for orders that carry a CSR.
fn order_request_parameter(order: &OrderRequest) -> XmlElement {
    base_parameter("OrderRequestParameter", order)
        .child(validity_period())
        .optional_child("BaseOption", base_option(order))
        .optional_child("CSR", order.csr())
        .optional_child("RenewalTargetOrderID", order.kind.renewal_target())
}

/// `OrderRequestParameterWithoutCSR` for vendor-generated key pairs.
fn order_request_parameter_without_csr(order: &OrderRequest, san: bool) -> XmlElement {
    let options = san.then(|| {
        XmlElement::new("Options").child(
            XmlElement::new("Option")
                .text_child("OptionName", "SAN")
                .text_child("OptionValue", "true"),
        )
    });

    base_parameter("OrderRequestParameterWithoutCSR", order)
        .maybe(options)
        .child(validity_period())
        .text_child("PIN", "")
        .text_child("KeyLength", "")
        .optional_child("BaseOption", base_option(order))
        .optional_child("RenewalTargetOrderID", order.kind.renewal_target())
}

fn contact_info(name: &str, contact: &ContactInfo) -> XmlElement {
    XmlElement::new(name)
        .text_child("FirstName", contact.first_name.as_str())
        .text_child("LastName", contact.last_name.as_str())
        .text_child("Phone", contact.phone.as_str())
        .text_child("Email", contact.email.as_str())
}

fn organization_address(address: &OrganizationAddress) -> XmlElement {
    XmlElement::new("OrganizationAddress")
        .text_child("AddressLine1", address.address_line1.as_str())
        .text_child("City", address.city.as_str())
        .text_child("Region", address.region.as_str())
        .text_child("PostalCode", address.postal_code.as_str())
        .text_child("Country", country(address))
        .text_child("Phone", address.phone.as_str())
}

fn country(address: &OrganizationAddress) -> &str {
    let country = address.country.trim();
    if country.is_empty() {
        DEFAULT_COUNTRY
    } else {
        country
    }
}

fn organization_info(organization: &OrganizationInfo) -> XmlElement {
    XmlElement::new("OrganizationInfo")
        .text_child("OrganizationName", organization.name.as_str())
        .child(organization_address(&organization.address))
}

fn san_entries(entries: &[SanEntry]) -> Option<XmlElement> {
    if entries.is_empty() {
        return None;
    }
    let list = entries.iter().fold(XmlElement::new("SANEntries"), |list, entry| {
        list.child(
            XmlElement::new("SANEntry")
                .text_child("SANOptionType", entry.option_type.to_string())
                .text_child("SubjectAltName", entry.subject_alt_name.as_str()),
        )
    });
    Some(list)
}

const DV_ORDER_ID_REQUIRED: &str = "DV orders need the approver-list order ID";

fn invalid(param: &str, detail: impl Into<String>) -> ApiError {
    ApiError::InvalidParameter {
        param: param.to_string(),
        detail: detail.into(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require<'a>(value: Option<&'a str>, param: &str, detail: &str) -> Result<&'a str> {
    non_empty(value).ok_or_else(|| invalid(param, detail))
}

fn require_organization(request: &PlaceOrderRequest) -> Result<&OrganizationInfo> {
    request
        .organization
        .as_ref()
        .ok_or_else(|| invalid("organization", "OV and EV orders require organization info"))
}

/// `GSValidateOrderParameters` request. Sends the CSR when present, otherwise the FQDN.
pub(crate) fn validate_order_request(
    header: XmlElement,
    order: &OrderRequest,
) -> Result<XmlElement> {
    let fqdn = order.fqdn.trim();
    if order.csr().is_none() && fqdn.is_empty() {
        return Err(invalid("fqdn", "either a CSR or an FQDN is required"));
    }

    let request = XmlElement::new("Request")
        .child(header)
        .child(order_request_parameter(order));
    Ok(match order.csr() {
        Some(_) => request,
        None => request.text_child("FQDN", fqdn),
    })
}

/// `GetDVApproverList` request.
pub(crate) fn approver_list_request(header: XmlElement, fqdn: &str) -> Result<XmlElement> {
    let fqdn = require(Some(fqdn), "fqdn", "must not be empty")?;
    Ok(XmlElement::new("Request")
        .child(header)
        .text_child("FQDN", fqdn))
}

/// Order document for any product; see [`place_order_target`] for the operation.
pub(crate) fn place_order_request(
    header: XmlElement,
    request: &PlaceOrderRequest,
) -> Result<XmlElement> {
    let order = &request.order;
    let fqdn = require(Some(order.fqdn.as_str()), "fqdn", "must not be empty")?;
    let order_id = non_empty(request.order_id.as_deref());
    let product = order.product;

    if !product.vendor_generates_csr() && order.csr().is_none() {
        return Err(invalid("csr", format!("{product} orders require a CSR")));
    }

    let body = XmlElement::new("Request").child(header);
    let san = san_entries(&request.san_entries);

    match (product.family(), product.vendor_generates_csr()) {
        (ProductFamily::Dv, false) => {
            let order_id = require(order_id, "order_id", DV_ORDER_ID_REQUIRED)?;
            let approver = require(
                request.approver_email.as_deref(),
                "approver_email",
                "DV orders need an approver e-mail",
            )?;
            Ok(body
                .child(order_request_parameter(order))
                .text_child("OrderID", order_id)
                .text_child("ApproverEmail", approver)
                .child(contact_info("ContactInfo", &request.contact)))
        }
        (ProductFamily::Dv, true) => {
            let order_id = require(order_id, "order_id", DV_ORDER_ID_REQUIRED)?;
            let approver = require(
                request.approver_email.as_deref(),
                "approver_email",
                "DV orders need an approver e-mail",
            )?;
            Ok(body
                .child(order_request_parameter_without_csr(order, san.is_some()))
                .text_child("OrderID", order_id)
                .text_child("FQDN", fqdn)
                .child(XmlElement::new("DVCSRInfo").text_child("Country", DEFAULT_COUNTRY))
                .text_child("ApproverEmail", approver)
                .child(contact_info("ContactInfo", &request.contact))
                .maybe(san))
        }
        (ProductFamily::Ov, false) => {
            let organization = require_organization(request)?;
            Ok(body
                .child(order_request_parameter(order))
                .optional_child("OrderID", order_id)
                .optional_child("ApproverEmail", non_empty(request.approver_email.as_deref()))
                .child(organization_info(organization))
                .child(contact_info("ContactInfo", &request.contact)))
        }
        (ProductFamily::Ov, true) => {
            let organization = require_organization(request)?;
            let address = &organization.address;
            Ok(body
                .child(order_request_parameter_without_csr(order, san.is_some()))
                .optional_child("OrderID", order_id)
                .child(organization_info(organization))
                .text_child("FQDN", fqdn)
                .child(
                    XmlElement::new("OVCSRInfo")
                        .text_child("OrganizationName", organization.name.as_str())
                        .text_child("Locality", address.city.as_str())
                        .text_child("StateOrProvince", address.region.as_str())
                        .text_child("Country", country(address)),
                )
                .child(contact_info("ContactInfo", &request.contact))
                .maybe(san))
        }
        (ProductFamily::Ev, _) => {
            let organization = require_organization(request)?;
            let ev = request.extended_validation.as_ref().ok_or_else(|| {
                invalid("extended_validation", "EV orders require business category and agency")
            })?;
            Ok(body
                .child(order_request_parameter(order))
                .children(extended_validation_blocks(organization, ev, &request.contact))
                .child(organization_info(organization))
                .child(contact_info("ContactInfo", &request.contact)))
        }
    }
}

/// `OrganizationInfoEV` through `JurisdictionInfo`, in schema order.
fn extended_validation_blocks(
    organization: &OrganizationInfo,
    ev: &ExtendedValidationInfo,
    contact: &ContactInfo,
) -> Vec<XmlElement> {
    let address = &organization.address;
    let with_org = |name: &str| {
        contact_info(name, contact).text_child("OrganizationName", organization.name.as_str())
    };

    vec![
        XmlElement::new("OrganizationInfoEV")
            .text_child("BusinessCategoryCode", ev.business_category.as_str())
            .child(organization_address(address)),
        with_org("RequestorInfo"),
        with_org("ApproverInfo"),
        contact_info("AuthorizedSignerInfo", contact),
        XmlElement::new("JurisdictionInfo")
            .text_child("Country", country(address))
            .text_child("StateOrProvince", address.region.as_str())
            .text_child("Locality", address.city.as_str())
            .text_child(
                "IncorporatingAgencyRegistrationNumber",
                ev.incorporating_agency_registration_number.as_str(),
            ),
    ]
}

/// `ResendEmail` request.
pub(crate) fn resend_email_request(
    header: XmlElement,
    order_id: &str,
    email_type: ResendEmailType,
) -> Result<XmlElement> {
    let order_id = require(Some(order_id), "order_id", "must not be empty")?;
    Ok(XmlElement::new("Request")
        .child(header)
        .text_child("OrderID", order_id)
        .text_child("ResendEmailType", email_type.as_str()))
}

/// `ChangeApproverEmail` request.
pub(crate) fn change_approver_email_request(
    header: XmlElement,
    order_id: &str,
    approver_email: &str,
    fqdn: &str,
) -> Result<XmlElement> {
    let order_id = require(Some(order_id), "order_id", "must not be empty")?;
    let approver_email = require(Some(approver_email), "approver_email", "must not be empty")?;
    let fqdn = require(Some(fqdn), "fqdn", "must not be empty")?;
    Ok(XmlElement::new("Request")
        .child(header)
        .text_child("OrderID", order_id)
        .text_child("ApproverEmail", approver_email)
        .text_child("FQDN", fqdn))
}

/// `ReIssue` request.
pub(crate) fn reissue_request(
    header: XmlElement,
    order_id: &str,
    csr: &str,
    hash_algorithm: HashAlgorithm,
) -> Result<XmlElement> {
    let order_id = require(Some(order_id), "order_id", "must not be empty")?;
    let csr = require(Some(csr), "csr", "must not be empty")?;
    Ok(XmlElement::new("Request")
        .child(header)
        .child(XmlElement::new("OrderParameter").text_child("CSR", csr))
        .text_child("TargetOrderID", order_id)
        .text_child("HashAlgorithm", hash_algorithm.as_str()))
}

/// `GetOrderByOrderID` request with every return option enabled.
pub(crate) fn order_by_id_request(header: XmlElement, order_id: &str) -> Result<XmlElement> {
    let order_id = require(Some(order_id), "order_id", "must not be empty")?;
    let options = [
        "ReturnOrderOption",
        "ReturnCertificateInfo",
        "ReturnFulfillment",
        "ReturnCACerts",
    ]
    .into_iter()
    .fold(XmlElement::new("OrderQueryOption"), |options, name| {
        options.text_child(name, "true")
    });

    Ok(XmlElement::new("Request")
        .child(header)
        .text_child("OrderID", order_id)
        .child(options))
}

/// `GetOrderByDataRange` request.
pub(crate) fn date_range_request(header: XmlElement, range: &DateRange) -> Result<XmlElement> {
    if range.from > range.to {
        return Err(invalid("range", "from must not be after to"));
    }
    Ok(XmlElement::new("Request")
        .child(header)
        .text_child("FromDate", format_vendor_datetime(&range.from))
        .text_child("ToDate", format_vendor_datetime(&range.to)))
}

/// `GetCertificateOrders` request.
pub(crate) fn list_orders_request(header: XmlElement) -> XmlElement {
    XmlElement::new("Request").child(header)
}
