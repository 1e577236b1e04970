//! Response payload parsers
//!
//! Every field is optional: failed responses usually carry only the header, and the
//! success code, not the payload, decides the outcome.

use crate::types::{
    Approver, ApproverList, CaCertificate, CertificateInfo, Fulfillment, OrderDetail,
    OrderPlacement, ParsedCsr, ReissueResult, ValidationResult,
};
use crate::utils::datetime::parse_vendor_datetime;
use crate::xml::XmlElement;

pub(crate) fn parse_validation(response: &XmlElement) -> ValidationResult {
    let parsed_csr = response.get("ParsedCSR").map(|csr| ParsedCsr {
        domain_name: csr.text_at("DomainName"),
        organization: csr.text_at("Organization"),
        organization_unit: csr.text_at("OrganizationUnit"),
        locality: csr.text_at("Locality"),
        state: csr.text_at("State"),
        country: csr.text_at("Country"),
        email: csr.text_at("Email"),
    });

    ValidationResult {
        order_id: response.text_at("OrderID"),
        parsed_csr,
    }
}

pub(crate) fn parse_approver_list(response: &XmlElement) -> ApproverList {
    let approvers = response
        .get("Approvers")
        .map(|list| {
            list.get_all("Approver")
                .filter_map(|approver| {
                    approver.text_at("ApproverEmail").map(|email| Approver {
                        approver_type: approver.text_at("ApproverType"),
                        email,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    ApproverList {
        order_id: response.text_at("OrderID"),
        approvers,
    }
}

pub(crate) fn parse_placement(response: &XmlElement) -> OrderPlacement {
    OrderPlacement {
        order_id: response.text_at("OrderID"),
    }
}

pub(crate) fn parse_reissue(response: &XmlElement) -> ReissueResult {
    ReissueResult {
        order_id: response.text_at("OrderID"),
        target_order_id: response.text_at("TargetOrderID"),
    }
}

fn datetime_at(element: &XmlElement, path: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    element
        .text_at(path)
        .and_then(|value| parse_vendor_datetime(&value))
}

fn parse_certificate_info(info: &XmlElement) -> CertificateInfo {
    CertificateInfo {
        status: info.text_at("CertificateStatus"),
        common_name: info.text_at("CommonName"),
        subject_name: info.text_at("SubjectName"),
        start_date: datetime_at(info, "StartDate"),
        end_date: datetime_at(info, "EndDate"),
    }
}

fn parse_fulfillment(fulfillment: &XmlElement) -> Fulfillment {
    let ca_certificates = fulfillment
        .get("CACertificates")
        .map(|list| {
            list.get_all("CACertificate")
                .filter_map(|ca| {
                    ca.text_at("CACert").map(|certificate| CaCertificate {
                        cert_type: ca.text_at("CACertType"),
                        certificate,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Fulfillment {
        server_certificate: fulfillment.text_at("ServerCertificate/X509Cert"),
        pkcs7: fulfillment.text_at("ServerCertificate/PKCS7Cert"),
        ca_certificates,
    }
}

/// Parses an `OrderDetail` (nested `OrderInfo`) or a flat `SearchOrderDetail`.
fn parse_order_detail(detail: &XmlElement) -> OrderDetail {
    let info = detail.get("OrderInfo").unwrap_or(detail);
    let certificate = detail.get("CertificateInfo").map(parse_certificate_info);
    let fqdn = info.text_at("FQDN").or_else(|| {
        certificate
            .as_ref()
            .and_then(|c| c.common_name.clone())
    });

    OrderDetail {
        order_id: info.text_at("OrderID"),
        product_code: info.text_at("ProductCode"),
        order_kind: info.text_at("OrderKind"),
        order_status: info.text_at("OrderStatus"),
        order_date: datetime_at(info, "OrderDate"),
        fqdn,
        certificate,
        fulfillment: detail.get("Fulfillment").map(parse_fulfillment),
    }
}

/// `GetOrderByOrderID` payload. The response's own `OrderID` fills in a missing one.
pub(crate) fn parse_order(response: &XmlElement) -> OrderDetail {
    let mut detail = response
        .get("OrderDetail")
        .map(parse_order_detail)
        .unwrap_or_default();
    if detail.order_id.is_none() {
        detail.order_id = response.text_at("OrderID");
    }
    detail
}

/// Order lists of `GetOrderByDataRange` and `GetCertificateOrders`.
pub(crate) fn parse_order_list(response: &XmlElement) -> Vec<OrderDetail> {
    [
        ("OrderDetails", "OrderDetail"),
        ("SearchOrderDetails", "SearchOrderDetail"),
    ]
    .into_iter()
    .find_map(|(list, item)| {
        response
            .get(list)
            .map(|list| list.get_all(item).map(parse_order_detail).collect())
    })
    .unwrap_or_default()
}
