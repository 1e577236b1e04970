//! SOAP 1.1 envelope codec
//!
//! Requests are document/literal: the operation element is qualified with the service
//! namespace, everything below it is unqualified. Responses are located by local name.

use crate::error::{ApiError, Result, VendorError};
use crate::types::ResponseHeader;
use crate::xml::XmlElement;

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

const ENV_PREFIX: &str = "SOAP-ENV";
const OPERATION_PREFIX: &str = "ns1";

/// Wraps `request` (the `<Request>` element) into `<ns1:{operation}>` inside a SOAP envelope.
pub fn build_envelope(namespace: &str, operation: &str, request: XmlElement) -> XmlElement {
    let operation_element =
        XmlElement::new(format!("{OPERATION_PREFIX}:{operation}")).child(request);

    XmlElement::new(format!("{ENV_PREFIX}:Envelope"))
        .attr(format!("xmlns:{ENV_PREFIX}"), SOAP_ENV_NS)
        .attr(format!("xmlns:{OPERATION_PREFIX}"), namespace)
        .child(XmlElement::new(format!("{ENV_PREFIX}:Body")).child(operation_element))
}

/// Extracts the `<Response>` element of `{operation}Response` from a parsed envelope.
///
/// A SOAP `Fault` in the body is reported as [`ApiError::SoapFault`].
pub fn extract_response<'a>(
    envelope: &'a XmlElement,
    operation: &str,
    service: &str,
) -> Result<&'a XmlElement> {
    if envelope.name != "Envelope" {
        return Err(ApiError::ParseError {
            service: service.to_string(),
            detail: format!("expected SOAP Envelope, found <{}>", envelope.name),
        });
    }

    let body = envelope.get("Body").ok_or_else(|| ApiError::ParseError {
        service: service.to_string(),
        detail: "SOAP envelope has no Body".to_string(),
    })?;

    if let Some(fault) = body.get("Fault") {
        return Err(ApiError::SoapFault {
            service: service.to_string(),
            fault_code: fault.text_at("faultcode").unwrap_or_default(),
            fault_string: fault.text_at("faultstring").unwrap_or_default(),
        });
    }

    let wrapper_name = format!("{operation}Response");
    let wrapper = body.get(&wrapper_name).ok_or_else(|| ApiError::ParseError {
        service: service.to_string(),
        detail: format!("SOAP body has no {wrapper_name} element"),
    })?;

    wrapper.get("Response").ok_or_else(|| ApiError::ParseError {
        service: service.to_string(),
        detail: format!("{wrapper_name} has no Response element"),
    })
}

/// Reads the `OrderResponseHeader` or `QueryResponseHeader` of a `<Response>` element.
pub fn parse_response_header(response: &XmlElement, service: &str) -> Result<ResponseHeader> {
    let header = response
        .get("OrderResponseHeader")
        .or_else(|| response.get("QueryResponseHeader"))
        .ok_or_else(|| ApiError::ParseError {
            service: service.to_string(),
            detail: "response has no OrderResponseHeader or QueryResponseHeader".to_string(),
        })?;

    let raw_code = header
        .text_at("SuccessCode")
        .ok_or_else(|| ApiError::ParseError {
            service: service.to_string(),
            detail: "response header has no SuccessCode".to_string(),
        })?;
    let success_code = raw_code.parse::<i32>().map_err(|e| ApiError::ParseError {
        service: service.to_string(),
        detail: format!("invalid SuccessCode '{raw_code}': {e}"),
    })?;

    let errors = header
        .get("Errors")
        .map(|errors| {
            errors
                .get_all("Error")
                .map(|e| VendorError {
                    code: e.text_at("ErrorCode"),
                    field: e.text_at("ErrorField"),
                    message: e.text_at("ErrorMessage").unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ResponseHeader {
        success_code,
        errors,
        timestamp: header.text_at("Timestamp"),
    })
}
