//! SOAP call plumbing shared by every operation

use crate::config::ServiceGroup;
use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::soap::{build_envelope, extract_response, parse_response_header};
use crate::types::{Exchange, ResponseHeader};
use crate::utils::log_sanitizer::{MASK, mask_secret, pem_fingerprint, truncate_for_log};
use crate::xml::XmlElement;

use super::GlobalSignClient;

/// A parsed `<Response>` element and everything derived from it.
pub(crate) struct SoapReply {
    pub header: ResponseHeader,
    pub response: XmlElement,
    pub exchange: Exchange,
}

impl GlobalSignClient {
    /// `AuthToken` block shared by order and query headers.
    fn auth_token(&self) -> XmlElement {
        XmlElement::new("AuthToken")
            .text_child("UserName", self.credentials.username.as_str())
            .text_child("Password", self.credentials.password.as_str())
    }

    /// `OrderRequestHeader` for order and function services.
    pub(crate) fn order_header(&self) -> XmlElement {
        XmlElement::new("OrderRequestHeader").child(self.auth_token())
    }

    /// `QueryRequestHeader` for the query service.
    pub(crate) fn query_header(&self) -> XmlElement {
        XmlElement::new("QueryRequestHeader").child(self.auth_token())
    }

    /// Sends `request` as `operation` to `group` and returns the parsed response.
    ///
    /// Non-zero success codes are not errors here; they are reported in the header.
    pub(crate) async fn call(
        &self,
        group: ServiceGroup,
        operation: &str,
        request: XmlElement,
    ) -> Result<SoapReply> {
        let service = group.name();
        let masked_request = mask_request(&request);

        let envelope = build_envelope(group.namespace(), operation, request);
        let body = envelope
            .to_document()
            .map_err(|detail| ApiError::SerializationError {
                service: service.to_string(),
                detail,
            })?;

        log::debug!(
            "[{service}] {operation} request: {}",
            truncate_for_log(&loggable(&masked_request))
        );

        let request_builder = self
            .client
            .post(self.endpoints.url(group))
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "\"\"")
            .body(body);

        let (status, text) = HttpUtils::execute_request_with_reconnect(
            request_builder,
            service,
            operation,
            self.max_reconnects,
        )
        .await?;

        let document = XmlElement::parse(&text);

        if !(200..300).contains(&status) {
            // Faults arrive with HTTP 500
            if let Ok(document) = &document
                && let Err(fault @ ApiError::SoapFault { .. }) =
                    extract_response(document, operation, service)
            {
                log::warn!("[{service}] {operation} returned {fault}");
                return Err(fault);
            }
            log::error!("[{service}] {operation} failed with HTTP {status}");
            return Err(ApiError::HttpStatus {
                service: service.to_string(),
                status,
                body: truncate_for_log(&mask_secret(&text, &self.credentials.password)),
            });
        }

        let document = document.map_err(|detail| {
            log::error!("[{service}] {operation} response is not XML: {detail}");
            ApiError::ParseError {
                service: service.to_string(),
                detail,
            }
        })?;
        let response = extract_response(&document, operation, service)?.clone();
        let header = parse_response_header(&response, service)?;

        if header.is_success() {
            log::debug!("[{service}] {operation} succeeded");
        } else {
            log::warn!(
                "[{service}] {operation} returned success code {} with {} error(s)",
                header.success_code,
                header.errors.len()
            );
        }

        let exchange = Exchange {
            operation: operation.to_string(),
            request: masked_request.to_json(),
            response: response.to_json(),
        };

        Ok(SoapReply {
            header,
            response,
            exchange,
        })
    }
}

/// Copy of `request` with the password replaced.
fn mask_request(request: &XmlElement) -> XmlElement {
    let mut masked = request.clone();
    masked.replace_text("Password", MASK);
    masked
}

/// Compact JSON of a masked request with CSR bodies replaced by fingerprints.
fn loggable(masked_request: &XmlElement) -> String {
    let mut request = masked_request.clone();
    if let Some(csr) = request.descendant("CSR").and_then(|c| c.text.clone()) {
        request.replace_text("CSR", &pem_fingerprint(&csr));
    }
    request.to_json().to_string()
}
