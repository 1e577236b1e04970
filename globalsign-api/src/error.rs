use serde::{Deserialize, Serialize};

/// Message fragment GlobalSign uses when the reseller account cannot pay for an order.
pub const BALANCE_ERROR_FRAGMENT: &str = "enough remaining balance";

/// Short form of the insufficient-funds error returned by some order operations.
pub const BALANCE_ERROR_MESSAGE: &str = "Balance Error";

/// A single entry of the `Errors` list inside a GlobalSign response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorError {
    /// `ErrorCode`, usually a negative number rendered as text.
    pub code: Option<String>,
    /// `ErrorField`, the request field the vendor complained about.
    pub field: Option<String>,
    /// `ErrorMessage`.
    pub message: String,
}

impl VendorError {
    /// Whether this entry is the vendor's insufficient-funds signature.
    #[must_use]
    pub fn is_balance_error(&self) -> bool {
        self.message.contains(BALANCE_ERROR_FRAGMENT) || self.message == BALANCE_ERROR_MESSAGE
    }
}

/// Returns `true` when any of the vendor errors carries the insufficient-funds signature.
pub fn is_balance_error(errors: &[VendorError]) -> bool {
    errors.iter().any(VendorError::is_balance_error)
}

/// Joins vendor error messages into one human-readable line.
pub fn join_vendor_messages(errors: &[VendorError]) -> String {
    if errors.is_empty() {
        return "no error details returned".to_string();
    }
    errors
        .iter()
        .map(|e| match (&e.code, &e.field) {
            (Some(code), Some(field)) => format!("{code} ({field}): {}", e.message),
            (Some(code), None) => format!("{code}: {}", e.message),
            (None, Some(field)) => format!("({field}): {}", e.message),
            (None, None) => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for all GlobalSign API operations.
///
/// Every variant except [`Rejected`](Self::Rejected) and
/// [`InvalidParameter`](Self::InvalidParameter) describes a transport or protocol problem:
/// the vendor's verdict on the request is unknown. `Rejected` is produced from a parsed
/// response whose header carried a non-zero success code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// The connection could not be established; the request never reached the server.
    ///
    /// This is the only variant the client reconnects on.
    ConnectFailed {
        /// Service group the call was addressed to.
        service: String,
        /// Error details.
        detail: String,
    },

    /// A network-level error occurred after the request was dispatched.
    NetworkError {
        /// Service group the call was addressed to.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Service group the call was addressed to.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The server answered with a non-success HTTP status and no SOAP fault.
    HttpStatus {
        /// Service group the call was addressed to.
        service: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The server answered with a SOAP `Fault` element.
    SoapFault {
        /// Service group the call was addressed to.
        service: String,
        /// `faultcode` text.
        fault_code: String,
        /// `faultstring` text.
        fault_string: String,
    },

    /// The response could not be parsed as a GlobalSign SOAP response.
    ParseError {
        /// Service group the call was addressed to.
        service: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The request document could not be serialized.
    SerializationError {
        /// Service group the call was addressed to.
        service: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// A request parameter is missing or inconsistent; nothing was sent.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The vendor processed the request and answered with a non-zero success code.
    Rejected {
        /// Vendor operation name, e.g. `GSDVOrder`.
        operation: String,
        /// `SuccessCode` from the response header.
        success_code: i32,
        /// Entries of the header's `Errors` list.
        errors: Vec<VendorError>,
    },
}

impl ApiError {
    /// Whether the vendor's verdict on the request is unknown (transport or protocol problem).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailed { .. }
                | Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::HttpStatus { .. }
                | Self::SoapFault { .. }
                | Self::ParseError { .. }
        )
    }

    /// Whether this is expected behavior (bad input, vendor refusal), used for log levels.
    ///
    /// Returns `true` when `warn` is appropriate, `false` for `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. } | Self::Rejected { .. })
    }

    /// Whether this is a rejection carrying the insufficient-funds signature.
    #[must_use]
    pub fn is_balance_error(&self) -> bool {
        match self {
            Self::Rejected { errors, .. } => is_balance_error(errors),
            _ => false,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectFailed { service, detail } => {
                write!(f, "[{service}] Connection failed: {detail}")
            }
            Self::NetworkError { service, detail } => {
                write!(f, "[{service}] Network error: {detail}")
            }
            Self::Timeout { service, detail } => {
                write!(f, "[{service}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                service, status, ..
            } => {
                write!(f, "[{service}] Unexpected HTTP status {status}")
            }
            Self::SoapFault {
                service,
                fault_code,
                fault_string,
            } => {
                write!(f, "[{service}] SOAP fault {fault_code}: {fault_string}")
            }
            Self::ParseError { service, detail } => {
                write!(f, "[{service}] Parse error: {detail}")
            }
            Self::SerializationError { service, detail } => {
                write!(f, "[{service}] Serialization error: {detail}")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::Rejected {
                operation,
                success_code,
                errors,
            } => {
                write!(
                    f,
                    "{operation} rejected (code {success_code}): {}",
                    join_vendor_messages(errors)
                )
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
