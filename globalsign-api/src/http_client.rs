//! Generic HTTP client tools
//!
//! Sends a prepared SOAP request, logs it and reads the response text. Status codes are
//! not judged here: GlobalSign reports SOAP faults with HTTP 500, so the caller inspects
//! the body before deciding what a non-2xx status means.
//!
//! # Reconnect policy
//! Only [`ApiError::ConnectFailed`] is retried: the request never reached the server, so
//! sending it again cannot place an order twice. Every other failure is returned as is.

use reqwest::RequestBuilder;
use std::time::Duration;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `service` - service group name (for logging and errors)
    /// * `operation` - vendor operation name (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        operation: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[{service}] POST {operation}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| map_send_error(&e, service))?;

        let status_code = response.status().as_u16();
        log::debug!("[{service}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                service: service.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{service}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Performs an HTTP request, reconnecting when the connection cannot be established.
    ///
    /// # Arguments
    /// * `max_reconnects` - maximum number of additional attempts (0 means a single attempt)
    ///
    /// # Retry strategy
    /// - Only `ApiError::ConnectFailed` is retried
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    pub async fn execute_request_with_reconnect(
        request_builder: RequestBuilder,
        service: &str,
        operation: &str,
        max_reconnects: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_reconnects == 0 {
            return Self::execute_request(request_builder, service, operation).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_reconnects {
            // RequestBuilder can only be used once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{service}] Cannot clone request, disabling reconnect");
                return Self::execute_request(request_builder, service, operation).await;
            };

            match Self::execute_request(req, service, operation).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_reconnects && is_reconnectable(&e) => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "[{}] {} could not connect (attempt {}/{}), reconnecting in {:.1}s: {}",
                        service,
                        operation,
                        attempt + 1,
                        max_reconnects,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::ConnectFailed {
            service: service.to_string(),
            detail: "All reconnect attempts exhausted with no error captured".to_string(),
        }))
    }
}

/// Classifies a `send()` failure.
///
/// Connection failures are checked first: a connect timeout never reached the server.
fn map_send_error(e: &reqwest::Error, service: &str) -> ApiError {
    if e.is_connect() {
        ApiError::ConnectFailed {
            service: service.to_string(),
            detail: e.to_string(),
        }
    } else if e.is_timeout() {
        ApiError::Timeout {
            service: service.to_string(),
            detail: e.to_string(),
        }
    } else {
        ApiError::NetworkError {
            service: service.to_string(),
            detail: e.to_string(),
        }
    }
}

/// Determine whether the request may be sent again.
fn is_reconnectable(error: &ApiError) -> bool {
    matches!(error, ApiError::ConnectFailed { .. })
}

/// Calculate exponential backoff delay
///
/// Backoff strategy: 100ms, 200ms, 400ms, 800ms, 1.6s, ...
/// Maximum delay limit is 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000);
    Duration::from_millis(delay_ms)
}
