//! Utility modules.

/// Vendor date/time formatting and parsing.
pub mod datetime;

/// Log sanitization utilities to prevent credential and key material exposure.
pub mod log_sanitizer;
