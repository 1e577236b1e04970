//! Type definitions module

mod notification;
mod order;
mod trace;

pub use notification::{
    ACKNOWLEDGEMENT_BODY, ACKNOWLEDGEMENT_SUBJECT, Acknowledgement, Notification,
    NotificationCategory,
};
pub use order::{CertificateOrder, CompletedOrder, OrderSubject};
pub use trace::{DiagnosticTrace, TraceStep, WorkflowStep};

// Re-export API types used in service signatures
pub use globalsign_api::{
    ContactInfo, DateRange, ExtendedValidationInfo, OrderDetail, OrganizationInfo,
    ProductCode, ReissueResult, SanEntry,
};
