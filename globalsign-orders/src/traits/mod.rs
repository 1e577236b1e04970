//! Delivery abstraction trait definitions

mod customer_acknowledger;
mod operator_notifier;

pub use customer_acknowledger::{CustomerAcknowledger, LogAcknowledger};
pub use operator_notifier::{LogNotifier, OperatorNotifier};
