//! Call-scoped diagnostic trace of an order workflow

use chrono::{DateTime, Utc};
use globalsign_api::{ApiError, OperationOutcome, ProductCode};
use serde::{Deserialize, Serialize};

/// Pipeline step of an order workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStep {
    /// `GSValidateOrderParameters`
    Validation,
    /// `GetDVApproverList`
    ApproverList,
    /// `GSDVOrder`, `GSOVOrder`, `GSEVOrder` or an auto-CSR variant
    PlaceOrder,
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Validation => "validation",
            Self::ApproverList => "approver list",
            Self::PlaceOrder => "place order",
        })
    }
}

/// One vendor call made by a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub step: WorkflowStep,
    /// Vendor operation name.
    pub operation: String,
    /// `None` when the call failed before a response was parsed.
    pub success_code: Option<i32>,
    /// Masked request document, `null` when nothing was sent.
    pub request: serde_json::Value,
    /// Response document, `null` on transport failure.
    pub response: serde_json::Value,
    /// Transport or protocol error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

/// Everything one workflow exchanged with the vendor, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTrace {
    pub trace_id: String,
    pub product: ProductCode,
    pub fqdn: String,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<TraceStep>,
    pub last_step: Option<WorkflowStep>,
    pub order_id: Option<String>,
    pub finished: bool,
}

impl DiagnosticTrace {
    pub fn new(product: ProductCode, fqdn: &str) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            product,
            fqdn: fqdn.to_string(),
            started_at: Utc::now(),
            steps: Vec::new(),
            last_step: None,
            order_id: None,
            finished: false,
        }
    }

    /// Records a parsed vendor response, successful or not.
    pub fn record_outcome<T>(&mut self, step: WorkflowStep, outcome: &OperationOutcome<T>) {
        self.push(TraceStep {
            step,
            operation: outcome.exchange.operation.clone(),
            success_code: Some(outcome.header.success_code),
            request: outcome.exchange.request.clone(),
            response: outcome.exchange.response.clone(),
            error: None,
            at: Utc::now(),
        });
    }

    /// Records a call that produced no parsed response.
    pub fn record_failure(&mut self, step: WorkflowStep, operation: &str, error: &ApiError) {
        self.push(TraceStep {
            step,
            operation: operation.to_string(),
            success_code: None,
            request: serde_json::Value::Null,
            response: serde_json::Value::Null,
            error: Some(error.to_string()),
            at: Utc::now(),
        });
    }

    fn push(&mut self, step: TraceStep) {
        self.last_step = Some(step.step);
        self.steps.push(step);
    }

    /// Marks the workflow as completed with `order_id`.
    pub fn finish(&mut self, order_id: &str) {
        self.order_id = Some(order_id.to_string());
        self.finished = true;
    }

    /// Indented JSON rendering used in operator notifications.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{self:?} ({e})"))
    }
}
