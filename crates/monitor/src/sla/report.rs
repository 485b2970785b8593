//! Run report types.
//!
//! Every candidate order evaluated in a run lands in exactly one of
//! `sent`, `failed`, or `skipped` — no silent drops.

use crate::sla::classify::AlertSeverity;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Why an order produced no dispatched notification this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No SLA policy configured for the order's service type.
    NoPolicy,
    /// The configured policy violates its invariants.
    InvalidPolicy,
    /// Below the warning threshold and not overdue.
    WithinSla,
    /// An alert of this severity was already sent within the reminder window.
    AlreadyNotified,
    /// The requester has no deliverable email address.
    NoRecipient,
    /// The run deadline expired before this order was evaluated.
    RunDeadlineExceeded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NoPolicy => "no policy",
            SkipReason::InvalidPolicy => "invalid policy",
            SkipReason::WithinSla => "within SLA window",
            SkipReason::AlreadyNotified => "already notified",
            SkipReason::NoRecipient => "no deliverable recipient",
            SkipReason::RunDeadlineExceeded => "run deadline exceeded",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SentNotification {
    pub order_id: Uuid,
    pub recipient: String,
    pub severity: AlertSeverity,
    pub provider_message_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedNotification {
    pub order_id: Uuid,
    pub recipient: String,
    pub severity: AlertSeverity,
    /// Provider error text, captured verbatim for diagnostics.
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedOrder {
    pub order_id: Uuid,
    pub reason: SkipReason,
    pub detail: Option<String>,
}

/// Aggregate outcome of one run.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Candidate orders evaluated this run.
    pub evaluated: usize,
    /// Orders that produced a warning or breach notification.
    pub alerted: usize,
    pub sent: Vec<SentNotification>,
    pub failed: Vec<FailedNotification>,
    pub skipped: Vec<SkippedOrder>,
}

impl RunReport {
    /// Total orders accounted for across sent, failed, and skipped.
    pub fn accounted(&self) -> usize {
        self.sent.len() + self.failed.len() + self.skipped.len()
    }
}
