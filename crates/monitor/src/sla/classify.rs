//! Alert classification and the re-alert gate.

use crate::entity::service_order;
use crate::sla::deadline::DeadlineEval;
use crate::sla::policy::SlaPolicy;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Severity of a dispatched alert, as persisted on the order and shown in
/// subjects and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "breach")]
    Breach,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Warning => f.write_str("warning"),
            AlertSeverity::Breach => f.write_str("breach"),
        }
    }
}

/// Outcome of classifying one order in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Within the SLA window, below the warning threshold. No event produced.
    Nominal,
    /// Warning threshold crossed, deadline not yet passed.
    Warning,
    /// Deadline passed.
    Breach,
}

impl Classification {
    pub fn severity(self) -> Option<AlertSeverity> {
        match self {
            Classification::Nominal => None,
            Classification::Warning => Some(AlertSeverity::Warning),
            Classification::Breach => Some(AlertSeverity::Breach),
        }
    }
}

/// One order's classified alert for one run, before composition.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub order_id: Uuid,
    pub severity: AlertSeverity,
    pub hours_remaining: f64,
    pub percent_consumed: f64,
    pub recipient: String,
}

/// Decides the alert state of one evaluated order.
///
/// Breach is checked first: past the deadline the warning threshold has
/// necessarily been crossed too, and the higher severity must win. The
/// warning boundary is inclusive.
pub fn classify(eval: &DeadlineEval, policy: &SlaPolicy) -> Classification {
    if eval.hours_remaining <= 0.0 {
        return Classification::Breach;
    }
    if eval.percent_consumed >= policy.warning_threshold_percent {
        return Classification::Warning;
    }
    Classification::Nominal
}

/// Determines whether an alert of the computed severity should actually be
/// sent, given what was last sent for this order.
///
/// Fires when the severity differs from the last recorded one (first alert or
/// escalation), or when the last alert of the same severity is older than the
/// reminder interval.
pub fn should_notify(
    order: &service_order::Model,
    severity: AlertSeverity,
    now: OffsetDateTime,
    reminder_interval: time::Duration,
) -> bool {
    if order.last_alert_severity != Some(severity) {
        return true;
    }
    let Some(last_alert) = order.last_alert_at else {
        return true;
    };
    now - last_alert >= reminder_interval
}
