//! Deadline arithmetic for a single order.

use crate::error::ConfigurationError;
use crate::sla::policy::SlaPolicy;
use time::OffsetDateTime;

/// How much of one order's SLA window has elapsed at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadlineEval {
    /// Hours until the deadline; negative once the deadline has passed.
    pub hours_remaining: f64,
    /// Percent of the total window consumed. Exceeds 100 when overdue, which
    /// is meaningful signal rather than an error.
    pub percent_consumed: f64,
}

/// Computes time remaining and window consumption for one order.
///
/// The policy is validated first so a non-positive window surfaces as a
/// [`ConfigurationError`] instead of a division by zero.
pub fn evaluate(
    now: OffsetDateTime,
    due_at: OffsetDateTime,
    policy: &SlaPolicy,
) -> Result<DeadlineEval, ConfigurationError> {
    policy.validate()?;
    let total_hours = policy.total_hours();
    let hours_remaining = (due_at - now).as_seconds_f64() / 3600.0;
    let percent_consumed = 100.0 * (total_hours - hours_remaining) / total_hours;
    Ok(DeadlineEval {
        hours_remaining,
        percent_consumed,
    })
}
