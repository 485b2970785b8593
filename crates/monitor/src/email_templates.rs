//! Plain-text templates for SLA notifications.
//!
//! Rendering is pure string work so composition stays separate from delivery;
//! numbers arrive already rounded for human readability.

/// Notification for an order that crossed its warning threshold but is not
/// yet overdue.
pub struct WarningEmailTemplate {
    pub order_title: String,
    pub order_ref: String,
    pub hours_remaining: i64,
    pub percent_consumed: i64,
}

impl WarningEmailTemplate {
    pub fn subject(&self) -> String {
        format!("[SLA Warning] {} ({})", self.order_title, self.order_ref)
    }

    pub fn render_text(&self) -> String {
        format!(
            r#"Hello,

The service order '{}' (ref {}) is approaching its SLA deadline.

{} hours remain and {}% of the SLA window has been consumed.

Please make sure the order is resolved before the deadline passes.

Best regards,
The Maintenance Team"#,
            self.order_title, self.order_ref, self.hours_remaining, self.percent_consumed
        )
    }
}

/// Notification for an order whose deadline has already passed.
pub struct BreachEmailTemplate {
    pub order_title: String,
    pub order_ref: String,
    pub percent_consumed: i64,
}

impl BreachEmailTemplate {
    pub fn subject(&self) -> String {
        format!("[SLA Breach] {} ({})", self.order_title, self.order_ref)
    }

    pub fn render_text(&self) -> String {
        format!(
            r#"Hello,

The SLA deadline for service order '{}' (ref {}) has passed.

0 hours remain; {}% of the SLA window has been consumed.

The order is overdue and requires immediate attention.

Best regards,
The Maintenance Team"#,
            self.order_title, self.order_ref, self.percent_consumed
        )
    }
}
