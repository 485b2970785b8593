//! Notification composition.
//!
//! Pure: builds a recipient-addressed message from an order and its alert
//! event, with no I/O. Delivery failures can never mutate or skip
//! composition.

use crate::email_templates::{BreachEmailTemplate, WarningEmailTemplate};
use crate::entity::service_order;
use crate::error::InvalidRecipientError;
use crate::sla::classify::{AlertEvent, AlertSeverity};
use lettre::Address;
use lettre::message::Mailbox;
use uuid::Uuid;

/// A composed, addressed notification awaiting dispatch.
#[derive(Debug, Clone)]
pub struct Notification {
    pub order_id: Uuid,
    pub severity: AlertSeverity,
    pub recipient: Mailbox,
    pub subject: String,
    pub body: String,
}

/// Builds the notification for one classified order.
///
/// Fails only when the requester has no usable email address; such orders are
/// recorded as skipped, not retried.
pub fn compose(
    order: &service_order::Model,
    event: &AlertEvent,
) -> Result<Notification, InvalidRecipientError> {
    let raw = event.recipient.trim();
    if raw.is_empty() {
        return Err(InvalidRecipientError {
            requester: order.requester_name.clone(),
            reason: "missing email address".into(),
        });
    }

    let address: Address = raw.parse().map_err(|e: lettre::address::AddressError| {
        InvalidRecipientError {
            requester: order.requester_name.clone(),
            reason: e.to_string(),
        }
    })?;
    let recipient = Mailbox::new(Some(order.requester_name.clone()), address);

    let percent_consumed = event.percent_consumed.round() as i64;
    let (subject, body) = match event.severity {
        AlertSeverity::Warning => {
            let template = WarningEmailTemplate {
                order_title: order.title.clone(),
                order_ref: order.short_ref(),
                hours_remaining: event.hours_remaining.round() as i64,
                percent_consumed,
            };
            (template.subject(), template.render_text())
        }
        AlertSeverity::Breach => {
            let template = BreachEmailTemplate {
                order_title: order.title.clone(),
                order_ref: order.short_ref(),
                percent_consumed,
            };
            (template.subject(), template.render_text())
        }
    };

    Ok(Notification {
        order_id: event.order_id,
        severity: event.severity,
        recipient,
        subject,
        body,
    })
}
