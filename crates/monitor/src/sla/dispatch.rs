//! Concurrent notification dispatch.
//!
//! Fans composed notifications out to the email provider with bounded,
//! unordered concurrency. Every send is independent: one recipient's failure
//! or timeout never aborts or delays delivery to any other recipient.

use crate::error::DispatchError;
use crate::sla::classify::AlertSeverity;
use crate::sla::compose::Notification;
use futures::StreamExt;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Outcome of one dispatch attempt.
#[derive(Debug)]
pub struct DispatchResult {
    pub order_id: Uuid,
    pub severity: AlertSeverity,
    pub recipient: String,
    /// Provider acknowledgment on success, failure reason otherwise.
    pub outcome: Result<String, DispatchError>,
}

impl DispatchResult {
    pub fn is_sent(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Seam over the outbound email client. The production implementation is the
/// lettre SMTP transport; tests substitute failure-injecting mocks. Must be
/// safe for concurrent use by multiple dispatch workers.
pub trait AlertTransport: Send + Sync {
    /// Delivers one message, returning the provider's acknowledgment line.
    fn deliver(
        &self,
        message: Message,
    ) -> impl Future<Output = Result<String, DispatchError>> + Send;
}

impl AlertTransport for AsyncSmtpTransport<Tokio1Executor> {
    fn deliver(
        &self,
        message: Message,
    ) -> impl Future<Output = Result<String, DispatchError>> + Send {
        async move {
            match AsyncTransport::send(self, message).await {
                Ok(response) => Ok(response.message().collect::<Vec<_>>().join(" ")),
                Err(e) => Err(DispatchError::Provider(e.to_string())),
            }
        }
    }
}

/// Sends all notifications with at most `max_concurrency` in flight, each
/// bounded by `send_timeout`. Completion order is not significant; the result
/// carries one entry per notification.
#[tracing::instrument(skip_all, fields(notifications = notifications.len()))]
pub async fn dispatch_all<T: AlertTransport>(
    transport: &T,
    from: &Mailbox,
    notifications: Vec<Notification>,
    send_timeout: Duration,
    max_concurrency: usize,
    deadline: Option<Instant>,
) -> Vec<DispatchResult> {
    futures::stream::iter(notifications.into_iter().map(|notification| {
        let from = from.clone();
        async move { send_one(transport, from, notification, send_timeout, deadline).await }
    }))
    .buffer_unordered(max_concurrency.max(1))
    .collect()
    .await
}

async fn send_one<T: AlertTransport>(
    transport: &T,
    from: Mailbox,
    notification: Notification,
    send_timeout: Duration,
    deadline: Option<Instant>,
) -> DispatchResult {
    let order_id = notification.order_id;
    let severity = notification.severity;
    let recipient = notification.recipient.email.to_string();

    if deadline.is_some_and(|d| Instant::now() >= d) {
        return DispatchResult {
            order_id,
            severity,
            recipient,
            outcome: Err(DispatchError::Deadline),
        };
    }

    let message = match Message::builder()
        .from(from)
        .to(notification.recipient)
        .subject(notification.subject)
        .header(ContentType::TEXT_PLAIN)
        .header(lettre::message::header::MIME_VERSION_1_0)
        .message_id(None)
        .body(notification.body)
    {
        Ok(message) => message,
        Err(e) => {
            return DispatchResult {
                order_id,
                severity,
                recipient,
                outcome: Err(DispatchError::Message(e.to_string())),
            };
        }
    };

    let outcome = match tokio::time::timeout(send_timeout, transport.deliver(message)).await {
        Ok(result) => result,
        Err(_) => Err(DispatchError::Timeout(send_timeout)),
    };

    match &outcome {
        Ok(_) => {
            tracing::info!(
                name = "sla.dispatch.sent",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Sent SLA notification",
                order_id = %order_id,
                severity = %severity,
                recipient = %recipient,
            );
        }
        Err(e) => {
            tracing::error!(
                name = "sla.dispatch.failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Failed to send SLA notification",
                order_id = %order_id,
                severity = %severity,
                recipient = %recipient,
                error = %e,
            );
        }
    }

    DispatchResult {
        order_id,
        severity,
        recipient,
        outcome,
    }
}
