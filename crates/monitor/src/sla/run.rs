//! Run orchestrator.
//!
//! One invocation walks Fetch → Evaluate → Dispatch → Record → Report. Runs
//! are stateless and independent apart from the per-order last-alert columns
//! written after successful sends; only a Fetch failure aborts a run.

use crate::config::AlertsConfig;
use crate::entity::notification_log;
use crate::entity::service_order::{self, OrderStatus};
use crate::error::{FetchError, RunError};
use crate::sla::classify::{self, AlertEvent, AlertSeverity};
use crate::sla::compose::{self, Notification};
use crate::sla::deadline;
use crate::sla::dispatch::{AlertTransport, dispatch_all};
use crate::sla::policy::PolicyStore;
use crate::sla::report::{
    FailedNotification, RunReport, SentNotification, SkipReason, SkippedOrder,
};
use lettre::message::Mailbox;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use uuid::Uuid;

/// Engine knobs for one run, distilled from [`AlertsConfig`].
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Bound on each individual send.
    pub send_timeout: Duration,
    /// Dispatch workers in flight at once.
    pub max_concurrency: usize,
    /// Suppression window for repeat alerts of the same severity.
    pub reminder_interval: time::Duration,
    /// Optional bound on the whole run.
    pub run_deadline: Option<Duration>,
}

impl RunSettings {
    pub fn from_config(config: &AlertsConfig) -> Self {
        Self {
            send_timeout: Duration::from_secs(config.dispatch_timeout_secs),
            max_concurrency: config.max_concurrency,
            reminder_interval: time::Duration::hours(config.reminder_interval_hours as i64),
            run_deadline: config.run_deadline_secs.map(Duration::from_secs),
        }
    }
}

/// Loads the candidate set: open or in-progress orders with a deadline.
#[tracing::instrument(skip_all)]
pub async fn fetch_candidates(
    db: &DatabaseConnection,
) -> Result<Vec<service_order::Model>, FetchError> {
    service_order::Entity::find()
        .filter(
            service_order::Column::Status.is_in([OrderStatus::Open, OrderStatus::InProgress]),
        )
        .filter(service_order::Column::DueAt.is_not_null())
        .all(db)
        .await
        .map_err(FetchError::Orders)
}

/// Evaluates every candidate order, producing composed notifications for the
/// ones that must alert and a skip entry for each of the rest.
///
/// Per-order failures (missing or malformed policy, undeliverable recipient)
/// become skip entries; they never abort evaluation of the remaining orders.
pub fn evaluate_orders(
    orders: &[service_order::Model],
    policies: &PolicyStore,
    now: OffsetDateTime,
    reminder_interval: time::Duration,
    deadline: Option<Instant>,
) -> (Vec<Notification>, Vec<SkippedOrder>) {
    let mut notifications = Vec::new();
    let mut skipped = Vec::new();

    for order in orders {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            skipped.push(SkippedOrder {
                order_id: order.id,
                reason: SkipReason::RunDeadlineExceeded,
                detail: None,
            });
            continue;
        }

        // The fetch filter excludes deadline-less orders; anything without a
        // due_at here is not a candidate at all.
        let Some(due_at) = order.due_at else {
            tracing::debug!(order_id = %order.id, "order has no deadline, not a candidate");
            continue;
        };

        let Some(policy) = policies.lookup(order.service_type) else {
            tracing::info!(
                name = "sla.evaluate.no_policy",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Skipping order without SLA policy",
                order_id = %order.id,
                service_type = %order.service_type,
            );
            skipped.push(SkippedOrder {
                order_id: order.id,
                reason: SkipReason::NoPolicy,
                detail: Some(format!("service type {}", order.service_type)),
            });
            continue;
        };

        let eval = match deadline::evaluate(now, due_at, policy) {
            Ok(eval) => eval,
            Err(e) => {
                tracing::warn!(
                    name = "sla.evaluate.invalid_policy",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    message = "Skipping order with malformed SLA policy",
                    order_id = %order.id,
                    service_type = %order.service_type,
                    error = %e,
                );
                skipped.push(SkippedOrder {
                    order_id: order.id,
                    reason: SkipReason::InvalidPolicy,
                    detail: Some(e.to_string()),
                });
                continue;
            }
        };

        let Some(severity) = classify::classify(&eval, policy).severity() else {
            skipped.push(SkippedOrder {
                order_id: order.id,
                reason: SkipReason::WithinSla,
                detail: None,
            });
            continue;
        };

        if !classify::should_notify(order, severity, now, reminder_interval) {
            skipped.push(SkippedOrder {
                order_id: order.id,
                reason: SkipReason::AlreadyNotified,
                detail: Some(severity.to_string()),
            });
            continue;
        }

        let event = AlertEvent {
            order_id: order.id,
            severity,
            hours_remaining: eval.hours_remaining,
            percent_consumed: eval.percent_consumed,
            recipient: order.requester_email.clone().unwrap_or_default(),
        };

        match compose::compose(order, &event) {
            Ok(notification) => notifications.push(notification),
            Err(e) => {
                tracing::info!(
                    name = "sla.evaluate.no_recipient",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    message = "Skipping order without deliverable recipient",
                    order_id = %order.id,
                    error = %e,
                );
                skipped.push(SkippedOrder {
                    order_id: order.id,
                    reason: SkipReason::NoRecipient,
                    detail: Some(e.to_string()),
                });
            }
        }
    }

    (notifications, skipped)
}

/// Drives one complete run at `now` and returns its report.
#[tracing::instrument(skip_all)]
pub async fn run<T: AlertTransport>(
    db: &DatabaseConnection,
    transport: &T,
    from: &Mailbox,
    settings: &RunSettings,
    now: OffsetDateTime,
) -> Result<RunReport, RunError> {
    let deadline = settings.run_deadline.map(|d| Instant::now() + d);

    let policies = PolicyStore::load(db).await?;
    let orders = fetch_candidates(db).await?;
    let evaluated = orders.len();
    tracing::info!(
        name = "sla.run.started",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "Starting SLA run",
        candidates = evaluated,
        policies = policies.len(),
    );

    let (notifications, skipped) =
        evaluate_orders(&orders, &policies, now, settings.reminder_interval, deadline);
    let alerted = notifications.len();

    let results = dispatch_all(
        transport,
        from,
        notifications,
        settings.send_timeout,
        settings.max_concurrency,
        deadline,
    )
    .await;

    let mut report = RunReport {
        evaluated,
        alerted,
        sent: Vec::new(),
        failed: Vec::new(),
        skipped,
    };

    for result in results {
        match result.outcome {
            Ok(provider_message_id) => {
                record_dispatch(
                    db,
                    result.order_id,
                    result.severity,
                    &result.recipient,
                    &provider_message_id,
                    now,
                )
                .await;
                report.sent.push(SentNotification {
                    order_id: result.order_id,
                    recipient: result.recipient,
                    severity: result.severity,
                    provider_message_id,
                });
            }
            Err(e) => {
                report.failed.push(FailedNotification {
                    order_id: result.order_id,
                    recipient: result.recipient,
                    severity: result.severity,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        name = "sla.run.finished",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "SLA run finished",
        evaluated = report.evaluated,
        alerted = report.alerted,
        sent = report.sent.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
    );

    Ok(report)
}

/// Records a successful dispatch: last-alert state on the order, plus an
/// audit row. Both writes are best-effort; failures are logged and never
/// affect the run outcome.
#[tracing::instrument(skip(db))]
async fn record_dispatch(
    db: &DatabaseConnection,
    order_id: Uuid,
    severity: AlertSeverity,
    recipient: &str,
    provider_message_id: &str,
    now: OffsetDateTime,
) {
    match service_order::Entity::find_by_id(order_id).one(db).await {
        Ok(Some(model)) => {
            let mut active: service_order::ActiveModel = model.into();
            active.last_alert_severity = ActiveValue::Set(Some(severity));
            active.last_alert_at = ActiveValue::Set(Some(now));
            if let Err(e) = active.update(db).await {
                tracing::error!(
                    name = "sla.record.state_update_failed",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    message = "Failed to record last alert state",
                    order_id = %order_id,
                    error = %e,
                );
            }
        }
        Ok(None) => {
            tracing::warn!(
                name = "sla.record.order_missing",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Order disappeared before alert state update",
                order_id = %order_id,
            );
        }
        Err(e) => {
            tracing::error!(
                name = "sla.record.state_lookup_failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Failed to load order for alert state update",
                order_id = %order_id,
                error = %e,
            );
        }
    }

    let entry = notification_log::ActiveModel {
        id: ActiveValue::NotSet,
        order_id: ActiveValue::Set(order_id),
        email: ActiveValue::Set(recipient.to_string()),
        severity: ActiveValue::Set(severity),
        provider_message_id: ActiveValue::Set(Some(provider_message_id.to_string())),
        sent_at: ActiveValue::Set(now),
    };
    if let Err(e) = entry.insert(db).await {
        tracing::error!(
            name = "sla.record.log_insert_failed",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Failed to insert notification log row",
            order_id = %order_id,
            error = %e,
        );
    }
}
