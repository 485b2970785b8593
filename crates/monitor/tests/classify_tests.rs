//! Tests for alert classification and the re-alert gate.

use sla_monitor::entity::service_order::{self, OrderStatus, ServiceType};
use sla_monitor::sla::{
    AlertSeverity, Classification, DeadlineEval, SlaPolicy, classify, should_notify,
};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

fn policy(threshold: f64) -> SlaPolicy {
    SlaPolicy {
        total_duration_days: 2,
        warning_threshold_percent: threshold,
    }
}

fn eval(hours_remaining: f64, percent_consumed: f64) -> DeadlineEval {
    DeadlineEval {
        hours_remaining,
        percent_consumed,
    }
}

fn test_order(
    last_alert_severity: Option<AlertSeverity>,
    last_alert_at: Option<OffsetDateTime>,
) -> service_order::Model {
    service_order::Model {
        id: Uuid::new_v4(),
        title: "Leaking pipe in unit 402".to_string(),
        service_type: ServiceType::LegalWarranty,
        status: OrderStatus::Open,
        due_at: Some(OffsetDateTime::now_utc() + Duration::hours(4)),
        requester_name: "Ana Souza".to_string(),
        requester_email: Some("ana@example.com".to_string()),
        last_alert_severity,
        last_alert_at,
        created_at: OffsetDateTime::now_utc(),
    }
}

// =============================================================================
// classify Tests
// =============================================================================

#[test]
fn past_deadline_is_always_breach() {
    assert_eq!(
        classify(&eval(-5.0, 110.4), &policy(80.0)),
        Classification::Breach
    );
    // Even with a threshold no warning could ever reach
    assert_eq!(
        classify(&eval(-5.0, 110.4), &policy(100.0)),
        Classification::Breach
    );
}

#[test]
fn exactly_zero_hours_remaining_is_breach() {
    assert_eq!(
        classify(&eval(0.0, 100.0), &policy(80.0)),
        Classification::Breach
    );
}

#[test]
fn breach_wins_when_warning_also_matches() {
    // Overdue orders have necessarily crossed the warning threshold too
    let classification = classify(&eval(-1.0, 102.0), &policy(80.0));
    assert_eq!(classification, Classification::Breach);
    assert_eq!(classification.severity(), Some(AlertSeverity::Breach));
}

#[test]
fn threshold_boundary_is_inclusive() {
    assert_eq!(
        classify(&eval(24.0, 50.0), &policy(50.0)),
        Classification::Warning
    );
}

#[test]
fn above_threshold_and_not_due_is_warning() {
    let classification = classify(&eval(8.0, 83.333), &policy(80.0));
    assert_eq!(classification, Classification::Warning);
    assert_eq!(classification.severity(), Some(AlertSeverity::Warning));
}

#[test]
fn below_threshold_is_nominal() {
    let classification = classify(&eval(40.0, 16.6), &policy(80.0));
    assert_eq!(classification, Classification::Nominal);
    assert_eq!(classification.severity(), None);
}

#[test]
fn just_below_threshold_is_nominal() {
    assert_eq!(
        classify(&eval(10.0, 79.999), &policy(80.0)),
        Classification::Nominal
    );
}

// =============================================================================
// should_notify Tests
// =============================================================================

#[test]
fn first_alert_always_notifies() {
    let now = OffsetDateTime::now_utc();
    let order = test_order(None, None);

    assert!(should_notify(
        &order,
        AlertSeverity::Warning,
        now,
        Duration::hours(24)
    ));
}

#[test]
fn severity_escalation_notifies_immediately() {
    let now = OffsetDateTime::now_utc();
    // Warned minutes ago, but the order has since breached
    let order = test_order(
        Some(AlertSeverity::Warning),
        Some(now - Duration::minutes(10)),
    );

    assert!(should_notify(
        &order,
        AlertSeverity::Breach,
        now,
        Duration::hours(24)
    ));
}

#[test]
fn same_severity_within_window_is_suppressed() {
    let now = OffsetDateTime::now_utc();
    let order = test_order(Some(AlertSeverity::Warning), Some(now - Duration::hours(1)));

    assert!(!should_notify(
        &order,
        AlertSeverity::Warning,
        now,
        Duration::hours(24)
    ));
}

#[test]
fn same_severity_past_window_sends_reminder() {
    let now = OffsetDateTime::now_utc();
    let order = test_order(Some(AlertSeverity::Breach), Some(now - Duration::hours(25)));

    assert!(should_notify(
        &order,
        AlertSeverity::Breach,
        now,
        Duration::hours(24)
    ));
}

#[test]
fn reminder_window_boundary_is_inclusive() {
    let now = OffsetDateTime::now_utc();
    let order = test_order(Some(AlertSeverity::Warning), Some(now - Duration::hours(24)));

    assert!(should_notify(
        &order,
        AlertSeverity::Warning,
        now,
        Duration::hours(24)
    ));
}

#[test]
fn same_severity_without_timestamp_notifies() {
    let now = OffsetDateTime::now_utc();
    let order = test_order(Some(AlertSeverity::Warning), None);

    assert!(should_notify(
        &order,
        AlertSeverity::Warning,
        now,
        Duration::hours(24)
    ));
}
