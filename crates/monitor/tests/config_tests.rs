//! Tests for configuration parsing, defaults, and validation.

use sla_monitor::config::{AlertsConfig, AppConfig, ConfigError, SmtpConfig, validate};
use sla_monitor::sla::RunSettings;
use std::time::Duration;

fn base_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        smtp: SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: "alerts".to_string(),
            password: "secret".to_string(),
            from: "Maintenance Desk <alerts@example.com>".to_string(),
        },
        alerts: AlertsConfig::default(),
    }
}

#[test]
fn alerts_defaults() {
    let alerts = AlertsConfig::default();
    assert_eq!(alerts.check_interval_secs, 300);
    assert_eq!(alerts.dispatch_timeout_secs, 30);
    assert_eq!(alerts.max_concurrency, 8);
    assert_eq!(alerts.reminder_interval_hours, 24);
    assert!(alerts.run_deadline_secs.is_none());
}

#[test]
fn valid_config_passes_validation() {
    assert!(validate(&base_config()).is_ok());
}

#[test]
fn zero_smtp_port_is_rejected() {
    let mut config = base_config();
    config.smtp.port = 0;

    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("smtp.port"));
}

#[test]
fn unparsable_from_address_is_rejected() {
    let mut config = base_config();
    config.smtp.from = "not a mailbox".to_string();

    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("smtp.from"));
}

#[test]
fn zero_max_concurrency_is_rejected() {
    let mut config = base_config();
    config.alerts.max_concurrency = 0;

    assert!(validate(&config).is_err());
}

#[test]
fn zero_dispatch_timeout_is_rejected() {
    let mut config = base_config();
    config.alerts.dispatch_timeout_secs = 0;

    assert!(validate(&config).is_err());
}

#[test]
fn yaml_without_alerts_section_uses_defaults() {
    let yaml = r#"
database_url: "postgres://localhost/maintenance"
smtp:
  server: smtp.example.com
  port: 587
  username: alerts
  password: secret
  from: "alerts@example.com"
"#;
    let cfg = config::Config::builder()
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .build()
        .unwrap();

    let app: AppConfig = cfg.try_deserialize().unwrap();
    assert_eq!(app.alerts.check_interval_secs, 300);
    assert_eq!(app.alerts.max_concurrency, 8);
    assert!(validate(&app).is_ok());
}

#[test]
fn yaml_alerts_overrides_are_applied() {
    let yaml = r#"
database_url: "postgres://localhost/maintenance"
smtp:
  server: smtp.example.com
  port: 587
  username: alerts
  password: secret
  from: "alerts@example.com"
alerts:
  check_interval_secs: 60
  dispatch_timeout_secs: 10
  max_concurrency: 16
  reminder_interval_hours: 12
  run_deadline_secs: 120
"#;
    let cfg = config::Config::builder()
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .build()
        .unwrap();

    let app: AppConfig = cfg.try_deserialize().unwrap();
    assert_eq!(app.alerts.check_interval_secs, 60);
    assert_eq!(app.alerts.dispatch_timeout_secs, 10);
    assert_eq!(app.alerts.max_concurrency, 16);
    assert_eq!(app.alerts.reminder_interval_hours, 12);
    assert_eq!(app.alerts.run_deadline_secs, Some(120));
}

#[test]
fn run_settings_are_derived_from_alert_config() {
    let alerts = AlertsConfig {
        check_interval_secs: 300,
        dispatch_timeout_secs: 10,
        max_concurrency: 16,
        reminder_interval_hours: 12,
        run_deadline_secs: Some(120),
    };

    let settings = RunSettings::from_config(&alerts);

    assert_eq!(settings.send_timeout, Duration::from_secs(10));
    assert_eq!(settings.max_concurrency, 16);
    assert_eq!(settings.reminder_interval, time::Duration::hours(12));
    assert_eq!(settings.run_deadline, Some(Duration::from_secs(120)));
}
