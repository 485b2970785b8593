use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, Tokio1Executor, transport::smtp::authentication::Credentials};
use sea_orm::Database;
use sla_monitor::AppResources;
use sla_monitor::config::load_config_or_panic;
use sla_monitor::sla::{self, RunSettings};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::time::{Duration, interval};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing() {
    let default_directives = "sla_monitor=info,sea_orm=info";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(true).with_level(true);

    registry.with(layer).init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install().expect("Failed to install `color_eyre::install`");
    initialize_tracing();

    // Load config
    let config = Arc::new(load_config_or_panic());

    // Set up SeaORM database connection
    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .expect("Failed to connect to database"),
    );

    // Set up lettre SMTP client
    let creds = Credentials::new(config.smtp.username.clone(), config.smtp.password.clone());
    let mailer = Arc::new(
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp.server)
            .expect("Failed to build SMTP transport")
            .port(config.smtp.port)
            .credentials(creds)
            .build(),
    );

    // Validated at config load, cannot fail here
    let from: Mailbox = config
        .smtp
        .from
        .parse()
        .expect("smtp.from was validated at startup");
    let settings = RunSettings::from_config(&config.alerts);

    let resources = AppResources {
        db,
        mailer,
        config,
    };
    tracing::info!(
        check_interval_secs = resources.config.alerts.check_interval_secs,
        max_concurrency = resources.config.alerts.max_concurrency,
        reminder_interval_hours = resources.config.alerts.reminder_interval_hours,
        "SLA monitor started"
    );

    // Each tick is one independent, stateless run
    let mut ticker = interval(Duration::from_secs(
        resources.config.alerts.check_interval_secs,
    ));
    loop {
        ticker.tick().await;
        let now = OffsetDateTime::now_utc();
        match sla::run(
            resources.db.as_ref(),
            resources.mailer.as_ref(),
            &from,
            &settings,
            now,
        )
        .await
        {
            Ok(report) => {
                tracing::info!(
                    evaluated = report.evaluated,
                    alerted = report.alerted,
                    sent = report.sent.len(),
                    failed = report.failed.len(),
                    skipped = report.skipped.len(),
                    "SLA run completed"
                );
                tracing::debug!(
                    report = %serde_json::to_string(&report).unwrap_or_default(),
                    "SLA run report"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "SLA run aborted");
            }
        }
    }
}
