//! SLA deadline monitoring and notification dispatch for maintenance
//! service orders.
//!
//! Periodically scans open service orders, computes how much of each order's
//! SLA window has elapsed, and emails warning or breach notifications to the
//! order's requester, isolating per-recipient delivery failures and
//! reporting every outcome per run.

use std::sync::Arc;

use lettre::{AsyncSmtpTransport, Tokio1Executor};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

pub mod config;
pub mod email_templates;
pub mod entity;
pub mod error;
pub mod sla;

#[derive(Clone)]
pub struct AppResources {
    pub db: Arc<DatabaseConnection>,
    pub mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    pub config: Arc<AppConfig>,
}
