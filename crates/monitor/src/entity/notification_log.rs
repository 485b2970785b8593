//! Per-recipient notification audit log.
//!
//! Records the address, severity, and timing of every alert successfully
//! handed to the email provider. Insert failures are logged by the caller and
//! never affect the run outcome.

use crate::sla::classify::AlertSeverity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: Uuid,
    pub email: String,
    pub severity: AlertSeverity,
    /// Acknowledgment line returned by the provider for the accepted message.
    pub provider_message_id: Option<String>,
    pub sent_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
