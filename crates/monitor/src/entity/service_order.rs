//! Service order entity.
//!
//! The engine reads candidate orders from this table and writes back the
//! last-alert tracking columns after a successful dispatch.

use crate::sla::classify::AlertSeverity;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Category of maintenance work. Each category maps to exactly one SLA policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[sea_orm(string_value = "legal_warranty")]
    LegalWarranty,
    #[sea_orm(string_value = "offered_warranty")]
    OfferedWarranty,
    #[sea_orm(string_value = "preventive_maintenance")]
    PreventiveMaintenance,
    #[sea_orm(string_value = "new_service")]
    NewService,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceType::LegalWarranty => "legal_warranty",
            ServiceType::OfferedWarranty => "offered_warranty",
            ServiceType::PreventiveMaintenance => "preventive_maintenance",
            ServiceType::NewService => "new_service",
        };
        f.write_str(s)
    }
}

/// Lifecycle status of a service order. Only `Open` and `InProgress` orders
/// are candidates for SLA monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "budget_pending")]
    BudgetPending,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub service_type: ServiceType,
    pub status: OrderStatus,
    /// Deadline for resolving the order. Orders without one are never monitored.
    pub due_at: Option<OffsetDateTime>,
    pub requester_name: String,
    pub requester_email: Option<String>,
    /// Severity of the last successfully dispatched alert, if any.
    pub last_alert_severity: Option<AlertSeverity>,
    pub last_alert_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Model {
    /// First 8 hex characters of the order id, as displayed in notifications
    /// and logs.
    pub fn short_ref(&self) -> String {
        self.id.simple().to_string().chars().take(8).collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
