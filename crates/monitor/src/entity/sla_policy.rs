//! SLA policy configuration rows, one per service type.
//!
//! Administratively configured; the engine only ever reads this table. A
//! unique index on `service_type` keeps the category → policy lookup
//! unambiguous.

use super::service_order::ServiceType;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sla_policy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_type: ServiceType,
    /// Total allowed resolution window, in whole days.
    pub total_duration_days: i32,
    /// Fraction of the window (0–100] that triggers a warning once consumed.
    pub warning_threshold_percent: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
