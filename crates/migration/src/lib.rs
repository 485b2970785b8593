pub use sea_orm_migration::prelude::*;

mod m20260512_101500_add_service_order_table;
mod m20260512_102200_add_sla_policy_table;
mod m20260630_140000_add_alert_state_tracking;
mod m20260704_090000_add_notification_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260512_101500_add_service_order_table::Migration),
            Box::new(m20260512_102200_add_sla_policy_table::Migration),
            Box::new(m20260630_140000_add_alert_state_tracking::Migration),
            Box::new(m20260704_090000_add_notification_log::Migration),
        ]
    }
}
