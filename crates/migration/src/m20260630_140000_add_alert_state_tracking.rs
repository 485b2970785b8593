use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Add per-order last-alert tracking so repeat alerts of the same severity
/// can be suppressed until the reminder window elapses.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One column per statement, sqlite does not batch ADD COLUMN
        manager
            .alter_table(
                Table::alter()
                    .table(ServiceOrder::Table)
                    .add_column(string_len_null(ServiceOrder::LastAlertSeverity, 16))
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(ServiceOrder::Table)
                    .add_column(timestamp_with_time_zone_null(ServiceOrder::LastAlertAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(ServiceOrder::Table)
                    .drop_column(ServiceOrder::LastAlertSeverity)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(ServiceOrder::Table)
                    .drop_column(ServiceOrder::LastAlertAt)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum ServiceOrder {
    Table,
    LastAlertSeverity,
    LastAlertAt,
}
