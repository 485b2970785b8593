use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Add notification log table to track all SLA alerts sent over time
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationLog::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationLog::Id))
                    .col(uuid(NotificationLog::OrderId))
                    .col(string(NotificationLog::Email))
                    .col(string_len(NotificationLog::Severity, 16))
                    .col(string_null(NotificationLog::ProviderMessageId))
                    .col(
                        timestamp_with_time_zone(NotificationLog::SentAt)
                            .default(Expr::current_timestamp()),
                    )
                    .index(
                        Index::create()
                            .name("idx_notification_log_sent_at")
                            .col(NotificationLog::SentAt),
                    )
                    .index(
                        Index::create()
                            .name("idx_notification_log_order_id")
                            .col(NotificationLog::OrderId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum NotificationLog {
    Table,
    Id,
    OrderId,
    Email,
    Severity,
    ProviderMessageId,
    SentAt,
}
