use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOrder::Table)
                    .if_not_exists()
                    .col(pk_uuid(ServiceOrder::Id))
                    .col(string(ServiceOrder::Title))
                    .col(string_len(ServiceOrder::ServiceType, 32))
                    .col(string_len(ServiceOrder::Status, 16))
                    .col(timestamp_with_time_zone_null(ServiceOrder::DueAt))
                    .col(string(ServiceOrder::RequesterName))
                    .col(string_null(ServiceOrder::RequesterEmail))
                    .col(
                        timestamp_with_time_zone(ServiceOrder::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;
        // The monitor scans by status + presence of a deadline
        manager
            .create_index(
                Index::create()
                    .name("idx_service_order_status_due_at")
                    .table(ServiceOrder::Table)
                    .col(ServiceOrder::Status)
                    .col(ServiceOrder::DueAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_service_order_status_due_at")
                    .table(ServiceOrder::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceOrder::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ServiceOrder {
    Table,
    Id,
    Title,
    ServiceType,
    Status,
    DueAt,
    RequesterName,
    RequesterEmail,
    CreatedAt,
}
