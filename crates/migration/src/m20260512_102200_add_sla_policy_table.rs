use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// SLA policy table, one row per service type, seeded with the default
/// windows. The unique index keeps the category → policy lookup unambiguous.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SlaPolicy::Table)
                    .if_not_exists()
                    .col(pk_auto(SlaPolicy::Id))
                    .col(string_len(SlaPolicy::ServiceType, 32))
                    .col(integer(SlaPolicy::TotalDurationDays))
                    .col(double(SlaPolicy::WarningThresholdPercent))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_sla_policy_service_type_unique")
                    .table(SlaPolicy::Table)
                    .col(SlaPolicy::ServiceType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(SlaPolicy::Table)
            .columns([
                SlaPolicy::ServiceType,
                SlaPolicy::TotalDurationDays,
                SlaPolicy::WarningThresholdPercent,
            ])
            .values_panic(["legal_warranty".into(), 5.into(), 80.0.into()])
            .values_panic(["offered_warranty".into(), 3.into(), 80.0.into()])
            .values_panic(["preventive_maintenance".into(), 7.into(), 75.0.into()])
            .values_panic(["new_service".into(), 10.into(), 70.0.into()])
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sla_policy_service_type_unique")
                    .table(SlaPolicy::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SlaPolicy::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SlaPolicy {
    Table,
    Id,
    ServiceType,
    TotalDurationDays,
    WarningThresholdPercent,
}
