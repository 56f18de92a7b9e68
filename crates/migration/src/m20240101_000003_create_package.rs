//! Create `package` table; keys are generated `PK-` identifiers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Package::Table)
                    .if_not_exists()
                    .col(string_len(Package::PackageNumber, 20).primary_key())
                    .col(string_len(Package::PackageName, 100).not_null())
                    .col(text(Package::PackageDescription).not_null().default(""))
                    .col(double(Package::PackagePrice).not_null())
                    .col(timestamp_with_time_zone(Package::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Package::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Package { Table, PackageNumber, PackageName, PackageDescription, PackagePrice, CreatedAt }
