//! Create `service_record` table with FKs to `car` and `package`.
//!
//! Deleting either parent removes its records.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRecord::Table)
                    .if_not_exists()
                    .col(string_len(ServiceRecord::RecordNumber, 20).primary_key())
                    .col(date(ServiceRecord::ServiceDate).not_null())
                    .col(string_len(ServiceRecord::PlateNumber, 20).not_null())
                    .col(string_len(ServiceRecord::PackageNumber, 20).not_null())
                    .col(timestamp_with_time_zone(ServiceRecord::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_car")
                            .from(ServiceRecord::Table, ServiceRecord::PlateNumber)
                            .to(Car::Table, Car::PlateNumber)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_package")
                            .from(ServiceRecord::Table, ServiceRecord::PackageNumber)
                            .to(Package::Table, Package::PackageNumber)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord { Table, RecordNumber, ServiceDate, PlateNumber, PackageNumber, CreatedAt }

#[derive(DeriveIden)]
enum Car { Table, PlateNumber }

#[derive(DeriveIden)]
enum Package { Table, PackageNumber }
