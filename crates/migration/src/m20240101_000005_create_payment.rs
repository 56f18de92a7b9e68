//! Create `payment` table with FK to `service_record`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(string_len(Payment::PaymentNumber, 20).primary_key())
                    .col(double(Payment::AmountPaid).not_null())
                    .col(date(Payment::PaymentDate).not_null())
                    .col(string_len(Payment::RecordNumber, 20).not_null())
                    .col(timestamp_with_time_zone(Payment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_service_record")
                            .from(Payment::Table, Payment::RecordNumber)
                            .to(ServiceRecord::Table, ServiceRecord::RecordNumber)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment { Table, PaymentNumber, AmountPaid, PaymentDate, RecordNumber, CreatedAt }

#[derive(DeriveIden)]
enum ServiceRecord { Table, RecordNumber }
