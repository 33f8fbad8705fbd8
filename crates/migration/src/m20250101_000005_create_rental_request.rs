//! Create `rental_request` table.
//! Customer name/phone/email hold ciphertext, hence TEXT columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RentalRequest::Table)
                    .if_not_exists()
                    .col(uuid(RentalRequest::Id).primary_key())
                    .col(text(RentalRequest::CustomerName).not_null())
                    .col(text(RentalRequest::PhoneNumber).not_null())
                    .col(text(RentalRequest::Email).not_null())
                    .col(string_len_null(RentalRequest::CarModel, 256))
                    .col(date_time(RentalRequest::PickupDateTime).not_null())
                    .col(date_time(RentalRequest::DropDateTime).not_null())
                    .col(string_len(RentalRequest::Status, 16).not_null())
                    .col(text_null(RentalRequest::RejectionReason))
                    .col(timestamp_with_time_zone(RentalRequest::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(RentalRequest::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RentalRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RentalRequest {
    Table,
    Id,
    CustomerName,
    PhoneNumber,
    Email,
    CarModel,
    PickupDateTime,
    DropDateTime,
    Status,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
