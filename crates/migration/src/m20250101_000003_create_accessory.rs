//! Create `accessory` table with FK to `car`; rows go away with their car.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accessory::Table)
                    .if_not_exists()
                    .col(uuid(Accessory::Id).primary_key())
                    .col(uuid(Accessory::CarId).not_null())
                    .col(string_len(Accessory::Name, 128).not_null())
                    .col(text_null(Accessory::Description))
                    .col(boolean(Accessory::Available).not_null())
                    .col(timestamp_with_time_zone(Accessory::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accessory_car")
                            .from(Accessory::Table, Accessory::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Accessory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Accessory { Table, Id, CarId, Name, Description, Available, CreatedAt }

#[derive(DeriveIden)]
enum Car { Table, Id }
