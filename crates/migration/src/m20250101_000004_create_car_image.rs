//! Create `car_image` table storing image URLs per car.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarImage::Table)
                    .if_not_exists()
                    .col(uuid(CarImage::Id).primary_key())
                    .col(uuid(CarImage::CarId).not_null())
                    .col(string_len(CarImage::ImageUrl, 1024).not_null())
                    .col(timestamp_with_time_zone(CarImage::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_image_car")
                            .from(CarImage::Table, CarImage::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CarImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CarImage { Table, Id, CarId, ImageUrl, CreatedAt }

#[derive(DeriveIden)]
enum Car { Table, Id }
