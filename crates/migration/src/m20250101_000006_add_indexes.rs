use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Accessory: lookups by owning car
        manager
            .create_index(
                Index::create()
                    .name("idx_accessory_car")
                    .table(Accessory::Table)
                    .col(Accessory::CarId)
                    .to_owned(),
            )
            .await?;

        // CarImage: lookups by owning car
        manager
            .create_index(
                Index::create()
                    .name("idx_car_image_car")
                    .table(CarImage::Table)
                    .col(CarImage::CarId)
                    .to_owned(),
            )
            .await?;

        // Car: availability listing
        manager
            .create_index(
                Index::create()
                    .name("idx_car_available")
                    .table(Car::Table)
                    .col(Car::Available)
                    .to_owned(),
            )
            .await?;

        // RentalRequest: status filter
        manager
            .create_index(
                Index::create()
                    .name("idx_rental_request_status")
                    .table(RentalRequest::Table)
                    .col(RentalRequest::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_accessory_car").table(Accessory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_car_image_car").table(CarImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_car_available").table(Car::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rental_request_status").table(RentalRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accessory { Table, CarId }

#[derive(DeriveIden)]
enum CarImage { Table, CarId }

#[derive(DeriveIden)]
enum Car { Table, Available }

#[derive(DeriveIden)]
enum RentalRequest { Table, Status }
