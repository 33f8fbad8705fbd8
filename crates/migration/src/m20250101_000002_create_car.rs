//! Create `car` table.
//! Descriptive columns are nullable; brand/model are required by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(uuid(Car::Id).primary_key())
                    .col(string_len(Car::Brand, 128).not_null())
                    .col(string_len(Car::Model, 128).not_null())
                    .col(string_len_null(Car::Fuel, 64))
                    .col(string_len_null(Car::CarType, 64))
                    .col(string_len_null(Car::PlateNumber, 32))
                    .col(string_len_null(Car::MainLocation, 128))
                    .col(string_len_null(Car::Color, 64))
                    .col(string_len_null(Car::Transmission, 64))
                    .col(integer_null(Car::Year))
                    .col(integer_null(Car::Passengers))
                    .col(integer_null(Car::NoOfAirBags))
                    .col(text_null(Car::Description))
                    .col(double_null(Car::DailyPrice))
                    .col(double_null(Car::WeeklyPrice))
                    .col(double_null(Car::MonthlyPrice))
                    .col(boolean(Car::Available).not_null())
                    .col(timestamp_with_time_zone(Car::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Car::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    Brand,
    Model,
    Fuel,
    CarType,
    PlateNumber,
    MainLocation,
    Color,
    Transmission,
    Year,
    Passengers,
    NoOfAirBags,
    Description,
    DailyPrice,
    WeeklyPrice,
    MonthlyPrice,
    Available,
    CreatedAt,
    UpdatedAt,
}
