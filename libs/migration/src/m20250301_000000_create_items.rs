use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        big_integer(Items::Id)
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Items::Name, 100))
                    .col(string_len(Items::Category, 50))
                    .col(string_len(Items::Brand, 100))
                    .col(big_integer(Items::PurchasePrice))
                    .col(text(Items::PurchaseDate))
                    .col(
                        timestamp_with_time_zone(Items::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Items::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE items ADD CONSTRAINT items_purchase_price_non_negative CHECK (purchase_price >= 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Name,
    Category,
    Brand,
    PurchasePrice,
    PurchaseDate,
    CreatedAt,
    UpdatedAt,
}
