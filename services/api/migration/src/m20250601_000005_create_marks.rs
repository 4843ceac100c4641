use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `favorites` and `shopping_carts` share one layout.
fn mark_table(table: Marks) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Marks::UserId).integer().not_null())
        .col(ColumnDef::new(Marks::RecipeId).integer().not_null())
        .col(
            ColumnDef::new(Marks::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(Index::create().col(Marks::UserId).col(Marks::RecipeId))
        .foreign_key(
            ForeignKey::create()
                .from(table, Marks::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, Marks::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(mark_table(Marks::Favorites)).await?;
        manager
            .create_table(mark_table(Marks::ShoppingCarts))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Marks::ShoppingCarts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Favorites).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Marks {
    Favorites,
    ShoppingCarts,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
