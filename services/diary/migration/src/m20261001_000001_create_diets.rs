use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Diets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Diets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Diets::TraineeId).uuid().not_null())
                    .col(ColumnDef::new(Diets::Content).text().not_null())
                    .col(ColumnDef::new(Diets::ImagePath).string().null())
                    .col(
                        ColumnDef::new(Diets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Diets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Diets {
    Table,
    Id,
    TraineeId,
    Content,
    ImagePath,
    CreatedAt,
}
