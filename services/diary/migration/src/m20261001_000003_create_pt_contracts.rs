use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PtContracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PtContracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PtContracts::TrainerId).uuid().not_null())
                    .col(ColumnDef::new(PtContracts::TraineeId).uuid().not_null())
                    .col(
                        ColumnDef::new(PtContracts::RemainingSessions)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(PtContracts::RemainingSessions).gte(0)),
                    )
                    .col(
                        ColumnDef::new(PtContracts::UpdatedAt)
                            .date()
                            .not_null()
                            .default(Expr::current_date()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PtContracts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PtContracts {
    Table,
    Id,
    TrainerId,
    TraineeId,
    RemainingSessions,
    UpdatedAt,
}
