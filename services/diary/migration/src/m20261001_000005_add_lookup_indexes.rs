use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Diets::Table)
                    .col(Diets::TraineeId)
                    .col(Diets::CreatedAt)
                    .name("idx_diets_trainee_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::DietId)
                    .name("idx_comments_diet_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(PtContracts::Table)
                    .col(PtContracts::TrainerId)
                    .col(PtContracts::TraineeId)
                    .name("idx_pt_contracts_trainer_id_trainee_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(PtContracts::Table)
                    .col(PtContracts::TraineeId)
                    .name("idx_pt_contracts_trainee_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_pt_contracts_trainee_id",
            "idx_pt_contracts_trainer_id_trainee_id",
            "idx_comments_diet_id",
            "idx_diets_trainee_id_created_at",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Diets {
    Table,
    TraineeId,
    CreatedAt,
}

#[derive(Iden)]
enum Comments {
    Table,
    DietId,
}

#[derive(Iden)]
enum PtContracts {
    Table,
    TrainerId,
    TraineeId,
}
