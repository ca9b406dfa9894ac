use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(ptdiary_diary_migration::Migrator).await;
}
