use sea_orm_migration::prelude::*;

mod m20261001_000001_create_diets;
mod m20261001_000002_create_comments;
mod m20261001_000003_create_pt_contracts;
mod m20261001_000004_create_push_tokens;
mod m20261001_000005_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_diets::Migration),
            Box::new(m20261001_000002_create_comments::Migration),
            Box::new(m20261001_000003_create_pt_contracts::Migration),
            Box::new(m20261001_000004_create_push_tokens::Migration),
            Box::new(m20261001_000005_add_lookup_indexes::Migration),
        ]
    }
}
