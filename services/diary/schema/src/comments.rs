use sea_orm::entity::prelude::*;

/// Trainer comment on a diet entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub diet_id: Uuid,
    pub trainer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::diets::Entity",
        from = "Column::DietId",
        to = "super::diets::Column::Id"
    )]
    Diet,
}

impl Related<super::diets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
