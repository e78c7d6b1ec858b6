use sea_orm::{entity::prelude::*, DeriveRelation};

#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "channels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lifetime_value_history::Entity")]
    LifetimeValueHistory,
    #[sea_orm(has_many = "super::lifetime_value_aggregations::Entity")]
    LifetimeValueAggregations,
}

impl Related<super::lifetime_value_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LifetimeValueHistory.def()
    }
}

impl Related<super::lifetime_value_aggregations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LifetimeValueAggregations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
