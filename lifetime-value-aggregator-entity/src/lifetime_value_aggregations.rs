use sea_orm::{entity::prelude::*, DeriveRelation};

#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "lifetime_value_aggregations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub channel_id: i32,
    pub year: i32,
    pub month: i32,
    pub quarter: i32,
    pub aggregation_date: DateTimeUtc,
    #[sea_orm(column_type = "Double", nullable)]
    pub amount: Option<f64>,
    pub inserted_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::channels::Entity",
        from = "Column::ChannelId",
        to = "super::channels::Column::Id"
    )]
    Channels,
}

impl Related<super::channels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Channels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
