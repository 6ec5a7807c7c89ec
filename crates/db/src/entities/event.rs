use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub event_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub location: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    /// Relative path under `events/`; NULL when no image was uploaded.
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
