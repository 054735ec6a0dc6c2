use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub year: i32,

    #[sea_orm(has_many)]
    pub songs: HasMany<super::song::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
