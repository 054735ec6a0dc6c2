use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "albumId")]
    pub album_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub year: i32,
    #[sea_orm(column_type = "Text")]
    pub performer: String,
    #[sea_orm(column_type = "Text")]
    pub genre: String,
    /// Duration in seconds
    pub duration: i32,

    #[sea_orm(belongs_to, from = "album_id", to = "id")]
    pub album: Option<super::album::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
