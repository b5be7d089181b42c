use models::resource::{ResourceFields, ResourceKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A resource listed under a chapter, ordered by `position`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub position: i32,
    pub kind: ResourceKind,
    pub link: String,
    pub link_name: Option<String>,
    pub from_secs: Option<i32>,
    pub to_secs: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chapters::Entity",
        from = "Column::ChapterId",
        to = "super::chapters::Column::Id"
    )]
    Chapter,
}

impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for ResourceFields {
    fn from(model: &Model) -> Self {
        ResourceFields {
            kind: model.kind,
            link: model.link.clone(),
            link_name: model.link_name.clone(),
            from: model.from_secs,
            to: model.to_secs,
        }
    }
}
