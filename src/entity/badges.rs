//! 徽章目录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "badges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_badges::Entity")]
    UserBadges,
}

impl Related<super::user_badges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
