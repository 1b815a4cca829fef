//! 项目模板实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    // 有序列表以 JSON 数组存储
    #[sea_orm(column_type = "Text")]
    pub objectives: String,
    #[sea_orm(column_type = "Text")]
    pub specifications: String,
    #[sea_orm(column_type = "Text")]
    pub exercises: String,
    #[sea_orm(column_type = "Text")]
    pub resource_links: String,
    pub demo_video_url: Option<String>,
    pub size: String,
    #[sea_orm(unique)]
    pub sequence_order: i32,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn parse_list(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

impl Model {
    pub fn into_template(self) -> crate::models::templates::entities::ProjectTemplate {
        use crate::models::templates::entities::{ProjectTemplate, TemplateSize};
        use chrono::{DateTime, Utc};

        ProjectTemplate {
            id: self.id,
            title: self.title,
            objectives: parse_list(&self.objectives),
            specifications: parse_list(&self.specifications),
            exercises: parse_list(&self.exercises),
            resource_links: parse_list(&self.resource_links),
            description: self.description,
            demo_video_url: self.demo_video_url,
            size: self
                .size
                .parse::<TemplateSize>()
                .unwrap_or(TemplateSize::Short),
            sequence_order: self.sequence_order,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
