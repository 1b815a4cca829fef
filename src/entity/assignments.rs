//! 任务实体（学员与项目模板的关联）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub template_id: i64,
    pub student_id: i64,
    pub status: String,
    pub repo_url: Option<String>,
    pub submitted_at: Option<i64>,
    pub staff_validator_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_templates::Entity",
        from = "Column::TemplateId",
        to = "super::project_templates::Column::Id"
    )]
    Template,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::project_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentStatus};
        use chrono::{DateTime, Utc};

        Assignment {
            id: self.id,
            template_id: self.template_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<AssignmentStatus>()
                .unwrap_or(AssignmentStatus::Assigned),
            repo_url: self.repo_url,
            submitted_at: self
                .submitted_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            staff_validator_id: self.staff_validator_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
