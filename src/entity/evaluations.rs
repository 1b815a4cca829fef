//! 评审记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub evaluator_id: i64,
    pub slot_id: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub assiduity: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comprehension: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub spec_adherence: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub concept_mastery: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub submitted_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{
            Evaluation, EvaluationFeedback, EvaluationStatus,
        };
        use chrono::{DateTime, Utc};

        Evaluation {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            evaluator_id: self.evaluator_id,
            slot_id: self.slot_id,
            status: self
                .status
                .parse::<EvaluationStatus>()
                .unwrap_or(EvaluationStatus::Pending),
            feedback: EvaluationFeedback {
                assiduity: self.assiduity,
                comprehension: self.comprehension,
                spec_adherence: self.spec_adherence,
                concept_mastery: self.concept_mastery,
                explanation: self.explanation,
            },
            submitted_at: self
                .submitted_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
