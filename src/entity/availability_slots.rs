//! 评审可用时段实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "availability_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluator_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub booked: bool,
    pub booked_by: Option<i64>,
    pub project_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_slot(self) -> crate::models::slots::entities::AvailabilitySlot {
        use crate::models::slots::entities::AvailabilitySlot;
        use chrono::{DateTime, Utc};

        AvailabilitySlot {
            id: self.id,
            evaluator_id: self.evaluator_id,
            start_at: DateTime::<Utc>::from_timestamp(self.start_at, 0).unwrap_or_default(),
            end_at: DateTime::<Utc>::from_timestamp(self.end_at, 0).unwrap_or_default(),
            booked: self.booked,
            booked_by: self.booked_by,
            project_id: self.project_id,
            assignment_id: self.assignment_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
