//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
    pub days_remaining: i32,
    pub level: i32,
    pub total_projects_completed: i32,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::availability_slots::Entity")]
    AvailabilitySlots,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::user_badges::Entity")]
    UserBadges,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::availability_slots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailabilitySlots.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::user_badges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadges.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserProfile, UserRole, UserStatus};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Apprenant),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Active),
            profile: UserProfile {
                profile_name: self.profile_name.unwrap_or_default(),
                avatar_url: self.avatar_url,
            },
            days_remaining: self.days_remaining,
            level: self.level,
            total_projects_completed: self.total_projects_completed,
            last_login: self
                .last_login
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
