//! 徽章存储操作

use super::SeaOrmStorage;
use crate::entity::badges::{ActiveModel, Column, Entity as Badges};
use crate::entity::user_badges::{
    ActiveModel as UserBadgeActiveModel, Column as UserBadgeColumn, Entity as UserBadges,
};
use crate::errors::{BootcampError, Result};
use crate::models::users::{entities::Badge, responses::BadgeInfo};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 确保徽章存在（启动时播种使用，幂等）
    pub async fn ensure_badge_impl(&self, name: &str, description: &str) -> Result<Badge> {
        if let Some(existing) = self.get_badge_by_name_impl(name).await? {
            return Ok(existing);
        }

        let model = ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("创建徽章失败: {e}")))?;

        Ok(Badge {
            id: result.id,
            name: result.name,
            description: result.description,
        })
    }

    /// 按名称查询徽章
    pub async fn get_badge_by_name_impl(&self, name: &str) -> Result<Option<Badge>> {
        let result = Badges::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询徽章失败: {e}")))?;

        Ok(result.map(|m| Badge {
            id: m.id,
            name: m.name,
            description: m.description,
        }))
    }

    /// 授予徽章；已持有时返回 false
    pub async fn award_badge_impl(&self, user_id: i64, badge_id: i64) -> Result<bool> {
        let already_held = UserBadges::find()
            .filter(UserBadgeColumn::UserId.eq(user_id))
            .filter(UserBadgeColumn::BadgeId.eq(badge_id))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询徽章持有失败: {e}")))?
            .is_some();

        if already_held {
            return Ok(false);
        }

        let model = UserBadgeActiveModel {
            user_id: Set(user_id),
            badge_id: Set(badge_id),
            awarded_at: Set(chrono::Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("授予徽章失败: {e}")))?;

        Ok(true)
    }

    /// 列出用户已获徽章
    pub async fn list_user_badges_impl(&self, user_id: i64) -> Result<Vec<BadgeInfo>> {
        let awards = UserBadges::find()
            .filter(UserBadgeColumn::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户徽章失败: {e}")))?;

        if awards.is_empty() {
            return Ok(vec![]);
        }

        let badge_ids: Vec<i64> = awards.iter().map(|a| a.badge_id).collect();
        let badges = Badges::find()
            .filter(Column::Id.is_in(badge_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询徽章目录失败: {e}")))?;
        let badge_map: HashMap<i64, _> = badges.into_iter().map(|b| (b.id, b)).collect();

        Ok(awards
            .into_iter()
            .filter_map(|a| {
                badge_map.get(&a.badge_id).map(|b| BadgeInfo {
                    id: b.id,
                    name: b.name.clone(),
                    description: b.description.clone(),
                    awarded_at: chrono::DateTime::from_timestamp(a.awarded_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                })
            })
            .collect())
    }
}
