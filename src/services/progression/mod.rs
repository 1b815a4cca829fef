//! 晋级引擎
//!
//! 项目通过终审后：发放奖励（剩余天数、等级、完成计数）、
//! 按阈值授予徽章、指派培养路线中的下一个项目模板。

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::templates::entities::ProjectTemplate;
use crate::models::users::entities::User;
use crate::services::notifications::notify::notify;
use crate::storage::Storage;

pub const FIRST_PROJECT_BADGE: &str = "First Project Validated";
pub const FIVE_PROJECTS_BADGE: &str = "Five Projects Completed";

/// 完成数达到阈值时应授予的徽章名称
///
/// 阈值是硬编码的业务规则，不做成通用规则引擎。
pub fn badge_for_completion_count(total_completed: i32) -> Option<&'static str> {
    match total_completed {
        1 => Some(FIRST_PROJECT_BADGE),
        5 => Some(FIVE_PROJECTS_BADGE),
        _ => None,
    }
}

/// 终审通过后的完整晋级流程
pub async fn apply_approval(
    storage: &Arc<dyn Storage>,
    student: &User,
    template: &ProjectTemplate,
) -> Result<()> {
    // 1. 发放奖励
    let rewarded = storage
        .apply_progression_rewards(student.id, template.size.bonus_days())
        .await?;

    let Some(rewarded) = rewarded else {
        warn!(
            "Progression rewards skipped: student {} no longer exists",
            student.id
        );
        return Ok(());
    };

    info!(
        "Student {} rewarded for template {}: +{} day(s), level {}, {} project(s) completed",
        rewarded.id,
        template.id,
        template.size.bonus_days(),
        rewarded.level,
        rewarded.total_projects_completed
    );

    // 2. 按阈值授予徽章
    award_threshold_badge(storage, &rewarded).await;

    // 3. 指派下一个模板
    assign_next(storage, &rewarded, template).await?;

    Ok(())
}

/// 按完成数阈值授予徽章，徽章授予与通知均为尽力而为
async fn award_threshold_badge(storage: &Arc<dyn Storage>, student: &User) {
    let Some(badge_name) = badge_for_completion_count(student.total_projects_completed) else {
        return;
    };

    let badge = match storage.get_badge_by_name(badge_name).await {
        Ok(Some(badge)) => badge,
        Ok(None) => {
            warn!("Badge '{}' missing from catalog, skipping award", badge_name);
            return;
        }
        Err(e) => {
            warn!("Failed to look up badge '{}': {}", badge_name, e);
            return;
        }
    };

    match storage.award_badge(student.id, badge.id).await {
        Ok(true) => {
            info!("Badge '{}' awarded to student {}", badge_name, student.id);
            notify(
                storage,
                student.id,
                "badge_awarded",
                "获得新徽章",
                format!("恭喜，你获得了徽章「{badge_name}」！"),
                Some("badge"),
                Some(badge.id),
            )
            .await;
        }
        Ok(false) => {
            // 已持有，重复通过同一阈值时不重复授予
        }
        Err(e) => {
            warn!("Failed to award badge '{}': {}", badge_name, e);
        }
    }
}

/// 指派培养路线中的下一个模板
///
/// 顺序 +1 的模板不存在视为毕业，不做任何操作；
/// 学员已持有该模板的任务时同样不做任何操作（幂等）。
pub async fn assign_next(
    storage: &Arc<dyn Storage>,
    student: &User,
    current_template: &ProjectTemplate,
) -> Result<Option<Assignment>> {
    let Some(next_template) = storage
        .get_template_by_order(current_template.sequence_order + 1)
        .await?
    else {
        info!(
            "Student {} completed the last template in the curriculum",
            student.id
        );
        return Ok(None);
    };

    if storage
        .get_assignment_by_template_and_student(next_template.id, student.id)
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let assignment = storage
        .create_assignment(next_template.id, student.id)
        .await?;

    notify(
        storage,
        student.id,
        "project_assigned",
        "新项目已指派",
        format!("新项目「{}」已指派给你，加油！", next_template.title),
        Some("project"),
        Some(next_template.id),
    )
    .await;

    Ok(Some(assignment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(badge_for_completion_count(1), Some(FIRST_PROJECT_BADGE));
        assert_eq!(badge_for_completion_count(5), Some(FIVE_PROJECTS_BADGE));
        assert_eq!(badge_for_completion_count(0), None);
        assert_eq!(badge_for_completion_count(2), None);
        assert_eq!(badge_for_completion_count(6), None);
    }
}
