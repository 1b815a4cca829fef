//! 通知扇出辅助函数
//!
//! 通知是尽力而为的副作用：创建失败只记日志，
//! 绝不回滚触发它的主状态迁移。

use std::sync::Arc;

use tracing::warn;

use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

/// 向单个用户发送通知
pub async fn notify(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    notification_type: &str,
    title: &str,
    content: String,
    reference_type: Option<&str>,
    reference_id: Option<i64>,
) {
    let req = CreateNotificationRequest {
        user_id,
        notification_type: notification_type.to_string(),
        title: title.to_string(),
        content,
        reference_type: reference_type.map(|s| s.to_string()),
        reference_id,
    };

    if let Err(e) = storage.create_notification(req).await {
        warn!(
            "Failed to create notification '{}' for user {}: {}",
            notification_type, user_id, e
        );
    }
}

/// 向所有 staff / admin 用户扇出通知
pub async fn notify_staff(
    storage: &Arc<dyn Storage>,
    notification_type: &str,
    title: &str,
    content: String,
    reference_type: Option<&str>,
    reference_id: Option<i64>,
) {
    let staff = match storage.list_users_by_roles(UserRole::staff_roles()).await {
        Ok(users) => users,
        Err(e) => {
            warn!("Failed to list staff users for notification fan-out: {}", e);
            return;
        }
    };

    for user in staff {
        notify(
            storage,
            user.id,
            notification_type,
            title,
            content.clone(),
            reference_type,
            reference_id,
        )
        .await;
    }
}
