use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建通知请求（内部使用，通知属于尽力而为的副作用）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub notification_type: String,
    pub title: String,
    pub content: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}

// 通知列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}
