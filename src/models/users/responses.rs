use serde::Serialize;
use ts_rs::TS;

use super::entities::User;
use crate::models::common::pagination::PaginationInfo;

/// 用户列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

/// 徽章信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct BadgeInfo {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub awarded_at: String,
}

/// 用户详情响应（含已获徽章）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    pub badges: Vec<BadgeInfo>,
}
