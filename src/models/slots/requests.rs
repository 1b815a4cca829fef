use serde::Deserialize;
use ts_rs::TS;

// 创建可用时段请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct CreateSlotRequest {
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
}

// 时段列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct SlotListQuery {
    pub date_from: Option<chrono::DateTime<chrono::Utc>>,
    pub date_to: Option<chrono::DateTime<chrono::Utc>>,
    pub evaluator_id: Option<i64>,
}

// 单时段直接预约请求（提交流程之外）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct BookSlotRequest {
    pub slot_id: i64,
    pub project_id: i64,
}
