use serde::Serialize;
use ts_rs::TS;

use super::entities::AvailabilitySlot;

/// 评审人展示信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct SlotEvaluator {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 带评审人信息的时段条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct SlotListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub slot: AvailabilitySlot,
    pub evaluator: SlotEvaluator,
}

/// 时段列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct SlotListResponse {
    pub items: Vec<SlotListItem>,
}
