use serde::Serialize;
use ts_rs::TS;

use super::entities::Evaluation;

/// 评审关联方展示信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationParty {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 评审时段展示信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationSlotInfo {
    pub id: i64,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
}

/// 带关联信息的评审条目（学员/评审人/教务三种视图共用）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub evaluation: Evaluation,
    pub project_title: String,
    pub student: EvaluationParty,
    pub evaluator: EvaluationParty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<EvaluationSlotInfo>,
}

/// 评审列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<EvaluationListItem>,
}
