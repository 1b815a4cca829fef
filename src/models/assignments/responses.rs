use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::evaluations::entities::Evaluation;

/// 任务参与者展示信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentParty {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 任务详情响应：任务本体 + 评审记录 + 指定的同伴评审人
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub evaluations: Vec<Evaluation>,
    pub peer_evaluators: Vec<AssignmentParty>,
}
