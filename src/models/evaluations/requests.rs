use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EvaluationFeedback, EvaluationStatus};

// 提交评审结论请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitEvaluationRequest {
    pub status: EvaluationStatus,
    #[serde(default)]
    pub feedback: EvaluationFeedback,
}

// 批量创建评审记录的条目（提交流程内部使用）
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub assignment_id: i64,
    pub student_id: i64,
    pub evaluator_id: i64,
    pub slot_id: i64,
}
