use serde::Deserialize;
use ts_rs::TS;

// 提交任务请求：仓库地址 + 两个预约时段
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub repo_url: String,
    pub slot_ids: Vec<i64>,
}

// 教务终审请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct FinalReviewRequest {
    pub assignment_id: i64,
    pub status: FinalVerdict,
}

// 终审结论
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum FinalVerdict {
    Approved,
    Rejected,
}

// 修改仓库地址请求；教务可通过 student_id 代改
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateRepoUrlRequest {
    pub repo_url: String,
    pub student_id: Option<i64>,
}

// 管理员指派任务请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub student_id: i64,
}
