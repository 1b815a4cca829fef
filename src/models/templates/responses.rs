use serde::Serialize;
use ts_rs::TS;

use super::entities::ProjectTemplate;
use crate::models::assignments::entities::Assignment;
use crate::models::common::pagination::PaginationInfo;

/// 模板列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct TemplateListResponse {
    pub items: Vec<ProjectTemplate>,
    pub pagination: PaginationInfo,
}

/// 模板详情响应（学员视角会附带自己的任务）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct TemplateDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub template: ProjectTemplate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_assignment: Option<Assignment>,
}
