use super::entities::TemplateSize;
use serde::Deserialize;
use ts_rs::TS;

// 创建项目模板请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct CreateTemplateRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub resource_links: Vec<String>,
    pub demo_video_url: Option<String>,
    pub size: TemplateSize,
    pub sequence_order: i32,
}

// 更新项目模板请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct UpdateTemplateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub objectives: Option<Vec<String>>,
    pub specifications: Option<Vec<String>>,
    pub exercises: Option<Vec<String>>,
    pub resource_links: Option<Vec<String>>,
    pub demo_video_url: Option<String>,
    pub size: Option<TemplateSize>,
    pub sequence_order: Option<i32>,
}

// 模板列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct TemplateListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
