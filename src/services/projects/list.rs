use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProjectService;
use crate::models::templates::requests::TemplateListQuery;
use crate::models::{ApiResponse, ErrorCode};

// 列出项目模板（按培养顺序）
// GET /projects
pub async fn list_templates(
    service: &ProjectService,
    request: &HttpRequest,
    query: TemplateListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_templates_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Error listing project templates: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询模板列表失败: {e}"),
                )),
            )
        }
    }
}
