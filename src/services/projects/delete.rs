use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::ProjectService;
use crate::models::{ApiResponse, ErrorCode};

// 删除项目模板，级联删除其任务、评审记录与关联时段
// DELETE /projects/{id}
pub async fn delete_template(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_template(template_id).await {
        Ok(true) => {
            warn!("Project template {} deleted with cascade", template_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("模板及其任务已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "项目模板不存在",
        ))),
        Err(e) => {
            error!("Error deleting template {}: {}", template_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除项目模板失败: {e}"),
                )),
            )
        }
    }
}
