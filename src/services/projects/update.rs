use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProjectService;
use crate::models::templates::requests::UpdateTemplateRequest;
use crate::models::{ApiResponse, ErrorCode};

// 更新项目模板
// PUT /projects/{id}
pub async fn update_template(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    req: UpdateTemplateRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 调整培养顺序时同样检查唯一性
    if let Some(new_order) = req.sequence_order {
        match storage.get_template_by_order(new_order).await {
            Ok(Some(existing)) if existing.id != template_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::TemplateOrderConflict,
                    format!("培养顺序 {} 已被模板「{}」占用", new_order, existing.title),
                )));
            }
            Ok(_) => {}
            Err(e) => {
                error!("Error checking sequence order: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询培养顺序失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_template(template_id, req).await {
        Ok(Some(template)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(template, "模板更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "项目模板不存在",
        ))),
        Err(e) => {
            error!("Error updating template {}: {}", template_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新项目模板失败: {e}"),
                )),
            )
        }
    }
}
