use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProjectService;
use crate::models::templates::requests::CreateTemplateRequest;
use crate::models::{ApiResponse, ErrorCode};

// 创建项目模板
// POST /projects
pub async fn create_template(
    service: &ProjectService,
    request: &HttpRequest,
    created_by: i64,
    req: CreateTemplateRequest,
) -> ActixResult<HttpResponse> {
    if req.title.trim().is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "模板标题不能为空",
        )));
    }

    let storage = service.get_storage(request);

    // 每个培养顺序只能有一个模板（晋级依赖该不变式）
    match storage.get_template_by_order(req.sequence_order).await {
        Ok(Some(existing)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TemplateOrderConflict,
                format!("培养顺序 {} 已被模板「{}」占用", req.sequence_order, existing.title),
            )));
        }
        Ok(None) => {}
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

    match storage.create_template(created_by, req).await {
        Ok(template) => Ok(HttpResponse::Ok().json(ApiResponse::success(template, "模板创建成功"))),
        Err(e) => {
            error!("Error creating project template: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建项目模板失败: {e}"),
                )),
            )
        }
    }
}
