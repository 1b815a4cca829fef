use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProjectService;
use crate::models::templates::responses::TemplateDetailResponse;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

// 获取模板详情；学员视角附带自己的任务
// GET /projects/{id}
pub async fn get_template(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    current_user: &User,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let template = match storage.get_template_by_id(template_id).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TemplateNotFound,
                "项目模板不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching template {}: {}", template_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询项目模板失败: {e}"),
                )),
            );
        }
    };

    let my_assignment = match storage
        .get_assignment_by_template_and_student(template_id, current_user.id)
        .await
    {
        Ok(assignment) => assignment,
        Err(e) => {
            error!("Error fetching own assignment: {}", e);
            None
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TemplateDetailResponse {
            template,
            my_assignment,
        },
        "查询成功",
    )))
}
