//! 任务的指派、删除与仓库地址维护

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::ProjectService;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateRepoUrlRequest};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify::notify;
use crate::utils::validate::is_github_url;

// 管理员直接指派任务
// POST /projects/{id}/assignments
pub async fn create_assignment(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    req: CreateAssignmentRequest,
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

    match storage.get_user_by_id(req.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "学员不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching student {}: {}", req.student_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学员失败: {e}"),
                )),
            );
        }
    }

    // 同一学员同一模板只允许一个任务
    match storage
        .get_assignment_by_template_and_student(template_id, req.student_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AssignmentAlreadyExists,
                "该学员已持有此项目的任务",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking existing assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询任务失败: {e}"),
                )),
            );
        }
    }

    match storage.create_assignment(template_id, req.student_id).await {
        Ok(assignment) => {
            notify(
                &storage,
                req.student_id,
                "project_assigned",
                "新项目已指派",
                format!("项目「{}」已指派给你", template.title),
                Some("project"),
                Some(template_id),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "任务指派成功")))
        }
        Err(e) => {
            error!("Error creating assignment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建任务失败: {e}"),
                )),
            )
        }
    }
}

// 删除任务，级联删除评审记录与关联时段
// DELETE /projects/{id}/assignments/{student_id}
pub async fn delete_assignment(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage
        .get_assignment_by_template_and_student(template_id, student_id)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "任务不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询任务失败: {e}"),
                )),
            );
        }
    };

    match storage.delete_assignment(assignment.id).await {
        Ok(true) => {
            warn!(
                "Assignment {} (template {}, student {}) deleted with cascade",
                assignment.id, template_id, student_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("任务及其评审记录已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "任务不存在",
        ))),
        Err(e) => {
            error!("Error deleting assignment {}: {}", assignment.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除任务失败: {e}"),
                )),
            )
        }
    }
}

// 修改任务仓库地址
//
// 学员只能改自己的任务；教务可通过 student_id 代改。
// 仅 assigned / rejected 状态允许修改。
// PUT /projects/{id}/repo-url
pub async fn update_repo_url(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    current_user: &User,
    req: UpdateRepoUrlRequest,
) -> ActixResult<HttpResponse> {
    if !is_github_url(&req.repo_url) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::RepoUrlInvalid,
            "仓库地址必须是 GitHub 仓库 URL",
        )));
    }

    // 目标学员：教务可代改，学员只能改自己的
    let target_student_id = match req.student_id {
        Some(other) if other != current_user.id => {
            if !current_user.role.is_staff() {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能修改自己任务的仓库地址",
                )));
            }
            other
        }
        _ => current_user.id,
    };

    let storage = service.get_storage(request);

    let assignment = match storage
        .get_assignment_by_template_and_student(template_id, target_student_id)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "任务不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询任务失败: {e}"),
                )),
            );
        }
    };

    if !assignment.status.can_edit_repo_url() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentStateInvalid,
            format!("当前状态（{}）不允许修改仓库地址", assignment.status),
        )));
    }

    match storage
        .update_assignment_repo_url(assignment.id, &req.repo_url)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("仓库地址已更新"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "任务不存在",
        ))),
        Err(e) => {
            error!("Error updating repo url: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新仓库地址失败: {e}"),
                )),
            )
        }
    }
}
