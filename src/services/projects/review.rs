//! 教务终审
//!
//! 通过与驳回统一走这一个入口；旧版 approve / reject 路由
//! 也转发到这里，不再保留重复的状态迁移代码路径。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProjectService;
use crate::models::assignments::requests::{FinalReviewRequest, FinalVerdict};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify::notify;
use crate::services::progression;

// 教务终审
// POST /projects/{id}/final-evaluate
pub async fn final_review(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    staff: &User,
    req: FinalReviewRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "任务不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching assignment {}: {}", req.assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询任务失败: {e}"),
                )),
            );
        }
    };

    if assignment.template_id != template_id {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "任务不属于该项目",
        )));
    }

    if !assignment.status.can_staff_review() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentStateInvalid,
            format!("当前状态（{}）不允许终审", assignment.status),
        )));
    }

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

    let student = match storage.get_user_by_id(assignment.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "学员不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching student {}: {}", assignment.student_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学员失败: {e}"),
                )),
            );
        }
    };

    match req.status {
        FinalVerdict::Approved => {
            // 同伴评审否决的任务不能直接通过
            let approved = match storage.approve_assignment(assignment.id, staff.id).await {
                Ok(approved) => approved,
                Err(e) => {
                    error!("Error approving assignment {}: {}", assignment.id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("通过任务失败: {e}"),
                        ),
                    ));
                }
            };

            if !approved {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentStateInvalid,
                    "任务不在待终审状态，无法通过",
                )));
            }

            info!(
                "Assignment {} approved by staff {} for student {}",
                assignment.id, staff.id, student.id
            );

            notify(
                &storage,
                student.id,
                "assignment_approved",
                "项目已通过",
                format!("恭喜，你的项目「{}」已通过终审！", template.title),
                Some("assignment"),
                Some(assignment.id),
            )
            .await;

            // 晋级：发放奖励、授予徽章、指派下一个项目
            if let Err(e) = progression::apply_approval(&storage, &student, &template).await {
                error!(
                    "Progression failed after approval of assignment {}: {}",
                    assignment.id, e
                );
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("晋级处理失败: {e}"),
                    )),
                );
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("任务已通过，学员已晋级")))
        }
        FinalVerdict::Rejected => {
            let rejected = match storage
                .reject_assignment_for_rework(assignment.id, staff.id)
                .await
            {
                Ok(rejected) => rejected,
                Err(e) => {
                    error!("Error rejecting assignment {}: {}", assignment.id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("驳回任务失败: {e}"),
                        ),
                    ));
                }
            };

            if !rejected {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentStateInvalid,
                    "任务状态已变化，无法驳回",
                )));
            }

            info!(
                "Assignment {} rejected by staff {}, reset for rework",
                assignment.id, staff.id
            );

            notify(
                &storage,
                student.id,
                "rework_required",
                "项目被驳回",
                format!("你的项目「{}」未通过终审，请修改后重新提交", template.title),
                Some("assignment"),
                Some(assignment.id),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("任务已驳回，等待学员重做")))
        }
    }
}
