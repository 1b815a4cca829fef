//! 学员提交任务
//!
//! 校验仓库地址与成对时段，预约成功后任务进入 pending，
//! 为每个预约时段创建一条 pending 评审记录，并通知评审人与教务。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProjectService;
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::assignments::responses::{AssignmentDetailResponse, AssignmentParty};
use crate::models::evaluations::requests::NewEvaluation;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify::{notify, notify_staff};
use crate::services::slots::book::check_bookable_pair;
use crate::utils::validate::is_github_url;

// 学员提交任务
// POST /projects/{id}/submit
pub async fn submit_assignment(
    service: &ProjectService,
    request: &HttpRequest,
    template_id: i64,
    student: &User,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    // 1. 仓库地址校验
    if !is_github_url(&req.repo_url) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::RepoUrlInvalid,
            "仓库地址必须是 GitHub 仓库 URL",
        )));
    }

    // 2. 必须恰好选择两个不同的时段
    if req.slot_ids.len() != 2 || req.slot_ids[0] == req.slot_ids[1] {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::SlotPairInvalid,
            "必须恰好选择两个不同的时段",
        )));
    }

    let storage = service.get_storage(request);

    // 3. 任务必须存在且处于 assigned 状态
    let assignment = match storage
        .get_assignment_by_template_and_student(template_id, student.id)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "你在该项目下没有任务",
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

    if !assignment.status.can_submit() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentStateInvalid,
            format!("当前状态（{}）不允许提交", assignment.status),
        )));
    }

    // 4. 解析时段并校验成对预约规则
    let slots = match storage.get_slots_by_ids(&req.slot_ids).await {
        Ok(slots) => slots,
        Err(e) => {
            error!("Error fetching slots: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询时段失败: {e}"),
                )),
            );
        }
    };

    if slots.len() != 2 {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SlotNotFound,
            "所选时段不存在",
        )));
    }

    if let Err(violation) = check_bookable_pair(&slots, student.id) {
        return Ok(violation.into_response());
    }

    // 5. 事务内条件更新抢占两个时段；任一已被抢占则整体失败
    if let Err(e) = storage
        .book_slot_pair(
            [req.slot_ids[0], req.slot_ids[1]],
            student.id,
            template_id,
            assignment.id,
        )
        .await
    {
        return Ok(match e {
            crate::errors::BootcampError::Conflict(msg) => HttpResponse::Conflict()
                .json(ApiResponse::error_empty(ErrorCode::SlotAlreadyBooked, msg)),
            other => {
                error!("Error booking slot pair: {}", other);
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("预约时段失败: {other}"),
                ))
            }
        });
    }

    // 6. 任务 assigned -> pending（条件更新；并发提交时败者释放时段）
    let marked = match storage
        .mark_assignment_submitted(assignment.id, &req.repo_url)
        .await
    {
        Ok(marked) => marked,
        Err(e) => {
            error!("Error marking assignment submitted: {}", e);
            let _ = storage.unbook_slots(&req.slot_ids).await;
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交任务失败: {e}"),
                )),
            );
        }
    };

    if !marked {
        let _ = storage.unbook_slots(&req.slot_ids).await;
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentStateInvalid,
            "任务已被提交",
        )));
    }

    // 7. 每个预约时段创建一条 pending 评审记录
    let entries = slots
        .iter()
        .map(|slot| NewEvaluation {
            assignment_id: assignment.id,
            student_id: student.id,
            evaluator_id: slot.evaluator_id,
            slot_id: slot.id,
        })
        .collect();

    let evaluations = match storage.create_evaluations_batch(entries).await {
        Ok(evaluations) => evaluations,
        Err(e) => {
            error!("Error creating evaluations: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建评审记录失败: {e}"),
                )),
            );
        }
    };

    info!(
        "Assignment {} submitted by student {} with slots {:?}",
        assignment.id, student.id, req.slot_ids
    );

    // 8. 通知评审人与教务
    let template_title = storage
        .get_template_by_id(template_id)
        .await
        .ok()
        .flatten()
        .map(|t| t.title)
        .unwrap_or_default();

    for slot in &slots {
        notify(
            &storage,
            slot.evaluator_id,
            "evaluation_requested",
            "新的评审请求",
            format!(
                "{} 提交了项目「{}」，请在预约时段（{}）进行评审",
                student.username,
                template_title,
                slot.start_at.to_rfc3339()
            ),
            Some("assignment"),
            Some(assignment.id),
        )
        .await;
    }

    notify_staff(
        &storage,
        "assignment_submitted",
        "学员提交了项目",
        format!("{} 提交了项目「{}」", student.username, template_title),
        Some("assignment"),
        Some(assignment.id),
    )
    .await;

    // 9. 返回任务详情
    let updated = storage
        .get_assignment_by_id(assignment.id)
        .await
        .ok()
        .flatten()
        .unwrap_or(assignment);

    let mut peer_evaluators = Vec::with_capacity(slots.len());
    for slot in &slots {
        if let Ok(Some(evaluator)) = storage.get_user_by_id(slot.evaluator_id).await {
            peer_evaluators.push(AssignmentParty {
                id: evaluator.id,
                username: evaluator.username,
                profile_name: Some(evaluator.profile.profile_name),
            });
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentDetailResponse {
            assignment: updated,
            evaluations,
            peer_evaluators,
        },
        "提交成功，已进入同伴评审",
    )))
}
