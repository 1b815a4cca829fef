//! 评审人提交结论
//!
//! accepted 结论要求五个反馈维度全部填写；rejected 不做完整性要求。
//! 写入采用条件更新（仅 pending 可写），之后触发任务的聚合步骤。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EvaluationService;
use crate::models::evaluations::{entities::EvaluationStatus, requests::SubmitEvaluationRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::projects::aggregate::run_peer_aggregation;

// 提交评审结论
// POST /evaluations/{id}/submit
pub async fn submit_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    evaluator_id: i64,
    req: SubmitEvaluationRequest,
) -> ActixResult<HttpResponse> {
    // 结论不允许回到 pending
    if req.status == EvaluationStatus::Pending {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "结论必须是 accepted 或 rejected",
        )));
    }

    let storage = service.get_storage(request);

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "评审记录不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching evaluation {}: {}", evaluation_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审记录失败: {e}"),
                )),
            );
        }
    };

    // 只有被指定的评审人可以提交
    if evaluation.evaluator_id != evaluator_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotDesignatedEvaluator,
            "你不是该评审的指定评审人",
        )));
    }

    if evaluation.status != EvaluationStatus::Pending {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EvaluationAlreadySubmitted,
            "评审结论已提交，不能重复提交",
        )));
    }

    // accepted 要求五个反馈维度全部填写
    if req.status == EvaluationStatus::Accepted && !req.feedback.is_complete() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::FeedbackIncomplete,
            "通过结论要求填写全部五个反馈维度",
        )));
    }

    // 条件更新：并发重复提交时只有一个生效
    let submitted = match storage
        .submit_evaluation(evaluation_id, &req.feedback, req.status)
        .await
    {
        Ok(submitted) => submitted,
        Err(e) => {
            error!("Error submitting evaluation {}: {}", evaluation_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交评审结论失败: {e}"),
                )),
            );
        }
    };

    if !submitted {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EvaluationAlreadySubmitted,
            "评审结论已提交，不能重复提交",
        )));
    }

    info!(
        "Evaluation {} submitted as {} by evaluator {}",
        evaluation_id, req.status, evaluator_id
    );

    // 触发任务聚合；聚合失败不影响本次提交的结果
    if let Err(e) = run_peer_aggregation(&storage, evaluation.assignment_id).await {
        error!(
            "Peer aggregation failed for assignment {}: {}",
            evaluation.assignment_id, e
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("评审结论已提交")))
}
