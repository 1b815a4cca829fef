use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::evaluations::responses::EvaluationListResponse;
use crate::models::{ApiResponse, ErrorCode};

// 学员视角：自己被评审的记录
// GET /evaluations/my
pub async fn list_my_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluations_by_student(student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EvaluationListResponse { items },
            "查询成功",
        ))),
        Err(e) => {
            error!("Error listing evaluations for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审记录失败: {e}"),
                )),
            )
        }
    }
}

// 评审人视角：待处理的评审
// GET /evaluations/todo
pub async fn list_todo_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluator_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_pending_evaluations_by_evaluator(evaluator_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EvaluationListResponse { items },
            "查询成功",
        ))),
        Err(e) => {
            error!(
                "Error listing todo evaluations for evaluator {}: {}",
                evaluator_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询待评审记录失败: {e}"),
                )),
            )
        }
    }
}

// 教务视角：所有评审流程中的记录
// GET /evaluations/pending
pub async fn list_pending_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_active_evaluations().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EvaluationListResponse { items },
            "查询成功",
        ))),
        Err(e) => {
            error!("Error listing active evaluations: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审记录失败: {e}"),
                )),
            )
        }
    }
}
