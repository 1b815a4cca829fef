use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::EvaluationService;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

// 评审人提交结论
pub async fn submit_evaluation(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .submit_evaluation(&req, path.into_inner(), user_id, body.into_inner())
        .await
}

// 学员视角：自己被评审的记录
pub async fn list_my_evaluations(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE.list_my_evaluations(&req, user_id).await
}

// 评审人视角：待处理的评审
pub async fn list_todo_evaluations(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .list_todo_evaluations(&req, user_id)
        .await
}

// 教务视角：所有评审流程中的记录（仅教务）
pub async fn list_pending_evaluations(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(&req) {
        Some(u) => u,
        None => return Ok(unauthorized()),
    };

    if !user.role.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "该视图仅限教务人员",
        )));
    }

    EVALUATION_SERVICE.list_pending_evaluations(&req).await
}

// 配置路由
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(RequireJWT)
            .route("/my", web::get().to(list_my_evaluations))
            .route("/todo", web::get().to(list_todo_evaluations))
            .route("/pending", web::get().to(list_pending_evaluations))
            .route("/{id}/submit", web::post().to(submit_evaluation)),
    );
}
