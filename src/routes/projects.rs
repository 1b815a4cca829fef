use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, FinalReviewRequest, FinalVerdict, SubmitAssignmentRequest,
    UpdateRepoUrlRequest,
};
use crate::models::templates::requests::{
    CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ProjectService;

// 懒加载的全局 ProjectService 实例
static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "该操作仅限教务人员",
    ))
}

// 辅助函数：提取用户并要求教务权限
fn extract_staff(req: &HttpRequest) -> Result<User, HttpResponse> {
    let user = RequireJWT::extract_user_claims(req).ok_or_else(unauthorized)?;
    if !user.role.is_staff() {
        return Err(forbidden());
    }
    Ok(user)
}

// 列出项目模板
pub async fn list_templates(
    req: HttpRequest,
    query: web::Query<TemplateListQuery>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .list_templates(&req, query.into_inner())
        .await
}

// 获取模板详情
pub async fn get_template(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(&req) {
        Some(u) => u,
        None => return Ok(unauthorized()),
    };

    PROJECT_SERVICE
        .get_template(&req, path.into_inner(), &user)
        .await
}

// 学员提交任务
pub async fn submit_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(&req) {
        Some(u) => u,
        None => return Ok(unauthorized()),
    };

    PROJECT_SERVICE
        .submit_assignment(&req, path.into_inner(), &user, body.into_inner())
        .await
}

// 修改任务仓库地址（学员改自己的，教务可代改）
pub async fn update_repo_url(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateRepoUrlRequest>,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(&req) {
        Some(u) => u,
        None => return Ok(unauthorized()),
    };

    PROJECT_SERVICE
        .update_repo_url(&req, path.into_inner(), &user, body.into_inner())
        .await
}

// 创建项目模板（仅教务）
pub async fn create_template(
    req: HttpRequest,
    body: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    let user = match extract_staff(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    PROJECT_SERVICE
        .create_template(&req, user.id, body.into_inner())
        .await
}

// 更新项目模板（仅教务）
pub async fn update_template(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = extract_staff(&req) {
        return Ok(resp);
    }

    PROJECT_SERVICE
        .update_template(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除项目模板（仅教务，级联）
pub async fn delete_template(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    if let Err(resp) = extract_staff(&req) {
        return Ok(resp);
    }

    PROJECT_SERVICE.delete_template(&req, path.into_inner()).await
}

// 管理员指派任务（仅教务）
pub async fn create_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = extract_staff(&req) {
        return Ok(resp);
    }

    PROJECT_SERVICE
        .create_assignment(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除任务（仅教务，级联）
pub async fn delete_assignment(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = extract_staff(&req) {
        return Ok(resp);
    }

    let (template_id, student_id) = path.into_inner();
    PROJECT_SERVICE
        .delete_assignment(&req, template_id, student_id)
        .await
}

// 教务终审（仅教务）
pub async fn final_evaluate(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<FinalReviewRequest>,
) -> ActixResult<HttpResponse> {
    let user = match extract_staff(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    PROJECT_SERVICE
        .final_review(&req, path.into_inner(), &user, body.into_inner())
        .await
}

/// 旧版直接通过/驳回请求体
#[derive(Debug, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct LegacyVerdictRequest {
    pub assignment_id: i64,
}

// 旧版直接通过入口，转发到终审逻辑
pub async fn approve_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<LegacyVerdictRequest>,
) -> ActixResult<HttpResponse> {
    let user = match extract_staff(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    PROJECT_SERVICE
        .legacy_verdict(
            &req,
            path.into_inner(),
            &user,
            body.into_inner().assignment_id,
            FinalVerdict::Approved,
        )
        .await
}

// 旧版直接驳回入口，转发到终审逻辑
pub async fn reject_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<LegacyVerdictRequest>,
) -> ActixResult<HttpResponse> {
    let user = match extract_staff(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    PROJECT_SERVICE
        .legacy_verdict(
            &req,
            path.into_inner(),
            &user,
            body.into_inner().assignment_id,
            FinalVerdict::Rejected,
        )
        .await
}

// 配置路由
pub fn configure_projects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(RequireJWT)
            .route("", web::get().to(list_templates))
            .route("", web::post().to(create_template))
            .route("/{id}", web::get().to(get_template))
            .route("/{id}", web::put().to(update_template))
            .route("/{id}", web::delete().to(delete_template))
            .route("/{id}/submit", web::post().to(submit_assignment))
            .route("/{id}/repo-url", web::put().to(update_repo_url))
            .route("/{id}/assignments", web::post().to(create_assignment))
            .route(
                "/{id}/assignments/{student_id}",
                web::delete().to(delete_assignment),
            )
            .route("/{id}/final-evaluate", web::post().to(final_evaluate))
            .route("/{id}/approve", web::post().to(approve_assignment))
            .route("/{id}/reject", web::post().to(reject_assignment)),
    );
}
