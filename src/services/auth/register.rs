//! 学员注册
//!
//! 注册成功后自动指派培养路线中的第一个项目模板。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AuthService;
use crate::models::auth::requests::RegisterRequest;
use crate::models::users::entities::{UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify::notify;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 入参校验
    if let Err(reason) = validate_username(&register_request.username) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }
    if let Err(reason) = validate_email(&register_request.email) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }
    if let Err(reason) = validate_password(&register_request.password) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }

    let storage = service.get_storage(request);

    // 2. 用户名 / 邮箱唯一性
    match storage
        .get_user_by_username(&register_request.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "用户名已被占用",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking username uniqueness: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "邮箱已被注册",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking email uniqueness: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    // 3. 哈希密码并创建学员账号
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "注册失败",
                )),
            );
        }
    };

    let profile_name = register_request
        .profile_name
        .unwrap_or_else(|| register_request.username.clone());

    let user = match storage
        .create_user(CreateUserRequest {
            username: register_request.username,
            email: register_request.email,
            password: password_hash,
            role: UserRole::Apprenant,
            profile: UserProfile {
                profile_name,
                avatar_url: None,
            },
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!("Error creating user: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建用户失败: {e}"),
                )),
            );
        }
    };

    info!("New apprenant registered: {} (ID: {})", user.username, user.id);

    // 4. 指派培养路线中的第一个项目
    match storage.get_first_template().await {
        Ok(Some(first)) => match storage.create_assignment(first.id, user.id).await {
            Ok(_) => {
                notify(
                    &storage,
                    user.id,
                    "project_assigned",
                    "第一个项目已指派",
                    format!("欢迎加入！你的第一个项目是「{}」", first.title),
                    Some("project"),
                    Some(first.id),
                )
                .await;
            }
            Err(e) => {
                warn!("Failed to assign first template to user {}: {}", user.id, e);
            }
        },
        Ok(None) => {
            warn!("No project template available, skipping initial assignment");
        }
        Err(e) => {
            warn!("Failed to look up first template: {}", e);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "注册成功")))
}
