use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

// 管理员创建用户（可指定角色）
// POST /users
pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut req: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Err(reason) = validate_username(&req.username) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }
    if let Err(reason) = validate_email(&req.email) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }
    if let Err(reason) = validate_password(&req.password) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_username(&req.username).await {
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

    req.password = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建用户失败",
                )),
            );
        }
    };

    match storage.create_user(req).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户创建成功"))),
        Err(e) => {
            error!("Error creating user: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建用户失败: {e}"),
                )),
            )
        }
    }
}
