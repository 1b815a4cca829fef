use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::entities::UserProfile;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password;

// 更新个人资料（资料名、头像、密码）
pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let password_hash = match update_request.password {
        Some(ref password) => {
            if let Err(reason) = validate_password(password) {
                return Ok(HttpResponse::UnprocessableEntity()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, reason)));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    error!("Failed to hash password: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(ErrorCode::InternalServerError, "更新失败"),
                    ));
                }
            }
        }
        None => None,
    };

    let profile = UserProfile {
        profile_name: update_request
            .profile_name
            .unwrap_or(current_user.profile.profile_name),
        avatar_url: update_request
            .avatar_url
            .or(current_user.profile.avatar_url),
    };

    let storage = service.get_storage(request);

    match storage
        .update_user(
            current_user.id,
            UpdateUserRequest {
                email: None,
                password: password_hash,
                role: None,
                status: None,
                days_remaining: None,
                profile: Some(profile),
            },
        )
        .await
    {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "资料已更新"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            error!("Error updating profile: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新资料失败: {e}"),
                )),
            )
        }
    }
}
