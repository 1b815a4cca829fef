use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

// 使用 refresh token cookie 换取新的 access token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Missing refresh token",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed",
        ))),
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid refresh token",
            )))
        }
    }
}

// 验证当前 access token 是否有效
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 能走到这里说明 RequireJWT 已验证通过
    match RequireJWT::extract_user_id(request) {
        Some(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Token is valid"))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Token is invalid",
        ))),
    }
}

// 获取当前用户信息（附带已获徽章）
pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let storage = service.get_storage(request);
    let badges = storage.list_user_badges(user.id).await.unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        crate::models::users::responses::UserDetailResponse { user, badges },
        "查询成功",
    )))
}
