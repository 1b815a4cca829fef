use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;

// 更新用户（角色、状态、剩余天数等）
// PUT /users/{id}
pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut req: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    // 明文密码在此哈希后才进入存储层
    if let Some(password) = req.password.take() {
        req.password = match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!("Failed to hash password: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "更新用户失败",
                    )),
                );
            }
        };
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, req).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            error!("Error updating user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新用户失败: {e}"),
                )),
            )
        }
    }
}
