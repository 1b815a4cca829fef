use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};

// 删除用户
// DELETE /users/{id}
pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_user(user_id).await {
        Ok(true) => {
            warn!("User {} deleted", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("用户已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            error!("Error deleting user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除用户失败: {e}"),
                )),
            )
        }
    }
}
