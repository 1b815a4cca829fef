use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::responses::UserDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

// 获取用户详情（附带已获徽章）
// GET /users/{id}
pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => {
            let badges = storage.list_user_badges(user_id).await.unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserDetailResponse { user, badges },
                "查询成功",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            error!("Error fetching user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            )
        }
    }
}
