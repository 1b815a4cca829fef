use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::UserListQuery;
use crate::models::{ApiResponse, ErrorCode};

// 列出用户（支持角色/状态/搜索过滤）
// GET /users
pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    query: UserListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Error listing users: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户列表失败: {e}"),
                )),
            )
        }
    }
}
