use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::NotificationService;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::models::{ApiResponse, ErrorCode};

// 获取当前用户的未读通知数量
pub async fn unread_count(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_unread_notification_count(user_id).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread_count },
            "查询成功",
        ))),
        Err(e) => {
            error!("Error counting unread notifications: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询未读通知数量失败: {e}"),
                )),
            )
        }
    }
}
