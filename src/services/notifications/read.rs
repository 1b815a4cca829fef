use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::NotificationService;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};

// 标记单条通知为已读
pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .mark_notification_as_read(notification_id, user_id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已标记为已读"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        ))),
        Err(e) => {
            error!("Error marking notification {} as read: {}", notification_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("标记通知已读失败: {e}"),
                )),
            )
        }
    }
}

// 标记全部通知为已读
pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user_id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "已全部标记为已读",
        ))),
        Err(e) => {
            error!("Error marking all notifications as read: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("标记全部通知已读失败: {e}"),
                )),
            )
        }
    }
}
