use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SlotService;
use crate::models::{ApiResponse, ErrorCode};

// 删除自己的未预约时段
// DELETE /availability/{id}
pub async fn delete_slot(
    service: &SlotService,
    request: &HttpRequest,
    slot_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let slot = match storage.get_slot_by_id(slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SlotNotFound,
                "时段不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching slot {}: {}", slot_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询时段失败: {e}"),
                )),
            );
        }
    };

    if slot.evaluator_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能删除自己的时段",
        )));
    }

    if slot.booked {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SlotAlreadyBooked,
            "已被预约的时段不能删除",
        )));
    }

    match storage.delete_slot(slot_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("时段已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SlotNotFound,
            "时段不存在",
        ))),
        Err(e) => {
            error!("Error deleting slot {}: {}", slot_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除时段失败: {e}"),
                )),
            )
        }
    }
}
