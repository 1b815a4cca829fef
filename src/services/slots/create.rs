use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SlotService;
use crate::models::slots::requests::CreateSlotRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_slot_window;

// 创建可用时段
// POST /availability
pub async fn create_slot(
    service: &SlotService,
    request: &HttpRequest,
    evaluator_id: i64,
    req: CreateSlotRequest,
) -> ActixResult<HttpResponse> {
    // 时间窗口校验：工作日 09:00–17:00（UTC），时长不超过 48 小时
    if let Err(reason) = validate_slot_window(req.start_at, req.end_at) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::SlotWindowInvalid,
            reason,
        )));
    }

    let storage = service.get_storage(request);

    // 同一评审人的时段不允许重叠（相同时段视为重叠）
    match storage
        .find_overlapping_slot(
            evaluator_id,
            req.start_at.timestamp(),
            req.end_at.timestamp(),
        )
        .await
    {
        Ok(Some(existing)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SlotOverlap,
                format!(
                    "与已有时段重叠（{} - {}）",
                    existing.start_at.to_rfc3339(),
                    existing.end_at.to_rfc3339()
                ),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking slot overlap: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询重叠时段失败: {e}"),
                )),
            );
        }
    }

    match storage
        .create_slot(
            evaluator_id,
            req.start_at.timestamp(),
            req.end_at.timestamp(),
        )
        .await
    {
        Ok(slot) => Ok(HttpResponse::Ok().json(ApiResponse::success(slot, "时段创建成功"))),
        Err(e) => {
            error!("Error creating availability slot: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建时段失败: {e}"),
                )),
            )
        }
    }
}
