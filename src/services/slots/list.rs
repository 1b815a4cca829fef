use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SlotService;
use crate::models::slots::requests::SlotListQuery;
use crate::models::{ApiResponse, ErrorCode};

// 列出未预约时段（按开始时间升序，附带评审人信息）
// GET /availability
pub async fn list_slots(
    service: &SlotService,
    request: &HttpRequest,
    query: SlotListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_open_slots(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Error listing availability slots: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询时段列表失败: {e}"),
                )),
            )
        }
    }
}
