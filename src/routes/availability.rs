use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::slots::requests::{BookSlotRequest, CreateSlotRequest, SlotListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SlotService;

// 懒加载的全局 SlotService 实例
static SLOT_SERVICE: Lazy<SlotService> = Lazy::new(SlotService::new_lazy);

// 评审人创建可用时段
pub async fn create_slot(
    req: HttpRequest,
    body: web::Json<CreateSlotRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SLOT_SERVICE
        .create_slot(&req, user_id, body.into_inner())
        .await
}

// 列出未预约时段
pub async fn list_slots(
    req: HttpRequest,
    query: web::Query<SlotListQuery>,
) -> ActixResult<HttpResponse> {
    SLOT_SERVICE.list_slots(&req, query.into_inner()).await
}

// 删除自己的未预约时段
pub async fn delete_slot(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SLOT_SERVICE
        .delete_slot(&req, path.into_inner(), user_id)
        .await
}

// 提交流程之外的单时段直接预约
pub async fn book_slot(
    req: HttpRequest,
    body: web::Json<BookSlotRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SLOT_SERVICE.book_slot(&req, user_id, body.into_inner()).await
}

// 配置路由
pub fn configure_availability_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/availability")
            .wrap(RequireJWT)
            .route("", web::post().to(create_slot))
            .route("", web::get().to(list_slots))
            .route("/book", web::post().to(book_slot))
            .route("/{id}", web::delete().to(delete_slot)),
    );
}
