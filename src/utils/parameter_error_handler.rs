//! actix-web 请求参数解析错误处理器
//!
//! 将 JSON / Query 解析失败转换为统一的 ApiResponse 结构。

use actix_web::{HttpRequest, HttpResponse, error};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let message = format!("请求体解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    error::InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    let message = format!("查询参数解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    error::InternalError::from_response(err, response).into()
}
