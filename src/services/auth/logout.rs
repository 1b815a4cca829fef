use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AuthService;
use crate::cache::ObjectCache;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

// 注销：清除缓存中的用户条目并失效 refresh token cookie
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    {
        if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>() {
            cache.get_ref().remove(&format!("user:{token}")).await;
        }
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("已注销")))
}
