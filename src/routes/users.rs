use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::services::UserService;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// 列出用户
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req, query.into_inner()).await
}

// 创建用户
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&req, body.into_inner()).await
}

// 获取用户详情
pub async fn get_user(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, path.into_inner()).await
}

// 更新用户
pub async fn update_user(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除用户
pub async fn delete_user(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
