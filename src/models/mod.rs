pub mod assignments;
pub mod auth;
pub mod common;
pub mod evaluations;
pub mod notifications;
pub mod slots;
pub mod templates;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 应用启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
