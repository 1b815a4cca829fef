pub mod count;
pub mod list;
pub mod notify;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::NotificationListQuery;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 列出通知
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        user_id: i64,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, user_id, query).await
    }

    /// 未读数量
    pub async fn unread_count(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        count::unread_count(self, request, user_id).await
    }

    /// 标记单条已读
    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_read(self, request, notification_id, user_id).await
    }

    /// 标记全部已读
    pub async fn mark_all_read(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_all_read(self, request, user_id).await
    }
}
