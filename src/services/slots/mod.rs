pub mod book;
pub mod create;
pub mod delete;
pub mod expire;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::slots::requests::{BookSlotRequest, CreateSlotRequest, SlotListQuery};
use crate::storage::Storage;

pub struct SlotService {
    storage: Option<Arc<dyn Storage>>,
}

impl SlotService {
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

    /// 评审人创建可用时段
    pub async fn create_slot(
        &self,
        request: &HttpRequest,
        evaluator_id: i64,
        req: CreateSlotRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_slot(self, request, evaluator_id, req).await
    }

    /// 列出未预约时段
    pub async fn list_slots(
        &self,
        request: &HttpRequest,
        query: SlotListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_slots(self, request, query).await
    }

    /// 删除自己的未预约时段
    pub async fn delete_slot(
        &self,
        request: &HttpRequest,
        slot_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_slot(self, request, slot_id, user_id).await
    }

    /// 提交流程之外的单时段直接预约
    pub async fn book_slot(
        &self,
        request: &HttpRequest,
        student_id: i64,
        req: BookSlotRequest,
    ) -> ActixResult<HttpResponse> {
        book::book_single_slot(self, request, student_id, req).await
    }
}
