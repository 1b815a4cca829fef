pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
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

    /// 评审人提交结论
    pub async fn submit_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        evaluator_id: i64,
        req: SubmitEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_evaluation(self, request, evaluation_id, evaluator_id, req).await
    }

    /// 学员视角：自己被评审的记录
    pub async fn list_my_evaluations(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_my_evaluations(self, request, student_id).await
    }

    /// 评审人视角：待处理的评审
    pub async fn list_todo_evaluations(
        &self,
        request: &HttpRequest,
        evaluator_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_todo_evaluations(self, request, evaluator_id).await
    }

    /// 教务视角：所有评审流程中的记录
    pub async fn list_pending_evaluations(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_evaluations(self, request).await
    }
}
