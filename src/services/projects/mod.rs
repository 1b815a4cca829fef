pub mod aggregate;
pub mod assignments;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod review;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    CreateAssignmentRequest, FinalReviewRequest, FinalVerdict, SubmitAssignmentRequest,
    UpdateRepoUrlRequest,
};
use crate::models::templates::requests::{
    CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct ProjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectService {
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

    /// 创建项目模板
    pub async fn create_template(
        &self,
        request: &HttpRequest,
        created_by: i64,
        req: CreateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_template(self, request, created_by, req).await
    }

    /// 列出项目模板
    pub async fn list_templates(
        &self,
        request: &HttpRequest,
        query: TemplateListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_templates(self, request, query).await
    }

    /// 获取模板详情
    pub async fn get_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
        current_user: &User,
    ) -> ActixResult<HttpResponse> {
        detail::get_template(self, request, template_id, current_user).await
    }

    /// 更新项目模板
    pub async fn update_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
        req: UpdateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_template(self, request, template_id, req).await
    }

    /// 删除项目模板（级联）
    pub async fn delete_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_template(self, request, template_id).await
    }

    /// 管理员指派任务
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        template_id: i64,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::create_assignment(self, request, template_id, req).await
    }

    /// 删除任务（级联）
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        template_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        assignments::delete_assignment(self, request, template_id, student_id).await
    }

    /// 修改任务仓库地址
    pub async fn update_repo_url(
        &self,
        request: &HttpRequest,
        template_id: i64,
        current_user: &User,
        req: UpdateRepoUrlRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::update_repo_url(self, request, template_id, current_user, req).await
    }

    /// 学员提交任务
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        template_id: i64,
        student: &User,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, template_id, student, req).await
    }

    /// 教务终审
    pub async fn final_review(
        &self,
        request: &HttpRequest,
        template_id: i64,
        staff: &User,
        req: FinalReviewRequest,
    ) -> ActixResult<HttpResponse> {
        review::final_review(self, request, template_id, staff, req).await
    }

    /// 旧版直接通过/驳回入口，统一走终审逻辑
    pub async fn legacy_verdict(
        &self,
        request: &HttpRequest,
        template_id: i64,
        staff: &User,
        assignment_id: i64,
        verdict: FinalVerdict,
    ) -> ActixResult<HttpResponse> {
        review::final_review(
            self,
            request,
            template_id,
            staff,
            FinalReviewRequest {
                assignment_id,
                status: verdict,
            },
        )
        .await
    }
}
