//! 项目模板存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::availability_slots::{Column as SlotColumn, Entity as AvailabilitySlots};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::project_templates::{ActiveModel, Column, Entity as ProjectTemplates};
use crate::errors::{BootcampError, Result};
use crate::models::{
    PaginationInfo,
    templates::{
        entities::ProjectTemplate,
        requests::{CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest},
        responses::TemplateListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

fn to_json_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

impl SeaOrmStorage {
    /// 创建项目模板
    pub async fn create_template_impl(
        &self,
        created_by: i64,
        req: CreateTemplateRequest,
    ) -> Result<ProjectTemplate> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            objectives: Set(to_json_list(&req.objectives)),
            specifications: Set(to_json_list(&req.specifications)),
            exercises: Set(to_json_list(&req.exercises)),
            resource_links: Set(to_json_list(&req.resource_links)),
            demo_video_url: Set(req.demo_video_url),
            size: Set(req.size.to_string()),
            sequence_order: Set(req.sequence_order),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("创建项目模板失败: {e}")))?;

        Ok(result.into_template())
    }

    /// 通过 ID 获取模板
    pub async fn get_template_by_id_impl(
        &self,
        template_id: i64,
    ) -> Result<Option<ProjectTemplate>> {
        let result = ProjectTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询项目模板失败: {e}")))?;

        Ok(result.map(|m| m.into_template()))
    }

    /// 按培养顺序查询模板
    pub async fn get_template_by_order_impl(
        &self,
        sequence_order: i32,
    ) -> Result<Option<ProjectTemplate>> {
        let result = ProjectTemplates::find()
            .filter(Column::SequenceOrder.eq(sequence_order))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("按顺序查询模板失败: {e}")))?;

        Ok(result.map(|m| m.into_template()))
    }

    /// 培养路线中的第一个模板
    pub async fn get_first_template_impl(&self) -> Result<Option<ProjectTemplate>> {
        let result = ProjectTemplates::find()
            .order_by_asc(Column::SequenceOrder)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询首个模板失败: {e}")))?;

        Ok(result.map(|m| m.into_template()))
    }

    /// 列出模板（分页）
    pub async fn list_templates_with_pagination_impl(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = ProjectTemplates::find();

        if let Some(ref search) = query.search {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(search.as_str()))
                    .add(Column::Description.contains(search.as_str())),
            );
        }

        select = select.order_by_asc(Column::SequenceOrder);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询模板总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询模板页数失败: {e}")))?;

        let templates = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询模板列表失败: {e}")))?;

        Ok(TemplateListResponse {
            items: templates.into_iter().map(|m| m.into_template()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新模板
    pub async fn update_template_impl(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ProjectTemplate>> {
        let Some(existing) = ProjectTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询项目模板失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(objectives) = update.objectives {
            model.objectives = Set(to_json_list(&objectives));
        }
        if let Some(specifications) = update.specifications {
            model.specifications = Set(to_json_list(&specifications));
        }
        if let Some(exercises) = update.exercises {
            model.exercises = Set(to_json_list(&exercises));
        }
        if let Some(resource_links) = update.resource_links {
            model.resource_links = Set(to_json_list(&resource_links));
        }
        if let Some(demo_video_url) = update.demo_video_url {
            model.demo_video_url = Set(Some(demo_video_url));
        }
        if let Some(size) = update.size {
            model.size = Set(size.to_string());
        }
        if let Some(sequence_order) = update.sequence_order {
            model.sequence_order = Set(sequence_order);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("更新项目模板失败: {e}")))?;

        Ok(Some(result.into_template()))
    }

    /// 删除模板并级联删除其任务、评审记录与关联时段
    pub async fn delete_template_impl(&self, template_id: i64) -> Result<bool> {
        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::TemplateId.eq(template_id))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询模板任务失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if !assignment_ids.is_empty() {
            Evaluations::delete_many()
                .filter(EvaluationColumn::AssignmentId.is_in(assignment_ids.clone()))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    BootcampError::database_operation(format!("级联删除评审记录失败: {e}"))
                })?;

            AvailabilitySlots::delete_many()
                .filter(SlotColumn::AssignmentId.is_in(assignment_ids))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    BootcampError::database_operation(format!("级联删除预约时段失败: {e}"))
                })?;
        }

        Assignments::delete_many()
            .filter(AssignmentColumn::TemplateId.eq(template_id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("级联删除任务失败: {e}")))?;

        let result = ProjectTemplates::delete_by_id(template_id)
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除项目模板失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
