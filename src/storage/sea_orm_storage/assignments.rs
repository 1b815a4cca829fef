//! 任务存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::availability_slots::{Column as SlotColumn, Entity as AvailabilitySlots};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::errors::{BootcampError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 指派任务（初始状态 assigned）
    pub async fn create_assignment_impl(
        &self,
        template_id: i64,
        student_id: i64,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            template_id: Set(template_id),
            student_id: Set(student_id),
            status: Set(AssignmentStatus::Assigned.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("创建任务失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取任务
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 按模板与学员查询任务
    pub async fn get_assignment_by_template_and_student_impl(
        &self,
        template_id: i64,
        student_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find()
            .filter(Column::TemplateId.eq(template_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 学员的全部任务
    pub async fn list_assignments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询学员任务失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 模板下的全部任务
    pub async fn list_assignments_by_template_impl(
        &self,
        template_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::TemplateId.eq(template_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询模板任务失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 修改仓库地址
    pub async fn update_assignment_repo_url_impl(
        &self,
        assignment_id: i64,
        repo_url: &str,
    ) -> Result<bool> {
        let result = Assignments::update_many()
            .col_expr(Column::RepoUrl, Expr::value(repo_url.to_string()))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("更新仓库地址失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 提交：写入仓库地址与提交时间，状态 assigned -> pending
    ///
    /// 条件更新，仅在状态仍为 assigned 时生效。
    pub async fn mark_assignment_submitted_impl(
        &self,
        assignment_id: i64,
        repo_url: &str,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::RepoUrl, Expr::value(repo_url.to_string()))
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Pending.to_string()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::Status.eq(AssignmentStatus::Assigned.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("标记任务已提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 条件状态迁移：仅当当前状态为 from 时更新为 to
    pub async fn update_assignment_status_checked_impl(
        &self,
        assignment_id: i64,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<bool> {
        let result = Assignments::update_many()
            .col_expr(Column::Status, Expr::value(to.to_string()))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::Status.eq(from.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("任务状态迁移失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教务通过：awaiting_staff_review -> approved
    pub async fn approve_assignment_impl(
        &self,
        assignment_id: i64,
        staff_id: i64,
    ) -> Result<bool> {
        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Approved.to_string()),
            )
            .col_expr(Column::StaffValidatorId, Expr::value(staff_id))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::Status.eq(AssignmentStatus::AwaitingStaffReview.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("通过任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教务驳回：回到 assigned 并清空提交信息
    ///
    /// 同伴评审否决（rejected）的任务也走这里回到可重做状态。
    pub async fn reject_assignment_for_rework_impl(
        &self,
        assignment_id: i64,
        staff_id: i64,
    ) -> Result<bool> {
        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Assigned.to_string()),
            )
            .col_expr(Column::RepoUrl, Expr::value(None::<String>))
            .col_expr(Column::SubmittedAt, Expr::value(None::<i64>))
            .col_expr(Column::StaffValidatorId, Expr::value(staff_id))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(assignment_id))
            .filter(
                Column::Status.is_in([
                    AssignmentStatus::AwaitingStaffReview.to_string(),
                    AssignmentStatus::Rejected.to_string(),
                ]),
            )
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("驳回任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除任务并级联删除评审记录与关联时段
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        Evaluations::delete_many()
            .filter(EvaluationColumn::AssignmentId.eq(assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("级联删除评审记录失败: {e}")))?;

        AvailabilitySlots::delete_many()
            .filter(SlotColumn::AssignmentId.eq(assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("级联删除预约时段失败: {e}")))?;

        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
