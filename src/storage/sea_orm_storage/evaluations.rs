//! 评审记录存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::availability_slots::{Column as SlotColumn, Entity as AvailabilitySlots};
use crate::entity::evaluations::{
    ActiveModel, Column, Entity as Evaluations, Model as EvaluationModel,
};
use crate::entity::project_templates::{Column as TemplateColumn, Entity as ProjectTemplates};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{BootcampError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::evaluations::{
    entities::{Evaluation, EvaluationFeedback, EvaluationStatus},
    requests::NewEvaluation,
    responses::{EvaluationListItem, EvaluationParty, EvaluationSlotInfo},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 提交时批量创建评审记录（每个预约时段一条，状态 pending）
    pub async fn create_evaluations_batch_impl(
        &self,
        entries: Vec<NewEvaluation>,
    ) -> Result<Vec<Evaluation>> {
        let now = chrono::Utc::now().timestamp();
        let mut evaluations = Vec::new();

        for entry in entries {
            let model = ActiveModel {
                assignment_id: Set(entry.assignment_id),
                student_id: Set(entry.student_id),
                evaluator_id: Set(entry.evaluator_id),
                slot_id: Set(entry.slot_id),
                status: Set(EvaluationStatus::Pending.to_string()),
                created_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&self.db)
                .await
                .map_err(|e| {
                    BootcampError::database_operation(format!("批量创建评审记录失败: {e}"))
                })?;

            evaluations.push(result.into_evaluation());
        }

        Ok(evaluations)
    }

    /// 通过 ID 获取评审记录
    pub async fn get_evaluation_by_id_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询评审记录失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 任务下的全部评审记录
    pub async fn list_evaluations_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Evaluation>> {
        let results = Evaluations::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询任务评审失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 提交评审结论
    ///
    /// 条件更新：仅 pending 状态可写入，防止重复提交覆盖已有结论。
    pub async fn submit_evaluation_impl(
        &self,
        evaluation_id: i64,
        feedback: &EvaluationFeedback,
        status: EvaluationStatus,
    ) -> Result<bool> {
        let result = Evaluations::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::Assiduity, Expr::value(feedback.assiduity.clone()))
            .col_expr(
                Column::Comprehension,
                Expr::value(feedback.comprehension.clone()),
            )
            .col_expr(
                Column::SpecAdherence,
                Expr::value(feedback.spec_adherence.clone()),
            )
            .col_expr(
                Column::ConceptMastery,
                Expr::value(feedback.concept_mastery.clone()),
            )
            .col_expr(
                Column::Explanation,
                Expr::value(feedback.explanation.clone()),
            )
            .col_expr(
                Column::SubmittedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(evaluation_id))
            .filter(Column::Status.eq(EvaluationStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("提交评审结论失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学员视角：自己被评审的记录
    pub async fn list_evaluations_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EvaluationListItem>> {
        let evaluations = Evaluations::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询学员评审失败: {e}")))?;

        self.assemble_evaluation_items(evaluations).await
    }

    /// 评审人视角：待处理的评审
    pub async fn list_pending_evaluations_by_evaluator_impl(
        &self,
        evaluator_id: i64,
    ) -> Result<Vec<EvaluationListItem>> {
        let evaluations = Evaluations::find()
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .filter(Column::Status.eq(EvaluationStatus::Pending.to_string()))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询待评审记录失败: {e}")))?;

        self.assemble_evaluation_items(evaluations).await
    }

    /// 教务视角：所有处于评审流程中（pending / awaiting_staff_review）的记录
    pub async fn list_active_evaluations_impl(&self) -> Result<Vec<EvaluationListItem>> {
        let active_assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::Status.is_in([
                AssignmentStatus::Pending.to_string(),
                AssignmentStatus::AwaitingStaffReview.to_string(),
            ]))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询评审中任务失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if active_assignment_ids.is_empty() {
            return Ok(vec![]);
        }

        let evaluations = Evaluations::find()
            .filter(Column::AssignmentId.is_in(active_assignment_ids))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询评审记录失败: {e}")))?;

        self.assemble_evaluation_items(evaluations).await
    }

    /// 组装带关联信息的评审条目：项目标题 + 双方用户 + 时段
    async fn assemble_evaluation_items(
        &self,
        evaluations: Vec<EvaluationModel>,
    ) -> Result<Vec<EvaluationListItem>> {
        if evaluations.is_empty() {
            return Ok(vec![]);
        }

        // 1. 批量查询所属任务与模板标题
        let assignment_ids: Vec<i64> = evaluations
            .iter()
            .map(|e| e.assignment_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let assignments = Assignments::find()
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询所属任务失败: {e}")))?;

        let template_ids: Vec<i64> = assignments
            .iter()
            .map(|a| a.template_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let templates = ProjectTemplates::find()
            .filter(TemplateColumn::Id.is_in(template_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询项目模板失败: {e}")))?;

        let template_title_map: HashMap<i64, String> =
            templates.into_iter().map(|t| (t.id, t.title)).collect();
        let assignment_template_map: HashMap<i64, i64> = assignments
            .into_iter()
            .map(|a| (a.id, a.template_id))
            .collect();

        // 2. 批量查询双方用户
        let mut user_ids: Vec<i64> = evaluations
            .iter()
            .flat_map(|e| [e.student_id, e.evaluator_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户信息失败: {e}")))?;
        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        // 3. 批量查询时段
        let slot_ids: Vec<i64> = evaluations.iter().map(|e| e.slot_id).collect();
        let slots = AvailabilitySlots::find()
            .filter(SlotColumn::Id.is_in(slot_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询时段信息失败: {e}")))?;
        let slot_map: HashMap<i64, _> = slots.into_iter().map(|s| (s.id, s)).collect();

        let party = |user_id: i64| {
            let user = user_map.get(&user_id);
            EvaluationParty {
                id: user_id,
                username: user
                    .map(|u| u.username.clone())
                    .unwrap_or_else(|| "未知用户".to_string()),
                profile_name: user.and_then(|u| u.profile_name.clone()),
            }
        };

        // 4. 组装结果
        let items = evaluations
            .into_iter()
            .map(|e| {
                let project_title = assignment_template_map
                    .get(&e.assignment_id)
                    .and_then(|tid| template_title_map.get(tid))
                    .cloned()
                    .unwrap_or_default();
                let slot = slot_map.get(&e.slot_id).map(|s| EvaluationSlotInfo {
                    id: s.id,
                    start_at: chrono::DateTime::from_timestamp(s.start_at, 0)
                        .unwrap_or_default(),
                    end_at: chrono::DateTime::from_timestamp(s.end_at, 0).unwrap_or_default(),
                });

                EvaluationListItem {
                    project_title,
                    student: party(e.student_id),
                    evaluator: party(e.evaluator_id),
                    slot,
                    evaluation: e.into_evaluation(),
                }
            })
            .collect();

        Ok(items)
    }
}
