//! 评审可用时段存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::availability_slots::{ActiveModel, Column, Entity as AvailabilitySlots};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{BootcampError, Result};
use crate::models::slots::{
    entities::AvailabilitySlot,
    requests::SlotListQuery,
    responses::{SlotEvaluator, SlotListItem, SlotListResponse},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建未预约时段
    pub async fn create_slot_impl(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<AvailabilitySlot> {
        let model = ActiveModel {
            evaluator_id: Set(evaluator_id),
            start_at: Set(start_at),
            end_at: Set(end_at),
            booked: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("创建时段失败: {e}")))?;

        Ok(result.into_slot())
    }

    /// 查找同一评审人的重叠时段
    ///
    /// 重叠条件：existing.start < new.end && existing.end > new.start
    pub async fn find_overlapping_slot_impl(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<Option<AvailabilitySlot>> {
        let result = AvailabilitySlots::find()
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .filter(Column::StartAt.lt(end_at))
            .filter(Column::EndAt.gt(start_at))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询重叠时段失败: {e}")))?;

        Ok(result.map(|m| m.into_slot()))
    }

    /// 通过 ID 获取时段
    pub async fn get_slot_by_id_impl(&self, slot_id: i64) -> Result<Option<AvailabilitySlot>> {
        let result = AvailabilitySlots::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询时段失败: {e}")))?;

        Ok(result.map(|m| m.into_slot()))
    }

    /// 批量获取时段
    pub async fn get_slots_by_ids_impl(&self, slot_ids: &[i64]) -> Result<Vec<AvailabilitySlot>> {
        let results = AvailabilitySlots::find()
            .filter(Column::Id.is_in(slot_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("批量查询时段失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_slot()).collect())
    }

    /// 未预约时段列表（按开始时间升序，附带评审人信息）
    pub async fn list_open_slots_impl(&self, query: SlotListQuery) -> Result<SlotListResponse> {
        let mut select = AvailabilitySlots::find().filter(Column::Booked.eq(false));

        if let Some(date_from) = query.date_from {
            select = select.filter(Column::StartAt.gte(date_from.timestamp()));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::StartAt.lte(date_to.timestamp()));
        }
        if let Some(evaluator_id) = query.evaluator_id {
            select = select.filter(Column::EvaluatorId.eq(evaluator_id));
        }

        let slots = select
            .order_by_asc(Column::StartAt)
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询时段列表失败: {e}")))?;

        // 批量查询评审人信息
        let evaluator_ids: Vec<i64> = slots
            .iter()
            .map(|s| s.evaluator_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(evaluator_ids))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询评审人信息失败: {e}")))?;
        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        let items = slots
            .into_iter()
            .map(|s| {
                let evaluator = user_map.get(&s.evaluator_id);
                SlotListItem {
                    evaluator: SlotEvaluator {
                        id: s.evaluator_id,
                        username: evaluator
                            .map(|u| u.username.clone())
                            .unwrap_or_else(|| "未知用户".to_string()),
                        profile_name: evaluator.and_then(|u| u.profile_name.clone()),
                    },
                    slot: s.into_slot(),
                }
            })
            .collect();

        Ok(SlotListResponse { items })
    }

    /// 删除时段
    pub async fn delete_slot_impl(&self, slot_id: i64) -> Result<bool> {
        let result = AvailabilitySlots::delete_by_id(slot_id)
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除时段失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 成对预约：两个时段在同一事务内条件更新
    ///
    /// 每条更新都带 booked = false 条件，影响行数为零说明该时段
    /// 已被并发请求抢占，整体回滚并返回冲突错误。
    pub async fn book_slot_pair_impl(
        &self,
        slot_ids: [i64; 2],
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BootcampError::database_operation(format!("开启事务失败: {e}")))?;

        for slot_id in slot_ids {
            let result = AvailabilitySlots::update_many()
                .col_expr(Column::Booked, Expr::value(true))
                .col_expr(Column::BookedBy, Expr::value(student_id))
                .col_expr(Column::ProjectId, Expr::value(project_id))
                .col_expr(Column::AssignmentId, Expr::value(assignment_id))
                .filter(Column::Id.eq(slot_id))
                .filter(Column::Booked.eq(false))
                .exec(&txn)
                .await
                .map_err(|e| BootcampError::database_operation(format!("预约时段失败: {e}")))?;

            if result.rows_affected == 0 {
                txn.rollback()
                    .await
                    .map_err(|e| BootcampError::database_operation(format!("回滚事务失败: {e}")))?;
                return Err(BootcampError::conflict(format!(
                    "时段 {slot_id} 已被预约"
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| BootcampError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 单时段预约（条件更新，返回是否抢占成功）
    pub async fn book_single_slot_impl(
        &self,
        slot_id: i64,
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<bool> {
        let result = AvailabilitySlots::update_many()
            .col_expr(Column::Booked, Expr::value(true))
            .col_expr(Column::BookedBy, Expr::value(student_id))
            .col_expr(Column::ProjectId, Expr::value(project_id))
            .col_expr(Column::AssignmentId, Expr::value(assignment_id))
            .filter(Column::Id.eq(slot_id))
            .filter(Column::Booked.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("预约时段失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 解除预约（提交流程补偿使用）
    pub async fn unbook_slots_impl(&self, slot_ids: &[i64]) -> Result<u64> {
        let result = AvailabilitySlots::update_many()
            .col_expr(Column::Booked, Expr::value(false))
            .col_expr(Column::BookedBy, Expr::value(None::<i64>))
            .col_expr(Column::ProjectId, Expr::value(None::<i64>))
            .col_expr(Column::AssignmentId, Expr::value(None::<i64>))
            .filter(Column::Id.is_in(slot_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("解除时段预约失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 某学员为某项目已预约的全部时段
    pub async fn list_student_bookings_for_project_impl(
        &self,
        student_id: i64,
        project_id: i64,
    ) -> Result<Vec<AvailabilitySlot>> {
        let results = AvailabilitySlots::find()
            .filter(Column::BookedBy.eq(student_id))
            .filter(Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询学员预约失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_slot()).collect())
    }

    /// 删除任务关联的时段（级联删除使用）
    pub async fn release_slots_for_assignment_impl(&self, assignment_id: i64) -> Result<u64> {
        let result = AvailabilitySlots::delete_many()
            .filter(Column::AssignmentId.eq(assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除任务时段失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除起始时间早于 cutoff 的未预约时段，返回被删除的时段
    ///
    /// 先查询后删除；删除按 ID 进行，重复执行无副作用。
    pub async fn expire_unbooked_slots_before_impl(
        &self,
        cutoff: i64,
    ) -> Result<Vec<AvailabilitySlot>> {
        let stale = AvailabilitySlots::find()
            .filter(Column::Booked.eq(false))
            .filter(Column::StartAt.lte(cutoff))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询过期时段失败: {e}")))?;

        if stale.is_empty() {
            return Ok(vec![]);
        }

        let stale_ids: Vec<i64> = stale.iter().map(|s| s.id).collect();
        AvailabilitySlots::delete_many()
            .filter(Column::Id.is_in(stale_ids))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除过期时段失败: {e}")))?;

        Ok(stale.into_iter().map(|m| m.into_slot()).collect())
    }
}
