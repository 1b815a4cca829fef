use std::sync::Arc;

use crate::models::{
    assignments::entities::{Assignment, AssignmentStatus},
    evaluations::{
        entities::{Evaluation, EvaluationFeedback, EvaluationStatus},
        requests::NewEvaluation,
        responses::EvaluationListItem,
    },
    notifications::{
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    slots::{entities::AvailabilitySlot, requests::SlotListQuery, responses::SlotListResponse},
    templates::{
        entities::ProjectTemplate,
        requests::{CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest},
        responses::TemplateListResponse,
    },
    users::{
        entities::{Badge, User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{BadgeInfo, UserListResponse},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段传入的是 argon2 哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 按角色列出用户（通知扇出使用）
    async fn list_users_by_roles(&self, roles: &[&UserRole]) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 项目通过后的奖励：增加剩余天数、提升等级、累计完成数
    async fn apply_progression_rewards(&self, user_id: i64, bonus_days: i32)
    -> Result<Option<User>>;
    // 每日递减所有在读学员的剩余天数，归零即封禁；返回受影响行数
    async fn decrement_days_remaining_all(&self) -> Result<u64>;

    /// 徽章管理方法
    // 确保徽章目录中存在该徽章（幂等），返回徽章
    async fn ensure_badge(&self, name: &str, description: &str) -> Result<Badge>;
    // 按名称查询徽章
    async fn get_badge_by_name(&self, name: &str) -> Result<Option<Badge>>;
    // 授予徽章；用户已持有时返回 false
    async fn award_badge(&self, user_id: i64, badge_id: i64) -> Result<bool>;
    // 列出用户已获徽章
    async fn list_user_badges(&self, user_id: i64) -> Result<Vec<BadgeInfo>>;

    /// 项目模板管理方法
    async fn create_template(
        &self,
        created_by: i64,
        template: CreateTemplateRequest,
    ) -> Result<ProjectTemplate>;
    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<ProjectTemplate>>;
    // 按培养顺序查询模板（晋级使用）
    async fn get_template_by_order(&self, sequence_order: i32) -> Result<Option<ProjectTemplate>>;
    // 培养路线中的第一个模板（注册时指派）
    async fn get_first_template(&self) -> Result<Option<ProjectTemplate>>;
    async fn list_templates_with_pagination(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse>;
    async fn update_template(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ProjectTemplate>>;
    // 删除模板并级联删除其任务、评审记录与关联时段
    async fn delete_template(&self, template_id: i64) -> Result<bool>;

    /// 任务管理方法
    // 指派任务（初始状态 assigned）
    async fn create_assignment(&self, template_id: i64, student_id: i64) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn get_assignment_by_template_and_student(
        &self,
        template_id: i64,
        student_id: i64,
    ) -> Result<Option<Assignment>>;
    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    async fn list_assignments_by_template(&self, template_id: i64) -> Result<Vec<Assignment>>;
    // 修改仓库地址
    async fn update_assignment_repo_url(&self, assignment_id: i64, repo_url: &str) -> Result<bool>;
    // 提交：写入仓库地址与提交时间，状态 assigned -> pending（条件更新）
    async fn mark_assignment_submitted(&self, assignment_id: i64, repo_url: &str) -> Result<bool>;
    // 条件状态迁移：仅当当前状态为 from 时更新为 to
    async fn update_assignment_status_checked(
        &self,
        assignment_id: i64,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<bool>;
    // 教务通过：awaiting_staff_review -> approved，记录终审人
    async fn approve_assignment(&self, assignment_id: i64, staff_id: i64) -> Result<bool>;
    // 教务驳回：回到 assigned 并清空提交信息，记录终审人
    async fn reject_assignment_for_rework(
        &self,
        assignment_id: i64,
        staff_id: i64,
    ) -> Result<bool>;
    // 删除任务并级联删除评审记录与关联时段
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 评审记录管理方法
    // 提交时批量创建（每个预约时段一条，状态 pending）
    async fn create_evaluations_batch(
        &self,
        entries: Vec<NewEvaluation>,
    ) -> Result<Vec<Evaluation>>;
    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>>;
    async fn list_evaluations_by_assignment(&self, assignment_id: i64)
    -> Result<Vec<Evaluation>>;
    // 提交评审结论；仅 pending 状态可提交（条件更新防止重复提交）
    async fn submit_evaluation(
        &self,
        evaluation_id: i64,
        feedback: &EvaluationFeedback,
        status: EvaluationStatus,
    ) -> Result<bool>;
    // 学员视角：自己被评审的记录
    async fn list_evaluations_by_student(&self, student_id: i64)
    -> Result<Vec<EvaluationListItem>>;
    // 评审人视角：待处理的评审
    async fn list_pending_evaluations_by_evaluator(
        &self,
        evaluator_id: i64,
    ) -> Result<Vec<EvaluationListItem>>;
    // 教务视角：所有处于评审流程中的记录
    async fn list_active_evaluations(&self) -> Result<Vec<EvaluationListItem>>;

    /// 可用时段管理方法
    async fn create_slot(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<AvailabilitySlot>;
    // 查找同一评审人的重叠时段
    async fn find_overlapping_slot(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<Option<AvailabilitySlot>>;
    async fn get_slot_by_id(&self, slot_id: i64) -> Result<Option<AvailabilitySlot>>;
    async fn get_slots_by_ids(&self, slot_ids: &[i64]) -> Result<Vec<AvailabilitySlot>>;
    // 未预约时段列表（按开始时间升序，附带评审人信息）
    async fn list_open_slots(&self, query: SlotListQuery) -> Result<SlotListResponse>;
    async fn delete_slot(&self, slot_id: i64) -> Result<bool>;
    // 成对预约：两个时段在同一事务内条件更新，任一已被抢占则整体回滚
    async fn book_slot_pair(
        &self,
        slot_ids: [i64; 2],
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<()>;
    // 单时段预约（提交流程之外）
    async fn book_single_slot(
        &self,
        slot_id: i64,
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<bool>;
    // 解除预约（提交流程补偿使用），返回受影响数量
    async fn unbook_slots(&self, slot_ids: &[i64]) -> Result<u64>;
    // 某学员为某项目已预约的全部时段（间隔校验使用）
    async fn list_student_bookings_for_project(
        &self,
        student_id: i64,
        project_id: i64,
    ) -> Result<Vec<AvailabilitySlot>>;
    // 删除任务关联的时段（级联删除使用），返回删除数量
    async fn release_slots_for_assignment(&self, assignment_id: i64) -> Result<u64>;
    // 删除起始时间早于 cutoff 的未预约时段，返回被删除的时段
    async fn expire_unbooked_slots_before(&self, cutoff: i64) -> Result<Vec<AvailabilitySlot>>;

    /// 通知管理方法
    async fn create_notification(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<crate::models::notifications::entities::Notification>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, notification_id: i64, user_id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
