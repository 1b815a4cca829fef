//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod badges;
mod evaluations;
mod notifications;
mod slots;
mod templates;
mod users;

use crate::config::AppConfig;
use crate::errors::{BootcampError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| BootcampError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BootcampError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| BootcampError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| BootcampError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BootcampError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::entities::{Assignment, AssignmentStatus},
    evaluations::{
        entities::{Evaluation, EvaluationFeedback, EvaluationStatus},
        requests::NewEvaluation,
        responses::EvaluationListItem,
    },
    notifications::{
        entities::Notification,
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_users_by_roles(&self, roles: &[&UserRole]) -> Result<Vec<User>> {
        self.list_users_by_roles_impl(roles).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn apply_progression_rewards(
        &self,
        user_id: i64,
        bonus_days: i32,
    ) -> Result<Option<User>> {
        self.apply_progression_rewards_impl(user_id, bonus_days)
            .await
    }

    async fn decrement_days_remaining_all(&self) -> Result<u64> {
        self.decrement_days_remaining_all_impl().await
    }

    // 徽章模块
    async fn ensure_badge(&self, name: &str, description: &str) -> Result<Badge> {
        self.ensure_badge_impl(name, description).await
    }

    async fn get_badge_by_name(&self, name: &str) -> Result<Option<Badge>> {
        self.get_badge_by_name_impl(name).await
    }

    async fn award_badge(&self, user_id: i64, badge_id: i64) -> Result<bool> {
        self.award_badge_impl(user_id, badge_id).await
    }

    async fn list_user_badges(&self, user_id: i64) -> Result<Vec<BadgeInfo>> {
        self.list_user_badges_impl(user_id).await
    }

    // 项目模板模块
    async fn create_template(
        &self,
        created_by: i64,
        template: CreateTemplateRequest,
    ) -> Result<ProjectTemplate> {
        self.create_template_impl(created_by, template).await
    }

    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<ProjectTemplate>> {
        self.get_template_by_id_impl(template_id).await
    }

    async fn get_template_by_order(
        &self,
        sequence_order: i32,
    ) -> Result<Option<ProjectTemplate>> {
        self.get_template_by_order_impl(sequence_order).await
    }

    async fn get_first_template(&self) -> Result<Option<ProjectTemplate>> {
        self.get_first_template_impl().await
    }

    async fn list_templates_with_pagination(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse> {
        self.list_templates_with_pagination_impl(query).await
    }

    async fn update_template(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ProjectTemplate>> {
        self.update_template_impl(template_id, update).await
    }

    async fn delete_template(&self, template_id: i64) -> Result<bool> {
        self.delete_template_impl(template_id).await
    }

    // 任务模块
    async fn create_assignment(&self, template_id: i64, student_id: i64) -> Result<Assignment> {
        self.create_assignment_impl(template_id, student_id).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn get_assignment_by_template_and_student(
        &self,
        template_id: i64,
        student_id: i64,
    ) -> Result<Option<Assignment>> {
        self.get_assignment_by_template_and_student_impl(template_id, student_id)
            .await
    }

    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_student_impl(student_id).await
    }

    async fn list_assignments_by_template(&self, template_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_template_impl(template_id).await
    }

    async fn update_assignment_repo_url(
        &self,
        assignment_id: i64,
        repo_url: &str,
    ) -> Result<bool> {
        self.update_assignment_repo_url_impl(assignment_id, repo_url)
            .await
    }

    async fn mark_assignment_submitted(
        &self,
        assignment_id: i64,
        repo_url: &str,
    ) -> Result<bool> {
        self.mark_assignment_submitted_impl(assignment_id, repo_url)
            .await
    }

    async fn update_assignment_status_checked(
        &self,
        assignment_id: i64,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<bool> {
        self.update_assignment_status_checked_impl(assignment_id, from, to)
            .await
    }

    async fn approve_assignment(&self, assignment_id: i64, staff_id: i64) -> Result<bool> {
        self.approve_assignment_impl(assignment_id, staff_id).await
    }

    async fn reject_assignment_for_rework(
        &self,
        assignment_id: i64,
        staff_id: i64,
    ) -> Result<bool> {
        self.reject_assignment_for_rework_impl(assignment_id, staff_id)
            .await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 评审模块
    async fn create_evaluations_batch(
        &self,
        entries: Vec<NewEvaluation>,
    ) -> Result<Vec<Evaluation>> {
        self.create_evaluations_batch_impl(entries).await
    }

    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(evaluation_id).await
    }

    async fn list_evaluations_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_assignment_impl(assignment_id)
            .await
    }

    async fn submit_evaluation(
        &self,
        evaluation_id: i64,
        feedback: &EvaluationFeedback,
        status: EvaluationStatus,
    ) -> Result<bool> {
        self.submit_evaluation_impl(evaluation_id, feedback, status)
            .await
    }

    async fn list_evaluations_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<EvaluationListItem>> {
        self.list_evaluations_by_student_impl(student_id).await
    }

    async fn list_pending_evaluations_by_evaluator(
        &self,
        evaluator_id: i64,
    ) -> Result<Vec<EvaluationListItem>> {
        self.list_pending_evaluations_by_evaluator_impl(evaluator_id)
            .await
    }

    async fn list_active_evaluations(&self) -> Result<Vec<EvaluationListItem>> {
        self.list_active_evaluations_impl().await
    }

    // 可用时段模块
    async fn create_slot(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<AvailabilitySlot> {
        self.create_slot_impl(evaluator_id, start_at, end_at).await
    }

    async fn find_overlapping_slot(
        &self,
        evaluator_id: i64,
        start_at: i64,
        end_at: i64,
    ) -> Result<Option<AvailabilitySlot>> {
        self.find_overlapping_slot_impl(evaluator_id, start_at, end_at)
            .await
    }

    async fn get_slot_by_id(&self, slot_id: i64) -> Result<Option<AvailabilitySlot>> {
        self.get_slot_by_id_impl(slot_id).await
    }

    async fn get_slots_by_ids(&self, slot_ids: &[i64]) -> Result<Vec<AvailabilitySlot>> {
        self.get_slots_by_ids_impl(slot_ids).await
    }

    async fn list_open_slots(&self, query: SlotListQuery) -> Result<SlotListResponse> {
        self.list_open_slots_impl(query).await
    }

    async fn delete_slot(&self, slot_id: i64) -> Result<bool> {
        self.delete_slot_impl(slot_id).await
    }

    async fn book_slot_pair(
        &self,
        slot_ids: [i64; 2],
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<()> {
        self.book_slot_pair_impl(slot_ids, student_id, project_id, assignment_id)
            .await
    }

    async fn book_single_slot(
        &self,
        slot_id: i64,
        student_id: i64,
        project_id: i64,
        assignment_id: i64,
    ) -> Result<bool> {
        self.book_single_slot_impl(slot_id, student_id, project_id, assignment_id)
            .await
    }

    async fn unbook_slots(&self, slot_ids: &[i64]) -> Result<u64> {
        self.unbook_slots_impl(slot_ids).await
    }

    async fn list_student_bookings_for_project(
        &self,
        student_id: i64,
        project_id: i64,
    ) -> Result<Vec<AvailabilitySlot>> {
        self.list_student_bookings_for_project_impl(student_id, project_id)
            .await
    }

    async fn release_slots_for_assignment(&self, assignment_id: i64) -> Result<u64> {
        self.release_slots_for_assignment_impl(assignment_id).await
    }

    async fn expire_unbooked_slots_before(&self, cutoff: i64) -> Result<Vec<AvailabilitySlot>> {
        self.expire_unbooked_slots_before_impl(cutoff).await
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(
        &self,
        notification_id: i64,
        user_id: i64,
    ) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id, user_id)
            .await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }
}
