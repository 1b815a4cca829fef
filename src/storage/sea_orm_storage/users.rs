//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{BootcampError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建用户（password 字段此时已是 argon2 哈希）
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            profile_name: Set(Some(req.profile.profile_name)),
            avatar_url: Set(req.profile.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出用户（分页）
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(ref search) = query.search {
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(search.as_str()))
                    .add(Column::Email.contains(search.as_str()))
                    .add(Column::ProfileName.contains(search.as_str())),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按角色列出用户
    pub async fn list_users_by_roles_impl(&self, roles: &[&UserRole]) -> Result<Vec<User>> {
        let role_names: Vec<String> = roles.iter().map(|r| r.to_string()).collect();

        let users = Users::find()
            .filter(Column::Role.is_in(role_names))
            .all(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("按角色查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = update.password {
            model.password_hash = Set(password_hash);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(days_remaining) = update.days_remaining {
            model.days_remaining = Set(days_remaining);
        }
        if let Some(profile) = update.profile {
            model.profile_name = Set(Some(profile.profile_name));
            model.avatar_url = Set(profile.avatar_url);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("更新用户失败: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("统计用户数量失败: {e}")))
    }

    /// 项目通过后的奖励：剩余天数、等级、完成计数
    pub async fn apply_progression_rewards_impl(
        &self,
        user_id: i64,
        bonus_days: i32,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(None);
        };

        let new_level = existing.level.max(1) + 1;
        let new_days = existing.days_remaining + bonus_days;
        let new_total = existing.total_projects_completed + 1;

        let mut model: ActiveModel = existing.into();
        model.days_remaining = Set(new_days);
        model.level = Set(new_level);
        model.total_projects_completed = Set(new_total);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("更新培养进度失败: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 每日递减在读学员的剩余天数，归零即封禁
    pub async fn decrement_days_remaining_all_impl(&self) -> Result<u64> {
        use sea_orm::sea_query::{Expr, ExprTrait};

        let decremented = Users::update_many()
            .col_expr(
                Column::DaysRemaining,
                Expr::col(Column::DaysRemaining).sub(1),
            )
            .filter(Column::Role.eq(UserRole::Apprenant.to_string()))
            .filter(Column::Status.eq(UserStatus::Active.to_string()))
            .filter(Column::DaysRemaining.gt(0))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("递减剩余天数失败: {e}")))?;

        // 天数耗尽的账号转为封禁
        Users::update_many()
            .col_expr(
                Column::Status,
                Expr::value(UserStatus::Blocked.to_string()),
            )
            .filter(Column::Role.eq(UserRole::Apprenant.to_string()))
            .filter(Column::Status.eq(UserStatus::Active.to_string()))
            .filter(Column::DaysRemaining.lte(0))
            .exec(&self.db)
            .await
            .map_err(|e| BootcampError::database_operation(format!("封禁到期账号失败: {e}")))?;

        Ok(decremented.rows_affected)
    }
}
