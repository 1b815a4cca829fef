use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Apprenant, // 学员
    Staff,     // 教务人员
    Admin,     // 管理员
}

impl UserRole {
    pub const APPRENANT: &'static str = "apprenant";
    pub const STAFF: &'static str = "staff";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Staff, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Apprenant, &Self::Staff, &Self::Admin]
    }

    /// 是否具有教务权限（staff 或 admin）
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Admin)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::APPRENANT => Ok(UserRole::Apprenant),
            UserRole::STAFF => Ok(UserRole::Staff),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: apprenant, staff, admin"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Apprenant => write!(f, "{}", UserRole::APPRENANT),
            UserRole::Staff => write!(f, "{}", UserRole::STAFF),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apprenant" => Ok(UserRole::Apprenant),
            "staff" => Ok(UserRole::Staff),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,  // 在读
    Blocked, // 已封禁（剩余天数耗尽或人工封禁）
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(UserStatus::Active),
            "blocked" => Ok(UserStatus::Blocked),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, blocked"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "blocked" => Ok(UserStatus::Blocked),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserProfile {
    pub profile_name: String,
    pub avatar_url: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile: UserProfile,
    // 培养进度字段
    pub days_remaining: i32,
    pub level: i32,
    pub total_projects_completed: i32,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌（使用真正的 JWT）
    pub async fn generate_access_token(&self) -> String {
        match crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string()) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("JWT token generation failed: {}", e);
                format!(
                    "fallback_token_{}_{}",
                    self.id,
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

// 徽章目录条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub description: String,
}
