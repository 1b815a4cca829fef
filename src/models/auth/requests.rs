use serde::Deserialize;
use ts_rs::TS;

// 登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_name: Option<String>,
}

// 更新个人资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password: Option<String>,
}
