//! 管理端模型
//!
//! 管理员是独立的凭据域，这里的类型不与用户会话共享。

use crate::ActivityEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// 必需字段: `access_token`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLogoutRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminVerifyRequest;

/// 必需字段: `username`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminVerifyResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopularDestination {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub searches: u64,
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub llm_service: String,
    #[serde(default)]
    pub video_service: String,
    #[serde(default)]
    pub prediction_model: String,
}

impl SystemHealth {
    /// (组件名, 状态) 列表，便于逐行渲染
    pub fn components(&self) -> [(&'static str, &str); 4] {
        [
            ("Database", &self.database),
            ("LLM Service", &self.llm_service),
            ("Video Service", &self.video_service),
            ("Prediction Model", &self.prediction_model),
        ]
    }
}

/// 仪表盘聚合统计
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_searches: u64,
    #[serde(default)]
    pub total_plans: u64,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub popular_destinations: Vec<PopularDestination>,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub system_health: SystemHealth,
}
