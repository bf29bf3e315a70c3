use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod admin;
pub mod protocol;
pub mod travel;

pub use admin::*;
pub use protocol::{ApiRequest, HttpMethod};
pub use travel::*;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_LANG: &str = "X-Lang";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 用户令牌在浏览器存储中的键
pub const STORAGE_USER_TOKEN: &str = "user_token";
/// 管理员令牌的键，与用户令牌完全独立
pub const STORAGE_ADMIN_TOKEN: &str = "admin_token";

pub const DEFAULT_ROLE: &str = "user";

// =========================================================
// 通用标识 (Identifiers)
// =========================================================

/// 服务端返回的记录 ID，可能是数字也可能是字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Number(0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// 显式的 `null` 按缺省值处理，与缺失字段一致
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =========================================================
// 用户领域模型 (User Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub travel_style: String,
    #[serde(default)]
    pub budget_range: String,
    /// 有序列表，顺序由用户决定
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferences: TravelPreferences,
}

impl UserProfile {
    pub fn display_name(&self) -> Option<String> {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            None
        } else {
            Some(full.to_string())
        }
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// 当前登录用户
///
/// 必需字段: `username`, `email`。`role` 与 `profile` 缺省时取默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub profile: UserProfile,
}

/// 资料更新载荷
///
/// 只序列化已设置的字段；服务端负责合并并返回完整资料。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<TravelPreferences>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.preferences.is_none()
    }
}

impl From<UserProfile> for ProfileUpdate {
    fn from(profile: UserProfile) -> Self {
        Self {
            first_name: Some(profile.first_name),
            last_name: Some(profile.last_name),
            phone: Some(profile.phone),
            preferences: Some(profile.preferences),
        }
    }
}

// =========================================================
// 认证载荷 (Auth Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 登录/注册成功响应
///
/// 必需字段: `access_token`, `user`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyUserRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyUserResponse {
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogoutRequest;

/// 只带提示信息的通用响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_record_defaults() {
        let user: UserRecord =
            serde_json::from_value(json!({ "username": "alice", "email": "a@x.com" })).unwrap();
        assert_eq!(user.role, "user");
        assert_eq!(user.profile, UserProfile::default());
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            phone: Some("123".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "phone": "123" }));
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_record_id_accepts_number_or_text() {
        let ids: Vec<RecordId> = serde_json::from_value(json!([7, "bk-1"])).unwrap();
        assert_eq!(ids, vec![RecordId::Number(7), RecordId::Text("bk-1".into())]);
        assert_eq!(ids[1].to_string(), "bk-1");
    }

    #[test]
    fn test_display_name() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display_name(), None);
        profile.first_name = "Alice".into();
        assert_eq!(profile.display_name().as_deref(), Some("Alice"));
    }
}
