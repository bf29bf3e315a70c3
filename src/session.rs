//! 用户会话
//!
//! 状态机：LoggedOut -> Verifying -> LoggedIn / LoggedOut，
//! 以及 LoggedOut <-> LoggedIn（登录、注册、登出）。
//! 所有响应在应用前都会比对代际，登出之后到达的响应一律丢弃。

use crate::api::TravellaApi;
use crate::client::ApiError;
use crate::credential::{CredentialSlot, Generation};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use travella_shared::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, UserProfile, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    LoggedOut,
    /// 正在校验持久化的令牌，界面应显示加载状态
    Verifying,
    LoggedIn,
}

/// 会话错误
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// 当前没有令牌
    Unauthenticated,
    /// 服务端拒绝（凭据错误、用户名已存在等）
    Rejected { status: u16 },
    /// 响应到达前会话已被登出或替换
    Superseded,
    /// 网络或解析失败
    Api(ApiError),
}

impl SessionError {
    /// 预期内的失败：只需提示用户，不代表系统故障
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            SessionError::Unauthenticated | SessionError::Rejected { .. } | SessionError::Superseded
        )
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Unauthenticated => write!(f, "not signed in"),
            SessionError::Rejected { status } => write!(f, "request rejected (HTTP {})", status),
            SessionError::Superseded => write!(f, "session changed before the response arrived"),
            SessionError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Status { status } => SessionError::Rejected { status },
            other => SessionError::Api(other),
        }
    }
}

/// 会话快照
///
/// `user` 和 `token` 只在 `LoggedIn` 时存在，且总是同时存在。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<UserRecord>,
    token: Option<String>,
}

impl SessionState {
    fn logged_in(token: String, user: UserRecord) -> Self {
        Self {
            phase: SessionPhase::LoggedIn,
            user: Some(user),
            token: Some(token),
        }
    }

    fn verifying() -> Self {
        Self {
            phase: SessionPhase::Verifying,
            ..Default::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::LoggedIn
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

// =========================================================
// 会话存储: UserSession
// =========================================================

pub struct UserSession<C, S> {
    api: Rc<TravellaApi<C>>,
    slot: CredentialSlot<S>,
    state: RefCell<SessionState>,
}

impl<C: HttpClient, S: KeyValueStore> UserSession<C, S> {
    pub fn new(api: Rc<TravellaApi<C>>, storage: S, key: &str) -> Self {
        Self {
            api,
            slot: CredentialSlot::new(storage, key),
            state: RefCell::new(SessionState::default()),
        }
    }

    pub fn api(&self) -> &Rc<TravellaApi<C>> {
        &self.api
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// 持久化存储中的令牌（可能尚未校验）
    pub fn stored_token(&self) -> Option<String> {
        self.slot.load()
    }

    /// 启动时恢复会话
    ///
    /// 有持久化令牌时进入 `Verifying` 并校验：成功则登录且不改写存储，
    /// 任何失败都会删除持久化令牌并回到 `LoggedOut`。
    pub async fn restore(&self) -> SessionPhase {
        let Some(token) = self.slot.load() else {
            *self.state.borrow_mut() = SessionState::default();
            return SessionPhase::LoggedOut;
        };

        let generation = self.slot.advance();
        *self.state.borrow_mut() = SessionState::verifying();
        log::debug!("verifying stored user token");

        let result = self.api.verify_user(&token).await;

        if !self.slot.is_current(generation) {
            log::debug!("discarding stale token verification");
            return self.phase();
        }

        match result {
            Ok(resp) => {
                log::info!("restored session for {}", resp.user.username);
                *self.state.borrow_mut() = SessionState::logged_in(token, resp.user);
            }
            Err(e) => {
                log::warn!("token verification failed: {}", e);
                self.slot.clear();
                *self.state.borrow_mut() = SessionState::default();
            }
        }
        self.phase()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserRecord, SessionError> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let generation = self.slot.advance();
        let result = self.api.login(&req).await;
        self.accept(generation, result, "login")
    }

    /// 注册成功即登录
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, SessionError> {
        let req = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let generation = self.slot.advance();
        let result = self.api.register(&req).await;
        self.accept(generation, result, "registration")
    }

    fn accept(
        &self,
        generation: Generation,
        result: Result<AuthResponse, ApiError>,
        action: &str,
    ) -> Result<UserRecord, SessionError> {
        if !self.slot.is_current(generation) {
            log::debug!("discarding stale {} response", action);
            return Err(SessionError::Superseded);
        }

        let resp = result.map_err(|e| {
            log::warn!("{} failed: {}", action, e);
            SessionError::from(e)
        })?;

        self.slot.persist(&resp.access_token);
        *self.state.borrow_mut() = SessionState::logged_in(resp.access_token, resp.user.clone());
        log::info!("{} succeeded for {}", action, resp.user.username);
        Ok(resp.user)
    }

    /// 本地登出：立即清空内存和持久化状态，返回被丢弃的令牌
    pub fn sign_out(&self) -> Option<String> {
        self.slot.advance();
        self.slot.clear();
        let previous = std::mem::take(&mut *self.state.borrow_mut());
        if previous.is_authenticated() {
            log::info!("signed out");
        }
        previous.token
    }

    /// 通知服务端登出，失败只记录日志
    pub async fn notify_logout(&self, token: &str) {
        if let Err(e) = self.api.logout_user(token).await {
            log::warn!("logout notification failed: {}", e);
        }
    }

    /// 登出总是成功；服务端通知在本地状态清空之后发送
    pub async fn logout(&self) {
        if let Some(token) = self.sign_out() {
            self.notify_logout(&token).await;
        }
    }

    /// 更新资料，成功时只替换 `user.profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, SessionError> {
        let (token, generation) = self.authorized()?;
        let result = self.api.update_profile(&token, update).await;
        let profile = self.checked(generation, result, "profile update")?.profile;
        self.replace_profile(profile.clone());
        Ok(profile)
    }

    /// 从服务端重新拉取资料
    pub async fn refresh_profile(&self) -> Result<UserProfile, SessionError> {
        let (token, generation) = self.authorized()?;
        let result = self.api.profile(&token).await;
        let profile = self.checked(generation, result, "profile fetch")?.profile;
        self.replace_profile(profile.clone());
        Ok(profile)
    }

    /// 当前令牌与代际；未登录时不发请求
    pub fn authorized(&self) -> Result<(String, Generation), SessionError> {
        let token = self.token().ok_or(SessionError::Unauthenticated)?;
        Ok((token, self.slot.current()))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.slot.is_current(generation)
    }

    fn checked<T>(
        &self,
        generation: Generation,
        result: Result<T, ApiError>,
        action: &str,
    ) -> Result<T, SessionError> {
        if !self.slot.is_current(generation) {
            log::debug!("discarding stale {} response", action);
            return Err(SessionError::Superseded);
        }
        result.map_err(|e| {
            log::warn!("{} failed: {}", action, e);
            SessionError::from(e)
        })
    }

    fn replace_profile(&self, profile: UserProfile) {
        if let Some(user) = self.state.borrow_mut().user.as_mut() {
            user.profile = profile;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::request::{GatedHttpClient, HttpMethod, MockHttpClient};
    use crate::storage::MemoryStorage;
    use serde_json::{Value, json};

    const BASE: &str = "http://api.test";

    fn alice() -> Value {
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "role": "user",
            "profile": {
                "first_name": "Alice",
                "last_name": "Smith",
                "phone": "555-0100",
                "preferences": { "travel_style": "balanced", "budget_range": "medium", "interests": ["hiking", "food"] }
            }
        })
    }

    fn session() -> (UserSession<MockHttpClient, Rc<MemoryStorage>>, Rc<MemoryStorage>) {
        let store = Rc::new(MemoryStorage::new());
        let api = Rc::new(TravellaApi::new(ApiClient::new(BASE, MockHttpClient::new())));
        (UserSession::new(api, Rc::clone(&store), "user_token"), store)
    }

    fn transport(s: &UserSession<MockHttpClient, Rc<MemoryStorage>>) -> &MockHttpClient {
        s.api().client().transport()
    }

    fn mock_login_ok(s: &UserSession<MockHttpClient, Rc<MemoryStorage>>) {
        transport(s).mock_response(
            HttpMethod::Post,
            "http://api.test/auth/login",
            200,
            json!({ "access_token": "t1", "token_type": "bearer", "user": alice() }),
        );
    }

    #[tokio::test]
    async fn test_login_success_stores_token() {
        let (session, store) = session();
        mock_login_ok(&session);

        let user = session.login("alice", "correct").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(session.phase(), SessionPhase::LoggedIn);
        assert_eq!(session.token().as_deref(), Some("t1"));
        assert_eq!(store.get("user_token").as_deref(), Some("t1"));

        let sent = &transport(&session).requests.borrow()[0];
        assert_eq!(sent.json_body(), json!({ "username": "alice", "password": "correct" }));
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_state_untouched() {
        let (session, store) = session();
        transport(&session).mock_response(
            HttpMethod::Post,
            "http://api.test/auth/login",
            401,
            json!({ "detail": "Invalid credentials" }),
        );

        let err = session.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err, SessionError::Rejected { status: 401 });
        assert!(err.is_expected());
        assert_eq!(session.snapshot(), SessionState::default());
        assert_eq!(store.get("user_token"), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let (session, store) = session();
        mock_login_ok(&session);
        session.login("alice", "correct").await.unwrap();

        transport(&session).mock_response(HttpMethod::Post, "http://api.test/auth/login", 401, json!({}));
        assert!(session.login("alice", "wrong").await.is_err());
        assert_eq!(session.token().as_deref(), Some("t1"));
        assert_eq!(store.get("user_token").as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_login_network_error_propagates() {
        let (session, _) = session();
        transport(&session).mock_failure(HttpMethod::Post, "http://api.test/auth/login", "offline");

        let err = session.login("alice", "pw").await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Network(_))));
        assert!(!err.is_expected());
        assert_eq!(session.phase(), SessionPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_register_logs_in() {
        let (session, store) = session();
        transport(&session).mock_response(
            HttpMethod::Post,
            "http://api.test/auth/register",
            200,
            json!({ "access_token": "t9", "user": alice() }),
        );

        session.register("alice", "alice@example.com", "pw").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(store.get("user_token").as_deref(), Some("t9"));
    }

    #[tokio::test]
    async fn test_login_then_logout_clears_everything() {
        let (session, store) = session();
        mock_login_ok(&session);
        session.login("alice", "correct").await.unwrap();

        // 服务端登出接口失败也不影响本地登出
        transport(&session).mock_failure(HttpMethod::Post, "http://api.test/auth/logout", "offline");
        session.logout().await;

        assert_eq!(session.phase(), SessionPhase::LoggedOut);
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
        assert_eq!(store.get("user_token"), None);

        let logout = transport(&session).requests_to("http://api.test/auth/logout");
        assert_eq!(logout[0].header("Authorization"), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn test_logout_when_signed_out_sends_nothing() {
        let (session, _) = session();
        session.logout().await;
        assert_eq!(transport(&session).request_count(), 0);
        assert_eq!(session.phase(), SessionPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_restore_success_keeps_token() {
        let (session, store) = session();
        store.set("user_token", "stored");
        transport(&session).mock_response(
            HttpMethod::Get,
            "http://api.test/auth/verify",
            200,
            json!({ "user": alice() }),
        );

        assert_eq!(session.restore().await, SessionPhase::LoggedIn);
        assert_eq!(session.token().as_deref(), Some("stored"));
        assert_eq!(session.user().unwrap().email, "alice@example.com");
        assert_eq!(store.get("user_token").as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_restore_failure_removes_token() {
        let (session, store) = session();
        store.set("user_token", "expired");
        transport(&session).mock_response(HttpMethod::Get, "http://api.test/auth/verify", 401, json!({}));

        assert_eq!(session.restore().await, SessionPhase::LoggedOut);
        assert_eq!(session.snapshot(), SessionState::default());
        assert_eq!(store.get("user_token"), None);
    }

    #[tokio::test]
    async fn test_restore_network_failure_also_removes_token() {
        let (session, store) = session();
        store.set("user_token", "stored");
        transport(&session).mock_failure(HttpMethod::Get, "http://api.test/auth/verify", "offline");

        assert_eq!(session.restore().await, SessionPhase::LoggedOut);
        assert_eq!(store.get("user_token"), None);
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_network() {
        let (session, _) = session();
        assert_eq!(session.restore().await, SessionPhase::LoggedOut);
        assert_eq!(transport(&session).request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_replaces_only_profile() {
        let (session, _) = session();
        mock_login_ok(&session);
        session.login("alice", "correct").await.unwrap();

        transport(&session).mock_response(
            HttpMethod::Put,
            "http://api.test/user/profile",
            200,
            json!({
                "message": "Profile updated",
                "profile": { "first_name": "Al", "preferences": { "interests": ["beaches"] } }
            }),
        );

        let update = ProfileUpdate {
            first_name: Some("Al".into()),
            ..Default::default()
        };
        let profile = session.update_profile(&update).await.unwrap();
        assert_eq!(profile.first_name, "Al");

        let user = session.user().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        // 服务端返回的资料整体替换，不与旧值合并
        assert_eq!(user.profile.last_name, "");
        assert_eq!(user.profile.preferences.interests, vec!["beaches"]);
    }

    #[tokio::test]
    async fn test_update_profile_without_token_sends_nothing() {
        let (session, _) = session();
        let err = session
            .update_profile(&ProfileUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Unauthenticated);
        assert_eq!(transport(&session).request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_failure_leaves_state() {
        let (session, _) = session();
        mock_login_ok(&session);
        session.login("alice", "correct").await.unwrap();
        let before = session.snapshot();

        transport(&session).mock_response(HttpMethod::Put, "http://api.test/user/profile", 500, json!({}));
        let err = session
            .update_profile(&ProfileUpdate {
                phone: Some("1".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Rejected { status: 500 });
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn test_refresh_profile() {
        let (session, _) = session();
        mock_login_ok(&session);
        session.login("alice", "correct").await.unwrap();
        transport(&session).mock_response(
            HttpMethod::Get,
            "http://api.test/user/profile",
            200,
            json!({ "profile": { "first_name": "Alicia", "phone": "555-0199" } }),
        );

        session.refresh_profile().await.unwrap();
        assert_eq!(session.user().unwrap().profile.first_name, "Alicia");
    }

    // ---------------------------------------------------------
    // 在途响应与登出的交错
    // ---------------------------------------------------------

    fn gated() -> (UserSession<GatedHttpClient, Rc<MemoryStorage>>, Rc<MemoryStorage>) {
        let store = Rc::new(MemoryStorage::new());
        let api = Rc::new(TravellaApi::new(ApiClient::new(BASE, GatedHttpClient::new())));
        (UserSession::new(api, Rc::clone(&store), "user_token"), store)
    }

    #[tokio::test]
    async fn test_logout_discards_in_flight_login() {
        let (session, store) = gated();
        let transport = session.api().client().transport();
        transport.inner.mock_response(
            HttpMethod::Post,
            "http://api.test/auth/login",
            200,
            json!({ "access_token": "late", "user": alice() }),
        );

        let interrupt = async {
            tokio::task::yield_now().await;
            session.sign_out();
            transport.gate.notify_one();
        };
        let (result, _) = futures::join!(session.login("alice", "pw"), interrupt);

        assert_eq!(result.unwrap_err(), SessionError::Superseded);
        assert_eq!(session.phase(), SessionPhase::LoggedOut);
        assert_eq!(store.get("user_token"), None);
    }

    #[tokio::test]
    async fn test_logout_during_restore_wins() {
        let (session, store) = gated();
        store.set("user_token", "stored");
        let transport = session.api().client().transport();
        transport.inner.mock_response(
            HttpMethod::Get,
            "http://api.test/auth/verify",
            200,
            json!({ "user": alice() }),
        );

        let interrupt = async {
            tokio::task::yield_now().await;
            assert_eq!(session.phase(), SessionPhase::Verifying);
            assert_eq!(session.token(), None);
            session.sign_out();
            transport.gate.notify_one();
        };
        let (phase, _) = futures::join!(session.restore(), interrupt);

        assert_eq!(phase, SessionPhase::LoggedOut);
        assert_eq!(session.user(), None);
        assert_eq!(store.get("user_token"), None);
    }
}
