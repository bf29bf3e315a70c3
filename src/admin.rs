//! 管理员域
//!
//! 与用户会话完全独立：独立的令牌、独立的存储键、独立的代际。
//! 任何管理请求返回 401/403 都会结束管理员会话。

use crate::api::TravellaApi;
use crate::client::ApiError;
use crate::credential::{CredentialSlot, Generation};
use crate::request::HttpClient;
use crate::session::{SessionError, SessionPhase};
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;
use travella_shared::{AdminLoginRequest, DashboardStats};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminState {
    pub phase: SessionPhase,
    /// 校验或登录后得知的管理员用户名
    pub username: Option<String>,
    token: Option<String>,
}

impl AdminState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::LoggedIn
    }
}

/// 打开仪表盘时并发获取的结果
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOpen {
    pub username: String,
    pub stats: Result<DashboardStats, SessionError>,
}

pub struct AdminSession<C, S> {
    api: Rc<TravellaApi<C>>,
    slot: CredentialSlot<S>,
    state: RefCell<AdminState>,
}

impl<C: HttpClient, S: KeyValueStore> AdminSession<C, S> {
    pub fn new(api: Rc<TravellaApi<C>>, storage: S, key: &str) -> Self {
        Self {
            api,
            slot: CredentialSlot::new(storage, key),
            state: RefCell::new(AdminState::default()),
        }
    }

    pub fn api(&self) -> &Rc<TravellaApi<C>> {
        &self.api
    }

    pub fn snapshot(&self) -> AdminState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn username(&self) -> Option<String> {
        self.state.borrow().username.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    /// 持久化存储中的令牌（可能尚未校验）
    pub fn stored_token(&self) -> Option<String> {
        self.slot.load()
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.slot.is_current(generation)
    }

    pub fn authorized(&self) -> Result<(String, Generation), SessionError> {
        let token = self.token().ok_or(SessionError::Unauthenticated)?;
        Ok((token, self.slot.current()))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let req = AdminLoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let generation = self.slot.advance();
        let result = self.api.admin_login(&req).await;

        if !self.slot.is_current(generation) {
            return Err(SessionError::Superseded);
        }
        let resp = result.map_err(|e| {
            log::warn!("admin login failed: {}", e);
            SessionError::from(e)
        })?;

        self.slot.persist(&resp.access_token);
        *self.state.borrow_mut() = AdminState {
            phase: SessionPhase::LoggedIn,
            username: Some(username.to_string()),
            token: Some(resp.access_token),
        };
        log::info!("admin {} signed in", username);
        Ok(())
    }

    /// 启动时恢复管理员会话，校验失败会删除持久化令牌
    pub async fn restore(&self) -> SessionPhase {
        let Some(token) = self.slot.load() else {
            return SessionPhase::LoggedOut;
        };

        let generation = self.slot.advance();
        *self.state.borrow_mut() = AdminState {
            phase: SessionPhase::Verifying,
            ..Default::default()
        };

        let result = self.api.verify_admin(&token).await;
        if !self.slot.is_current(generation) {
            return self.state.borrow().phase;
        }

        match result {
            Ok(resp) => {
                *self.state.borrow_mut() = AdminState {
                    phase: SessionPhase::LoggedIn,
                    username: Some(resp.username),
                    token: Some(token),
                };
            }
            Err(e) => {
                log::warn!("admin token verification failed: {}", e);
                self.expire();
            }
        }
        self.state.borrow().phase
    }

    /// 校验当前令牌；任何失败都结束会话
    pub async fn verify(&self) -> Result<String, SessionError> {
        let (token, generation) = self.authorized()?;
        let result = self.api.verify_admin(&token).await;

        if !self.slot.is_current(generation) {
            return Err(SessionError::Superseded);
        }
        match result {
            Ok(resp) => {
                self.state.borrow_mut().username = Some(resp.username.clone());
                Ok(resp.username)
            }
            Err(e) => {
                log::warn!("admin session expired: {}", e);
                self.expire();
                Err(SessionError::Unauthenticated)
            }
        }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, SessionError> {
        let (token, generation) = self.authorized()?;
        let result = self.api.dashboard_stats(&token).await;

        if !self.slot.is_current(generation) {
            return Err(SessionError::Superseded);
        }
        result.map_err(|e| self.on_request_error(e, "dashboard"))
    }

    /// 并发校验身份并拉取统计
    pub async fn open_dashboard(&self) -> Result<DashboardOpen, SessionError> {
        let (verified, stats) = futures::join!(self.verify(), self.dashboard_stats());
        let username = verified?;
        Ok(DashboardOpen { username, stats })
    }

    fn on_request_error(&self, e: ApiError, action: &str) -> SessionError {
        if e.is_unauthorized() {
            log::warn!("admin {} request unauthorized, ending session", action);
            self.expire();
            SessionError::Unauthenticated
        } else {
            log::warn!("admin {} request failed: {}", action, e);
            SessionError::from(e)
        }
    }

    fn expire(&self) {
        self.slot.advance();
        self.slot.clear();
        *self.state.borrow_mut() = AdminState::default();
    }

    /// 本地登出，返回被丢弃的令牌
    pub fn sign_out(&self) -> Option<String> {
        let token = self.token();
        self.expire();
        token
    }

    /// 通知服务端登出，失败只记录日志
    pub async fn notify_logout(&self, token: &str) {
        if let Err(e) = self.api.admin_logout(token).await {
            log::warn!("admin logout notification failed: {}", e);
        }
    }

    /// 登出总是成功，服务端通知在本地状态清空之后发送
    pub async fn logout(&self) {
        let Some(token) = self.sign_out() else {
            return;
        };
        log::info!("admin signed out");
        self.notify_logout(&token).await;
    }
}

// =========================================================
// 仪表盘轮询
// =========================================================

/// 异步休眠端口；浏览器用定时器实现
#[async_trait::async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

#[async_trait::async_trait(?Send)]
impl<T: Sleeper + ?Sized> Sleeper for Rc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

/// 轮询结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    /// 管理员已登出或会话被替换
    SignedOut,
    /// 服务端拒绝了令牌
    Expired,
    /// 调用方要求停止（如组件卸载）
    Stopped,
}

/// 立即拉取一次统计，此后每隔 `interval` 拉取一次
///
/// 每次拉取前检查代际和 `keep_polling`，会话结束或调用方撤销后不会再发出任何请求。
pub async fn poll_dashboard<C, S, Z, K, F>(
    session: &AdminSession<C, S>,
    sleeper: &Z,
    interval: Duration,
    keep_polling: K,
    mut on_update: F,
) -> PollExit
where
    C: HttpClient,
    S: KeyValueStore,
    Z: Sleeper + ?Sized,
    K: Fn() -> bool,
    F: FnMut(Result<DashboardStats, SessionError>) -> ControlFlow<()>,
{
    let generation = match session.authorized() {
        Ok((_, generation)) => generation,
        Err(_) => return PollExit::SignedOut,
    };

    loop {
        if !session.is_current(generation) {
            return PollExit::SignedOut;
        }
        if !keep_polling() {
            return PollExit::Stopped;
        }

        let result = session.dashboard_stats().await;
        match result {
            Err(SessionError::Superseded) => return PollExit::SignedOut,
            Err(SessionError::Unauthenticated) => {
                let _ = on_update(Err(SessionError::Unauthenticated));
                return PollExit::Expired;
            }
            other => {
                if on_update(other).is_break() {
                    return PollExit::Stopped;
                }
            }
        }

        sleeper.sleep(interval).await;
    }
}
