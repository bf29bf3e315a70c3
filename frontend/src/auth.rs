//! 认证模块
//!
//! 核心会话对象保存在本地 `StoredValue` 中（`Rc`，非 `Send`），
//! 组件只读取响应式快照。每次会话操作结束后调用 `sync` 刷新快照。

use crate::web::{BrowserHttpClient, BrowserStorage};
use leptos::prelude::*;
use std::rc::Rc;
use travella::{AdminState, SessionError, SessionPhase, SessionState, Travella};

pub type Client = Travella<BrowserHttpClient, BrowserStorage>;

/// 页面级共享的客户端句柄
pub type ClientHandle = StoredValue<Rc<Client>, LocalStorage>;

// =========================================================
// 用户会话
// =========================================================

#[derive(Clone, Copy)]
pub struct AuthContext {
    client: ClientHandle,
    /// 会话快照（只读使用）
    pub state: RwSignal<SessionState>,
}

impl AuthContext {
    /// 存在持久化令牌时快照从 Verifying 开始，恢复完成前只显示加载界面
    pub fn new(client: ClientHandle) -> Self {
        let snapshot = client.with_value(|c| {
            let mut snapshot = c.user.snapshot();
            if c.user.stored_token().is_some() {
                snapshot.phase = SessionPhase::Verifying;
            }
            snapshot
        });
        Self {
            client,
            state: RwSignal::new(snapshot),
        }
    }

    pub fn client(&self) -> Rc<Client> {
        self.client.get_value()
    }

    pub fn sync(&self) {
        self.state.set(self.client().user.snapshot());
    }

    /// 当前阶段信号（用于路由守卫注入）
    pub fn phase_signal(&self) -> Signal<SessionPhase> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.phase))
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    /// 启动时恢复；存在令牌时先进入 Verifying 以显示加载界面
    pub async fn restore(&self) -> SessionPhase {
        let client = self.client();
        if client.user.stored_token().is_some() {
            self.state.update(|s| s.phase = SessionPhase::Verifying);
        }
        let phase = client.user.restore().await;
        self.sync();
        phase
    }

    pub async fn login(&self, username: String, password: String) -> Result<(), SessionError> {
        let client = self.client();
        let result = client.user.login(&username, &password).await.map(|_| ());
        self.sync();
        result
    }

    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<(), SessionError> {
        let client = self.client();
        let result = client
            .user
            .register(&username, &email, &password)
            .await
            .map(|_| ());
        self.sync();
        result
    }

    /// 立即清空本地状态，再在后台通知服务端
    pub async fn logout(&self) {
        let client = self.client();
        let token = client.user.sign_out();
        self.sync();
        if let Some(token) = token {
            client.user.notify_logout(&token).await;
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// 管理员会话
// =========================================================

#[derive(Clone, Copy)]
pub struct AdminContext {
    client: ClientHandle,
    pub state: RwSignal<AdminState>,
}

impl AdminContext {
    pub fn new(client: ClientHandle) -> Self {
        let snapshot = client.with_value(|c| {
            let mut snapshot = c.admin.snapshot();
            if c.admin.stored_token().is_some() {
                snapshot.phase = SessionPhase::Verifying;
            }
            snapshot
        });
        Self {
            client,
            state: RwSignal::new(snapshot),
        }
    }

    pub fn client(&self) -> Rc<Client> {
        self.client.get_value()
    }

    pub fn sync(&self) {
        self.state.set(self.client().admin.snapshot());
    }

    pub fn has_stored_token(&self) -> bool {
        self.client.with_value(|c| c.admin.stored_token().is_some())
    }

    pub async fn restore(&self) -> SessionPhase {
        let client = self.client();
        let phase = client.admin.restore().await;
        self.sync();
        phase
    }

    pub async fn login(&self, username: String, password: String) -> Result<(), SessionError> {
        let client = self.client();
        let result = client.admin.login(&username, &password).await;
        self.sync();
        result
    }

    pub async fn logout(&self) {
        let client = self.client();
        let token = client.admin.sign_out();
        self.sync();
        if let Some(token) = token {
            client.admin.notify_logout(&token).await;
        }
    }
}

pub fn use_admin() -> AdminContext {
    use_context::<AdminContext>().expect("AdminContext should be provided")
}
