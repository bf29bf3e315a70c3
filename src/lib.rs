//! Travella AI 浏览器前端的核心逻辑
//!
//! 与渲染无关：HTTP 传输、存储和定时器都通过 trait 注入，
//! 浏览器实现位于 `frontend` crate。

use std::rc::Rc;

pub mod admin;
pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod request;
pub mod router;
pub mod session;
pub mod storage;
pub mod views;

pub use admin::{AdminSession, AdminState, PollExit, Sleeper, poll_dashboard};
pub use api::TravellaApi;
pub use client::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use request::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use router::{Navigation, Outlet, Screen, ScreenRouter};
pub use session::{SessionError, SessionPhase, SessionState, UserSession};
pub use storage::{KeyValueStore, MemoryStorage};

// =========================================================
// 应用装配 (Composition Root)
// =========================================================

/// 一个页面生命周期内共享的客户端对象
///
/// 用户和管理员两个会话共用同一个 API 网关和存储，
/// 但各自使用独立的令牌键。
pub struct Travella<C, S> {
    pub config: ClientConfig,
    pub api: Rc<TravellaApi<C>>,
    pub user: UserSession<C, Rc<S>>,
    pub admin: AdminSession<C, Rc<S>>,
}

impl<C: HttpClient, S: KeyValueStore> Travella<C, S> {
    pub fn new(config: ClientConfig, transport: C, storage: S) -> Self {
        let api = Rc::new(
            TravellaApi::new(ApiClient::new(config.api_base_url.clone(), transport))
                .with_language(config.language.clone()),
        );
        let storage = Rc::new(storage);
        let user = UserSession::new(api.clone(), storage.clone(), &config.user_token_key);
        let admin = AdminSession::new(api.clone(), storage, &config.admin_token_key);
        log::info!("travella client targeting {}", config.api_base_url);
        Self {
            config,
            api,
            user,
            admin,
        }
    }

    /// 启动时恢复两个会话，两次校验并发进行
    pub async fn restore(&self) -> (SessionPhase, SessionPhase) {
        futures::join!(self.user.restore(), self.admin.restore())
    }
}
