//! Travella AI 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web`: 浏览器端口（fetch、localStorage、定时器）
//! - `auth`: 用户与管理员会话上下文
//! - `app`: 根组件与屏幕导航
//! - `components`: UI 组件层
//!
//! 会话、路由守卫和各屏幕的数据逻辑都在 `travella` 核心 crate 中。

mod app;
mod auth;
mod components {
    pub mod admin_dashboard;
    pub mod admin_login;
    pub mod booking;
    pub mod landing;
    pub mod navigation;
    pub mod planner;
    pub mod predict;
    pub mod profile;
    pub mod sign_in;
    pub mod toast;
    pub mod videos;
}
pub(crate) mod web;

pub use app::App;
