//! 各屏幕的视图模型
//!
//! 每个屏幕通过 API 取数，失败时退回本地示例数据并给出非阻塞提示。
//! 这里不涉及任何渲染。

pub mod booking;
pub mod landing;
pub mod planner;
pub mod predict;
pub mod profile;
pub mod videos;

pub const OFFLINE_NOTICE: &str = "Using offline mode. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 非阻塞提示（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn offline() -> Self {
        Self::error(OFFLINE_NOTICE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    /// 本地示例数据
    Fallback,
}

/// 一次加载的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
    pub notice: Notice,
}

impl<T> Loaded<T> {
    pub fn live(data: T, message: &str) -> Self {
        Self {
            data,
            source: DataSource::Live,
            notice: Notice::success(message),
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
            notice: Notice::offline(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::TravellaApi;
    use crate::client::ApiClient;
    use crate::request::MockHttpClient;

    pub const BASE: &str = "http://api.test";

    pub fn api() -> TravellaApi<MockHttpClient> {
        TravellaApi::new(ApiClient::new(BASE, MockHttpClient::new()))
    }

    pub fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }
}
