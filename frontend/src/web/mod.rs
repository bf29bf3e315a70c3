//! 浏览器端口实现
//!
//! 核心 crate 只依赖 trait，这里提供 fetch、localStorage 和定时器的具体实现。

mod http;
mod storage;
mod timer;

pub use http::BrowserHttpClient;
pub use storage::BrowserStorage;
pub use timer::BrowserSleeper;
