//! 定时器封装模块

use gloo_timers::future::sleep;
use std::time::Duration;
use travella::Sleeper;

/// 基于 `setTimeout` 的异步休眠
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, duration: Duration) {
        sleep(duration).await;
    }
}
