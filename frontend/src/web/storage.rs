//! LocalStorage 封装模块
//!
//! 令牌以原始字符串写入 `window.localStorage`，不经过 JSON 编码，
//! 与其他脚本读取同一个键时保持一致。

use gloo_storage::{LocalStorage, Storage};
use travella::KeyValueStore;

/// 浏览器本地存储
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn remove(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
