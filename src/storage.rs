//! 键值存储抽象
//!
//! 浏览器里由 localStorage 实现，测试和原生环境用 [`MemoryStorage`]。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 持久化的字符串键值存储
///
/// 写操作返回是否成功；存储不可用时不报错，调用方自行决定是否记录日志。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let store = MemoryStorage::new();
        assert!(store.is_empty());
        assert!(store.set("user_token", "t1"));
        assert_eq!(store.get("user_token").as_deref(), Some("t1"));

        store.set("user_token", "t2");
        assert_eq!(store.get("user_token").as_deref(), Some("t2"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("user_token"));
        assert!(store.remove("missing"));
        assert_eq!(store.get("user_token"), None);
    }

    #[test]
    fn test_rc_shares_items() {
        let store = Rc::new(MemoryStorage::new());
        let other = Rc::clone(&store);
        other.set("admin_token", "a1");
        assert_eq!(store.get("admin_token").as_deref(), Some("a1"));
    }
}
