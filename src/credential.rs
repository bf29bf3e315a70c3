//! 凭据槽
//!
//! 用户和管理员两个域各持有一个槽：独立的存储键、独立的代际计数。
//! 每次登录、登出、恢复都会推进代际；网络响应只有在代际未变时才会被采纳。

use crate::storage::KeyValueStore;
use std::cell::Cell;

/// 会话代际标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

pub struct CredentialSlot<S> {
    storage: S,
    key: String,
    generation: Cell<u64>,
}

impl<S: KeyValueStore> CredentialSlot<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            generation: Cell::new(0),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 读取持久化的令牌；空字符串视为不存在
    pub fn load(&self) -> Option<String> {
        self.storage.get(&self.key).filter(|t| !t.is_empty())
    }

    pub fn persist(&self, token: &str) {
        if !self.storage.set(&self.key, token) {
            log::warn!("failed to persist credential under '{}'", self.key);
        }
    }

    pub fn clear(&self) {
        if !self.storage.remove(&self.key) {
            log::warn!("failed to remove credential under '{}'", self.key);
        }
    }

    /// 推进代际，使所有在途响应失效
    pub fn advance(&self) -> Generation {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        Generation(next)
    }

    pub fn current(&self) -> Generation {
        Generation(self.generation.get())
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.get() == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::rc::Rc;

    #[test]
    fn test_generation_invalidates_older_tags() {
        let slot = CredentialSlot::new(MemoryStorage::new(), "user_token");
        let first = slot.current();
        assert!(slot.is_current(first));

        let second = slot.advance();
        assert!(second > first);
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn test_slots_with_shared_storage_stay_independent() {
        let store = Rc::new(MemoryStorage::new());
        let user = CredentialSlot::new(Rc::clone(&store), "user_token");
        let admin = CredentialSlot::new(Rc::clone(&store), "admin_token");

        user.persist("u1");
        admin.persist("a1");
        user.clear();
        user.advance();

        assert_eq!(user.load(), None);
        assert_eq!(admin.load().as_deref(), Some("a1"));
        assert_eq!(admin.current().value(), 0);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let slot = CredentialSlot::new(MemoryStorage::new(), "user_token");
        slot.persist("");
        assert_eq!(slot.load(), None);
    }
}
