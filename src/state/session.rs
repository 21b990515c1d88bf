//! 会话状态
//!
//! 两个状态：匿名（无令牌）和已认证（持有令牌）。
//! 令牌对本层是不透明的，从不在本地解析或校验。

use crate::error::{AppError, AppResult};
use crate::infrastructure::KeyValueStore;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// 令牌在持久化存储中的固定键
pub const TOKEN_KEY: &str = "cv_token";

/// 会话状态容器
///
/// 创建时从存储读取令牌，每次变化立即写回。
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
}

impl SessionState {
    /// 从存储恢复会话
    pub fn load(store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let token = store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        Ok(Self {
            store,
            token: RwLock::new(token),
        })
    }

    /// 当前令牌
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// 受保护操作的入口检查，在发出任何请求之前调用
    pub fn require_token(&self) -> AppResult<String> {
        self.token().ok_or(AppError::Unauthorized)
    }

    /// 匿名 → 已认证
    pub fn login(&self, token: impl Into<String>) -> AppResult<()> {
        let token = token.into();
        self.store.set(TOKEN_KEY, &token)?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        info!("🔑 会话已建立");
        Ok(())
    }

    /// 已认证 → 匿名
    ///
    /// 内存中的令牌总是先被清除。存储删除失败时改为写入空令牌（`load` 会忽略它）；
    /// 两者都失败才返回错误，此时持久化的令牌仍然存在。
    pub fn clear(&self) -> AppResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;

        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!("⚠️ 删除持久化令牌失败，改为写入空令牌: {}", e);
            self.store.set(TOKEN_KEY, "")?;
        }

        info!("🔒 会话已清除");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    #[test]
    fn test_login_persists_and_reload_restores() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let session = SessionState::load(store.clone()).unwrap();
        assert!(!session.is_authenticated());
        session.login("opaque.token").unwrap();

        let reloaded = SessionState::load(store).unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("opaque.token"));
    }

    #[test]
    fn test_clear_removes_token_everywhere() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = SessionState::load(store.clone()).unwrap();
        session.login("t").unwrap();

        session.clear().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    /// `remove` 总是失败；`set` 可选地也失败
    struct StuckStore {
        inner: MemoryStore,
        set_fails: bool,
    }

    impl KeyValueStore for StuckStore {
        fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> AppResult<()> {
            // 登录写入总是成功，只拒绝清空
            if self.set_fails && value.is_empty() {
                return Err(AppError::Other("read-only store".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, _key: &str) -> AppResult<()> {
            Err(AppError::Other("remove not permitted".to_string()))
        }
    }

    #[test]
    fn test_clear_blanks_token_when_remove_fails() {
        let store: Arc<dyn KeyValueStore> = Arc::new(StuckStore {
            inner: MemoryStore::new(),
            set_fails: false,
        });
        let session = SessionState::load(store.clone()).unwrap();
        session.login("tok").unwrap();

        session.clear().unwrap();
        assert!(!session.is_authenticated());

        let reloaded = SessionState::load(store).unwrap();
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_clear_reports_failure_when_store_is_stuck() {
        let store: Arc<dyn KeyValueStore> = Arc::new(StuckStore {
            inner: MemoryStore::new(),
            set_fails: true,
        });
        let session = SessionState::load(store).unwrap();
        session.login("tok").unwrap();

        assert!(session.clear().is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_require_token_fails_when_anonymous() {
        let session = SessionState::load(Arc::new(MemoryStore::new())).unwrap();
        assert!(matches!(session.require_token(), Err(AppError::Unauthorized)));
    }
}
