//! 会话存储
//!
//! 持有 token 与用户记录，并镜像到持久化键值存储（浏览器中为 localStorage）。
//! 生命周期：启动时 [`SessionStore::hydrate`]，登录时写入，注销时清除。

use std::collections::HashMap;

use crate::{SessionError, StorageError, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

// =========================================================
// 持久化抽象 (Storage Abstraction)
// =========================================================

/// 字符串键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// 内存实现，用于测试和无存储环境
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =========================================================
// 会话存储 (Session Store)
// =========================================================

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    token: Option<String>,
    user: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 从持久化存储恢复会话
    ///
    /// token 与 user 同时存在且 user 可解析时恢复为已认证；
    /// user 记录损坏（例如角色未知）时清除两个键，以未认证状态启动。
    pub fn hydrate(storage: S) -> Self {
        let mut store = Self {
            storage,
            token: None,
            user: None,
        };

        let token = store.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let raw_user = store.storage.get(USER_KEY).filter(|u| !u.is_empty());

        if let (Some(token), Some(raw_user)) = (token, raw_user) {
            match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, "session restored from storage");
                    store.token = Some(token);
                    store.user = Some(user);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored user record is unreadable, clearing session");
                    if let Err(e) = store.clear_storage() {
                        tracing::warn!(error = %e, "failed to clear stale session");
                    }
                }
            }
        }

        store
    }

    /// token 与 user 同时存在且非空
    pub fn is_authenticated(&self) -> bool {
        let has_token = self.token.as_deref().is_some_and(|t| !t.is_empty());
        let has_user = self.user.as_ref().is_some_and(|u| !u.id.is_empty());
        has_token && has_user
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// 登录：内存状态总会更新，持久化失败时返回错误
    pub fn login(&mut self, token: impl Into<String>, user: User) -> Result<(), SessionError> {
        let token = token.into();
        let encoded = serde_json::to_string(&user).map_err(|e| SessionError::Encode(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "logged in");
        self.token = Some(token.clone());
        self.user = Some(user);

        self.storage.set(TOKEN_KEY, &token)?;
        self.storage.set(USER_KEY, &encoded)?;
        Ok(())
    }

    /// 注销：清空内存并删除两个键
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = &self.user {
            tracing::info!(user_id = %user.id, "logged out");
        }
        self.token = None;
        self.user = None;
        self.clear_storage()?;
        Ok(())
    }

    /// 替换缓存的用户资料，不影响 token
    pub fn update_user(&mut self, user: User) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(&user).map_err(|e| SessionError::Encode(e.to_string()))?;
        self.user = Some(user);
        self.storage.set(USER_KEY, &encoded)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn clear_storage(&mut self) -> Result<(), StorageError> {
        // 两个键都尝试删除，返回第一个错误
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }
}

#[cfg(test)]
mod tests;
