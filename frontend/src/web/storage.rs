//! LocalStorage 适配模块
//!
//! 将浏览器 localStorage 接入共享层的 [`KeyValueStore`]，
//! token 以原始字符串保存，user 以 JSON 保存。
//!
//! 直接使用 `web_sys::Storage`：localStorage 被禁用（隐私模式、受限 iframe）时
//! 读取返回 `None`，写入返回 [`StorageError`]，会话以未登录状态启动。

use classroom_shared::StorageError;
use classroom_shared::session::KeyValueStore;

/// 获取 localStorage 实例，不可用时返回 `None`
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn unavailable() -> StorageError {
    StorageError("localStorage 不可用".to_string())
}

/// 浏览器本地存储
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()
            .ok_or_else(unavailable)?
            .set_item(key, value)
            .map_err(|e| StorageError(format!("写入 {} 失败: {:?}", key, e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        local_storage()
            .ok_or_else(unavailable)?
            .remove_item(key)
            .map_err(|e| StorageError(format!("删除 {} 失败: {:?}", key, e)))
    }
}
