//! 自动消失的错误提示
//!
//! 每次 `raise` 都会递增 generation，定时器回调携带自己的 generation 调用
//! `expire`，只有仍然匹配时才清除，旧定时器不会误清新的错误。

use std::time::Duration;

/// 错误提示的存活时间
pub const ERROR_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorNotice {
    message: Option<String>,
    generation: u64,
}

impl ErrorNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示新错误，返回本次的 generation
    pub fn raise(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// 用户手动关闭
    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// 定时器到期；返回是否真的清除了提示
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_error_expires_after_its_timer() {
        let mut notice = ErrorNotice::new();
        let generation = notice.raise("Network error");
        assert_eq!(notice.message(), Some("Network error"));

        assert!(notice.expire(generation));
        assert!(!notice.is_visible());
        assert_eq!(ERROR_NOTICE_TTL, Duration::from_secs(5));
    }

    #[test]
    fn stale_timer_does_not_clear_a_newer_error() {
        let mut notice = ErrorNotice::new();
        let first = notice.raise("Network error");
        let second = notice.raise("Group not found");

        assert!(!notice.expire(first));
        assert_eq!(notice.message(), Some("Group not found"));
        assert!(notice.expire(second));
    }

    #[test]
    fn dismiss_then_expire_is_a_no_op() {
        let mut notice = ErrorNotice::new();
        let generation = notice.raise("boom");
        notice.dismiss();
        assert!(!notice.is_visible());
        assert!(!notice.expire(generation));
    }
}
