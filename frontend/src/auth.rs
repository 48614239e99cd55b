//! 认证模块
//!
//! 管理用户会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use classroom_shared::client::TokenSource;
use classroom_shared::session::SessionStore;
use classroom_shared::{AuthPayload, User};
use leptos::prelude::*;

use crate::web::BrowserStorage;

/// 认证上下文
///
/// 包装会话存储的响应式信号，显式传递给需要它的组件。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<SessionStore<BrowserStorage>>,
}

impl AuthContext {
    /// 从 localStorage 恢复会话
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(SessionStore::hydrate(BrowserStorage)),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 当前用户（追踪）
    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user().cloned())
    }

    /// 当前用户（不追踪）
    pub fn user_untracked(&self) -> Option<User> {
        self.session.with_untracked(|s| s.user().cloned())
    }

    /// 当前用户 id，未登录时为空串
    pub fn user_id_untracked(&self) -> String {
        self.session
            .with_untracked(|s| s.user().map(|u| u.id.clone()))
            .unwrap_or_default()
    }

    /// 保存登录 / 注册结果
    ///
    /// 写入 localStorage 失败时仅记录日志，内存中的会话照常生效。
    pub fn login(&self, payload: AuthPayload) {
        self.session.update(|s| {
            if let Err(e) = s.login(payload.access_token, payload.user) {
                tracing::warn!(error = %e, "failed to persist session");
            }
        });
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        self.session.update(|s| {
            if let Err(e) = s.logout() {
                tracing::warn!(error = %e, "failed to clear stored session");
            }
        });
    }

    /// 用服务端返回的资料替换缓存用户
    pub fn update_user(&self, user: User) {
        self.session.update(|s| {
            if let Err(e) = s.update_user(user) {
                tracing::warn!(error = %e, "failed to persist profile");
            }
        });
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for AuthContext {
    fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.token().map(str::to_string))
    }
}
