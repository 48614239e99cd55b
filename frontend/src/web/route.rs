//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫规则。

use std::fmt::Display;

use classroom_shared::access::DashboardPage;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 注册页面
    Register,
    /// 控制面板首页，按角色分派 (需要认证)
    Dashboard,
    /// 个人资料 (需要认证)
    Profile,
    /// 活动页，按角色分派 (需要认证)
    Activities,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match trimmed {
            "" | "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/dashboard/profile" => Self::Profile,
            "/dashboard/activities" => Self::Activities,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/dashboard/profile",
            Self::Activities => "/dashboard/activities",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile | Self::Activities)
    }

    /// 已认证用户是否应该离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 控制面板内的子页面
    pub fn dashboard_page(&self) -> Option<DashboardPage> {
        match self {
            Self::Dashboard => Some(DashboardPage::Home),
            Self::Profile => Some(DashboardPage::Profile),
            Self::Activities => Some(DashboardPage::Activities),
            Self::Login | Self::Register | Self::NotFound => None,
        }
    }

    /// 守卫判定：返回 Some(重定向目标) 或 None（放行）
    pub fn guard(&self, is_authenticated: bool) -> Option<AppRoute> {
        if self.requires_auth() && !is_authenticated {
            Some(Self::auth_failure_redirect())
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Some(Self::auth_success_redirect())
        } else {
            None
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/dashboard/activities"), AppRoute::Activities);
        assert_eq!(AppRoute::from_path("/dashboard/grades"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn protected_routes_bounce_to_login() {
        for route in [AppRoute::Dashboard, AppRoute::Profile, AppRoute::Activities] {
            assert_eq!(route.guard(false), Some(AppRoute::Login));
            assert_eq!(route.guard(true), None);
        }
    }

    #[test]
    fn signed_in_users_skip_auth_pages() {
        assert_eq!(AppRoute::Login.guard(true), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::Register.guard(true), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::Login.guard(false), None);
        assert_eq!(AppRoute::NotFound.guard(false), None);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Profile,
            AppRoute::Activities,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }
}
