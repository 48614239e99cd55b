//! Classroom 前端应用
//!
//! 采用显式上下文传递的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: GraphQL 网关的浏览器端入口
//! - `sync`: 失效总线
//! - `components`: UI 组件层

mod api;
mod auth;
mod sync;
mod components {
    mod activity_card;
    pub mod admin_dashboard;
    pub mod backend_status;
    mod create_activity_dialog;
    pub mod dashboard;
    pub mod error_banner;
    mod icons;
    mod modal;
    pub mod login;
    pub mod not_found;
    pub mod profile;
    pub mod register;
    pub mod student_activities;
    pub mod student_dashboard;
    pub mod teacher_activities;
    pub mod teacher_dashboard;
}

// 浏览器原生 API 封装模块
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::BrowserStorage;
}

use classroom_shared::config::ClientConfig;
use leptos::prelude::*;

use crate::api::ApiHandle;
use crate::auth::AuthContext;
use crate::components::backend_status::BackendStatus;
use crate::components::dashboard::DashboardShell;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::register::RegisterPage;
use crate::sync::InvalidationBus;
use web::route::AppRoute;
use web::router::{RouterOutlet, RouterService};

/// 应用上下文
///
/// 在 `App` 中构造一次，作为 prop 逐层传递。所有字段都是 `Copy` 的信号句柄。
#[derive(Clone, Copy)]
pub struct AppContext {
    pub auth: AuthContext,
    pub router: RouterService,
    pub api: ApiHandle,
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute, ctx: AppContext) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage ctx=ctx /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage ctx=ctx /> }.into_any(),
        AppRoute::Dashboard | AppRoute::Profile | AppRoute::Activities => {
            match route.dashboard_page() {
                Some(page) => view! { <DashboardShell ctx=ctx page=page /> }.into_any(),
                None => view! { <NotFoundPage ctx=ctx /> }.into_any(),
            }
        }
        AppRoute::NotFound => view! { <NotFoundPage ctx=ctx /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置（构建期可用 CLASSROOM_API_URL 覆盖）
    let config = ClientConfig::from_env_value(option_env!("CLASSROOM_API_URL"));

    // 2. 从 localStorage 恢复会话
    let auth = AuthContext::new();

    // 3. 失效总线与 API 句柄
    let bus = InvalidationBus::new();
    let api = ApiHandle::new(&config.api_url, auth, bus);

    // 4. 路由服务：注入认证信号实现守卫
    let router = RouterService::start(auth.is_authenticated_signal());

    let ctx = AppContext { auth, router, api };

    view! {
        <BackendStatus api=api />
        <RouterOutlet router=router ctx=ctx matcher=route_matcher />
    }
}
