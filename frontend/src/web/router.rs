//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History（push 或 replace）
fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        tracing::warn!(path, error = ?e, "history update failed");
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证状态以信号形式注入，与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建路由服务并挂载监听器
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    pub fn start(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };

        // 首次加载同样经过守卫（如直接打开 /dashboard 但未登录）
        router.navigate_to(initial_route, false);
        router.init_popstate_listener();
        router.setup_auth_redirect();
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate_to(&self, target: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        let route = match target.guard(is_auth) {
            Some(redirect) => {
                tracing::info!(from = %target, to = %redirect, "[Router] guard redirect");
                redirect
            }
            None => target,
        };

        write_history(route.to_path(), use_push);
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            // popstate 时 URL 已经改变，重定向使用 replace
            router.navigate_to(target, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if let Some(redirect) = route.guard(is_auth) {
                write_history(redirect.to_path(), true);
                set_route.set(redirect);
                tracing::info!(
                    logged_in = is_auth,
                    to = %redirect,
                    "[Router] auth state changed"
                );
            }
        });
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件，上下文 `ctx` 显式传入匹配函数。
#[component]
pub fn RouterOutlet<C>(
    router: RouterService,
    ctx: C,
    /// 路由匹配函数：接收当前路由与上下文，返回对应视图
    matcher: fn(AppRoute, C) -> AnyView,
) -> impl IntoView
where
    C: Copy + Send + Sync + 'static,
{
    move || matcher(router.current_route().get(), ctx)
}

/// 仅拦截不带修饰键的主键点击
fn is_plain_click(button: i16, modified: bool) -> bool {
    button == 0 && !modified
}

/// 应用内链接：拦截点击，通过路由服务导航而不是整页刷新
#[component]
pub fn Link(
    router: RouterService,
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let on_click = move |ev: leptos::ev::MouseEvent| {
        let modified = ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key();
        // 修饰键或中键点击交给浏览器（新标签页、新窗口）
        if !is_plain_click(ev.button(), modified) {
            return;
        }
        ev.prevent_default();
        router.navigate_to(to, true);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_primary_clicks_are_intercepted() {
        assert!(is_plain_click(0, false));
        // ctrl / cmd / shift / alt + 左键
        assert!(!is_plain_click(0, true));
        // 中键、右键
        assert!(!is_plain_click(1, false));
        assert!(!is_plain_click(2, false));
    }
}
