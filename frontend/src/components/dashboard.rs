//! 控制面板外壳
//!
//! 顶部导航 + 按角色分派的内容区。分派完全交给 `access::resolve_view`，
//! 这里只负责把解析结果变成视图或重定向。

use classroom_shared::access::{DashboardPage, Resolution, View, resolve_view};
use leptos::prelude::*;

use crate::AppContext;
use crate::components::admin_dashboard::AdminDashboard;
use crate::components::icons::{GraduationCap, LogOut};
use crate::components::profile::ProfilePage;
use crate::components::student_activities::StudentActivities;
use crate::components::student_dashboard::StudentDashboard;
use crate::components::teacher_activities::TeacherActivities;
use crate::components::teacher_dashboard::TeacherDashboard;
use crate::web::route::AppRoute;
use crate::web::router::Link;

fn render_view(view: View, ctx: AppContext) -> AnyView {
    match view {
        View::StudentHome => view! { <StudentDashboard ctx=ctx /> }.into_any(),
        View::TeacherHome => view! { <TeacherDashboard ctx=ctx /> }.into_any(),
        View::AdminHome => view! { <AdminDashboard ctx=ctx /> }.into_any(),
        View::StudentActivities => view! { <StudentActivities ctx=ctx /> }.into_any(),
        View::TeacherActivities => view! { <TeacherActivities ctx=ctx /> }.into_any(),
        View::Profile => view! { <ProfilePage ctx=ctx /> }.into_any(),
    }
}

fn nav_class(active: bool) -> &'static str {
    if active {
        "btn btn-ghost btn-sm btn-active"
    } else {
        "btn btn-ghost btn-sm"
    }
}

#[component]
pub fn DashboardShell(ctx: AppContext, page: DashboardPage) -> impl IntoView {
    let auth = ctx.auth;
    let router = ctx.router;

    // 资料更新不会改变解析结果，Memo 避免内容区重挂载
    let resolution = Memo::new(move |_| resolve_view(page, auth.user().as_ref()));

    Effect::new(move |_| match resolution.get() {
        Resolution::RedirectHome => router.navigate_to(AppRoute::Dashboard, false),
        Resolution::RedirectLogin => router.navigate_to(AppRoute::Login, false),
        Resolution::Render(_) => {}
    });

    let show_activities = move || auth.user().is_some_and(|u| u.role.has_activities());
    let user_label = move || {
        auth.user()
            .map(|u| format!("{} ({})", u.full_name(), u.role))
            .unwrap_or_default()
    };

    // 注销后由路由服务的认证监听跳转到登录页
    let on_logout = move |_| auth.logout();

    let content = move || match resolution.get() {
        Resolution::Render(view) => render_view(view, ctx),
        Resolution::RedirectHome | Resolution::RedirectLogin => view! {
            <div class="flex items-center justify-center h-64">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-sm px-4 md:px-8">
                <div class="flex-1 gap-2">
                    <GraduationCap attr:class="text-primary h-6 w-6" />
                    <span class="text-xl font-bold text-primary">"Student Management System"</span>
                    <div class="hidden sm:flex gap-1 ml-6">
                        <Link router=router to=AppRoute::Dashboard class=nav_class(page == DashboardPage::Home)>
                            "Dashboard"
                        </Link>
                        <Show when=show_activities>
                            <Link router=router to=AppRoute::Activities class=nav_class(page == DashboardPage::Activities)>
                                "Activities"
                            </Link>
                        </Show>
                        <Link router=router to=AppRoute::Profile class=nav_class(page == DashboardPage::Profile)>
                            "Profile"
                        </Link>
                    </div>
                </div>
                <div class="flex-none gap-4">
                    <span class="text-sm font-medium hidden md:inline">{user_label}</span>
                    <button on:click=on_logout class="btn btn-primary btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>

            <main class="max-w-7xl mx-auto p-4 md:p-8">
                {content}
            </main>
        </div>
    }
}
