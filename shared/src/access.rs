//! 角色访问表
//!
//! 将 (控制面板子页面, 角色) 显式映射到视图或重定向。`match` 是穷尽的，
//! 新增角色时编译器会强制补全这张表。

use crate::{User, UserRole};

/// 控制面板下的子页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    Home,
    Profile,
    Activities,
}

/// 最终渲染的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    StudentHome,
    TeacherHome,
    AdminHome,
    StudentActivities,
    TeacherActivities,
    Profile,
}

/// 解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    /// 重定向到控制面板首页
    RedirectHome,
    /// 重定向到登录页
    RedirectLogin,
}

/// 根据角色选择视图
pub fn view_for(page: DashboardPage, role: UserRole) -> Resolution {
    use Resolution::*;

    match (page, role) {
        (DashboardPage::Home, UserRole::Student) => Render(View::StudentHome),
        (DashboardPage::Home, UserRole::Teacher) => Render(View::TeacherHome),
        (DashboardPage::Home, UserRole::Admin) => Render(View::AdminHome),
        (DashboardPage::Activities, UserRole::Student) => Render(View::StudentActivities),
        (DashboardPage::Activities, UserRole::Teacher) => Render(View::TeacherActivities),
        (DashboardPage::Activities, UserRole::Admin) => RedirectHome,
        (DashboardPage::Profile, _) => Render(View::Profile),
    }
}

/// 带会话用户的解析：没有用户时一律回到登录页
pub fn resolve_view(page: DashboardPage, user: Option<&User>) -> Resolution {
    match user {
        Some(user) => view_for(page, user.role),
        None => Resolution::RedirectLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{KeyValueStore, MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};

    #[test]
    fn each_role_gets_its_own_home() {
        assert_eq!(
            view_for(DashboardPage::Home, UserRole::Student),
            Resolution::Render(View::StudentHome)
        );
        assert_eq!(
            view_for(DashboardPage::Home, UserRole::Teacher),
            Resolution::Render(View::TeacherHome)
        );
        assert_eq!(
            view_for(DashboardPage::Home, UserRole::Admin),
            Resolution::Render(View::AdminHome)
        );
    }

    #[test]
    fn admin_has_no_activities_page() {
        assert_eq!(
            view_for(DashboardPage::Activities, UserRole::Admin),
            Resolution::RedirectHome
        );
        assert_eq!(
            view_for(DashboardPage::Activities, UserRole::Teacher),
            Resolution::Render(View::TeacherActivities)
        );
    }

    #[test]
    fn profile_is_open_to_every_role() {
        for role in [UserRole::Student, UserRole::Teacher, UserRole::Admin] {
            assert_eq!(
                view_for(DashboardPage::Profile, role),
                Resolution::Render(View::Profile)
            );
        }
    }

    #[test]
    fn unrecognized_role_ends_at_login() {
        let mut storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "jwt-abc").unwrap();
        storage
            .set(
                USER_KEY,
                r#"{"id":"u1","email":"p@school.edu","firstName":"P","lastName":"Q","role":"PRINCIPAL"}"#,
            )
            .unwrap();

        let session = SessionStore::hydrate(storage);
        assert_eq!(
            resolve_view(DashboardPage::Home, session.user()),
            Resolution::RedirectLogin
        );
    }
}
