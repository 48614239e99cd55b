//! Classroom 前后端共享模块
//!
//! 与目标平台无关的纯逻辑层：
//! - 领域模型（用户 / 小组 / 成员 / 活动）
//! - `protocol`: GraphQL 操作目录
//! - `client`: API 网关客户端与连通性探测
//! - `session`: 会话存储
//! - `access`: 角色到视图的映射表
//! - `activity`: 活动生命周期与学生视角过滤
//! - `notice`: 自动消失的错误提示

use serde::{Deserialize, Serialize};

pub mod access;
pub mod activity;
pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod notice;
pub mod protocol;
pub mod session;

pub use activity::ActivityState;
pub use error::{ClientError, SessionError, StorageError, TransitionError};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const NO_DESCRIPTION: &str = "No description";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 系统级角色
///
/// 反序列化是严格的：未知角色字符串会导致整条记录解析失败，
/// 而不是静默落入某个默认分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Teacher => "TEACHER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// 是否在导航栏显示 "Activities" 入口
    pub fn has_activities(&self) -> bool {
        match self {
            UserRole::Student | UserRole::Teacher => true,
            UserRole::Admin => false,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 完整的用户记录（login / register / me / users 返回）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 用服务端记录刷新缓存的用户
    ///
    /// 姓名只在本地编辑，保留缓存值；邮箱、角色与时间戳以服务端为准。
    /// 两者 id 不同时直接采用服务端记录。
    pub fn refreshed_from(&self, fresh: User) -> User {
        if fresh.id != self.id {
            return fresh;
        }
        User {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            ..fresh
        }
    }
}

/// 嵌套位置上的部分用户选择集（组长、成员、参与者、创建者）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 小组内角色，与系统级角色相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    GroupLeader,
    #[default]
    CommonMember,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::GroupLeader => "GROUP_LEADER",
            MembershipRole::CommonMember => "COMMON_MEMBER",
        }
    }

    /// 表单值解析（`<select>` 的 value）
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "GROUP_LEADER" => MembershipRole::GroupLeader,
            _ => MembershipRole::CommonMember,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipRole::GroupLeader => "Group Leader",
            MembershipRole::CommonMember => "Member",
        }
    }

    /// 管理员视图使用的短标签
    pub fn short_label(&self) -> &'static str {
        match self {
            MembershipRole::GroupLeader => "Leader",
            MembershipRole::CommonMember => "Member",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    pub role: MembershipRole,
    pub user: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub owner: Option<Person>,
    #[serde(default)]
    pub members: Vec<Membership>,
}

impl Group {
    /// 描述为空或缺失时显示 "No description"
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => NO_DESCRIPTION,
        }
    }

    /// 指定用户在本组中的角色（非成员返回 None）
    pub fn role_of(&self, user_id: &str) -> Option<MembershipRole> {
        self.members
            .iter()
            .find(|m| m.user.id == user_id)
            .map(|m| m.role)
    }

    /// 学生面板 "Your Role" 一栏的文案
    pub fn role_label_for(&self, user_id: &str) -> &'static str {
        match self.role_of(user_id) {
            Some(MembershipRole::GroupLeader) => MembershipRole::GroupLeader.label(),
            _ => MembershipRole::CommonMember.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub scheduled_at: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub state: ActivityState,
    #[serde(default)]
    pub location: Option<String>,
    pub group: GroupRef,
    #[serde(default)]
    pub created_by: Option<Person>,
    #[serde(default)]
    pub attendees: Vec<Person>,
}

/// 缺省与 `null` 都视为空字符串
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Activity {
    pub fn has_attendee(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|a| a.id == user_id)
    }

    /// 非空地点
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }
}

/// login / register 的返回载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: None,
        }
    }

    #[test]
    fn empty_description_falls_back() {
        let json = r#"{"id":"g1","name":"Math 101","description":""}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.description_or_default(), "No description");

        let json = r#"{"id":"g2","name":"Art","description":null}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.description_or_default(), "No description");
        assert!(group.members.is_empty());
        assert!(group.owner.is_none());
    }

    #[test]
    fn student_role_label_follows_own_membership() {
        let group = Group {
            id: "g1".to_string(),
            name: "Physics".to_string(),
            description: Some("Waves".to_string()),
            created_at: None,
            owner: None,
            members: vec![
                Membership {
                    id: "m1".to_string(),
                    role: MembershipRole::GroupLeader,
                    user: person("s1"),
                },
                Membership {
                    id: "m2".to_string(),
                    role: MembershipRole::CommonMember,
                    user: person("s2"),
                },
            ],
        };

        assert_eq!(group.role_label_for("s1"), "Group Leader");
        assert_eq!(group.role_label_for("s2"), "Member");
        assert_eq!(group.role_label_for("stranger"), "Member");
        assert_eq!(group.description_or_default(), "Waves");
    }

    #[test]
    fn refresh_keeps_locally_edited_names() {
        let json = r#"{"id":"u1","email":"old@school.edu","firstName":"Samantha","lastName":"Lee","role":"STUDENT"}"#;
        let cached: User = serde_json::from_str(json).unwrap();
        let json = r#"{"id":"u1","email":"new@school.edu","firstName":"Sam","lastName":"Lee","role":"TEACHER","createdAt":"2024-01-01T00:00:00.000Z"}"#;
        let fresh: User = serde_json::from_str(json).unwrap();

        let merged = cached.refreshed_from(fresh.clone());
        assert_eq!(merged.first_name, "Samantha");
        assert_eq!(merged.email, "new@school.edu");
        assert_eq!(merged.role, UserRole::Teacher);
        assert_eq!(merged.created_at, fresh.created_at);

        // 合并结果再次刷新保持不变，页面不会反复写回
        assert_eq!(merged.refreshed_from(fresh.clone()), merged);

        let mut other = fresh;
        other.id = "u2".to_string();
        assert_eq!(cached.refreshed_from(other.clone()), other);
    }

    #[test]
    fn null_activity_description_decodes_as_empty() {
        let json = r#"[
            {"id":"a1","title":"Lab","description":null,"scheduledAt":"2024-05-01T14:30:00.000Z","state":"NEW","group":{"id":"g1","name":"Physics"}},
            {"id":"a2","title":"Trip","scheduledAt":"2024-05-02T08:00:00.000Z","state":"IN_PROGRESS","group":{"id":"g1","name":"Physics"}}
        ]"#;
        let list: Vec<Activity> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].description, "");
        assert_eq!(list[1].description, "");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"id":"u1","email":"a@b.c","firstName":"A","lastName":"B","role":"JANITOR"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn user_round_trips_in_camel_case() {
        let json = r#"{"id":"u1","email":"t@school.edu","firstName":"Tom","lastName":"Hardy","role":"TEACHER","createdAt":"2024-01-01T00:00:00.000Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.full_name(), "Tom Hardy");

        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["firstName"], "Tom");
        assert!(out.get("updatedAt").is_none());
    }

    #[test]
    fn only_student_and_teacher_see_activities() {
        assert!(UserRole::Student.has_activities());
        assert!(UserRole::Teacher.has_activities());
        assert!(!UserRole::Admin.has_activities());
    }
}
