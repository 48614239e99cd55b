//! GraphQL 操作目录
//!
//! 每个后端操作对应一个实现了 [`GraphqlOperation`] 的结构体：
//! 结构体自身序列化为 `variables`，`Response` 是 `data` 对象的形状。

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    ActivityState, AuthPayload, Group, MembershipRole, Person, TransitionError, User, UserRole,
    activity::StateAction,
};

// =========================================================
// 失效主题 (Invalidation Topics)
// =========================================================

/// 读视图订阅、写操作发布的失效主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Groups,
    Students,
    Users,
    Activities,
    JoinedActivities,
    Profile,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Groups,
        Topic::Students,
        Topic::Users,
        Topic::Activities,
        Topic::JoinedActivities,
        Topic::Profile,
    ];

    pub fn index(&self) -> usize {
        match self {
            Topic::Groups => 0,
            Topic::Students => 1,
            Topic::Users => 2,
            Topic::Activities => 3,
            Topic::JoinedActivities => 4,
            Topic::Profile => 5,
        }
    }
}

// =========================================================
// 操作特性 (Operation Trait)
// =========================================================

/// 定义一次 GraphQL 调用的文档、变量与返回数据之间的关系
pub trait GraphqlOperation: Serialize {
    /// `data` 对象的形状
    type Response: DeserializeOwned;
    /// operationName
    const NAME: &'static str;
    /// 查询 / 变更文档
    const DOCUMENT: &'static str;
    /// 查询读取的主题（变更为 None）
    const TOPIC: Option<Topic> = None;
    /// 变更成功后需要刷新的主题
    const INVALIDATES: &'static [Topic] = &[];
}

/// 发往后端的请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a, V: Serialize> {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: &'a V,
}

impl<'a, V: GraphqlOperation> GraphqlRequest<'a, V> {
    pub fn new(op: &'a V) -> Self {
        Self {
            operation_name: V::NAME,
            query: V::DOCUMENT,
            variables: op,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// 后端返回的响应体
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

// =========================================================
// 选择集片段 (Selection Fragments)
// =========================================================

macro_rules! user_fields {
    () => {
        "id email firstName lastName role"
    };
}

macro_rules! activity_fields {
    () => {
        "id title description scheduledAt createdAt state location group { id name }"
    };
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub login_input: LoginInput,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: AuthPayload,
}

impl GraphqlOperation for Login {
    type Response = LoginData;
    const NAME: &'static str = "Login";
    const DOCUMENT: &'static str = concat!(
        "mutation Login($loginInput: LoginInput!) { login(loginInput: $loginInput) { accessToken user { ",
        user_fields!(),
        " } } }"
    );
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub register_input: RegisterInput,
}

#[derive(Debug, Deserialize)]
pub struct RegisterData {
    pub register: AuthPayload,
}

impl GraphqlOperation for Register {
    type Response = RegisterData;
    const NAME: &'static str = "Register";
    const DOCUMENT: &'static str = concat!(
        "mutation Register($registerInput: RegisterInput!) { register(registerInput: $registerInput) { accessToken user { ",
        user_fields!(),
        " } } }"
    );
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Me {}

#[derive(Debug, Deserialize)]
pub struct MeData {
    pub me: User,
}

impl GraphqlOperation for Me {
    type Response = MeData;
    const NAME: &'static str = "Me";
    const DOCUMENT: &'static str = concat!(
        "query Me { me { ",
        user_fields!(),
        " createdAt updatedAt } }"
    );
    const TOPIC: Option<Topic> = Some(Topic::Profile);
}

/// 连通性探测：最小的合法查询
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypenameProbe {}

#[derive(Debug, Deserialize)]
pub struct TypenameData {
    #[serde(rename = "__typename")]
    pub typename: String,
}

impl GraphqlOperation for TypenameProbe {
    type Response = TypenameData;
    const NAME: &'static str = "TestQuery";
    const DOCUMENT: &'static str = "query TestQuery { __typename }";
}

// =========================================================
// 用户与小组查询 (User / Group Queries)
// =========================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct Users {}

#[derive(Debug, Deserialize)]
pub struct UsersData {
    pub users: Vec<User>,
}

impl GraphqlOperation for Users {
    type Response = UsersData;
    const NAME: &'static str = "GetAllUsers";
    const DOCUMENT: &'static str = concat!("query GetAllUsers { users { ", user_fields!(), " createdAt } }");
    const TOPIC: Option<Topic> = Some(Topic::Users);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Groups {}

#[derive(Debug, Deserialize)]
pub struct GroupsData {
    pub groups: Vec<Group>,
}

impl GraphqlOperation for Groups {
    type Response = GroupsData;
    const NAME: &'static str = "GetAllGroups";
    const DOCUMENT: &'static str = "query GetAllGroups { groups { id name description createdAt \
        owner { id firstName lastName email } \
        members { id role user { id firstName lastName } } } }";
    const TOPIC: Option<Topic> = Some(Topic::Groups);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MyGroups {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyGroupsData {
    pub my_groups: Vec<Group>,
}

impl GraphqlOperation for MyGroups {
    type Response = MyGroupsData;
    const NAME: &'static str = "GetTeacherGroups";
    const DOCUMENT: &'static str = "query GetTeacherGroups { myGroups { id name description \
        members { id role user { id firstName lastName email } } } }";
    const TOPIC: Option<Topic> = Some(Topic::Groups);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MyStudentGroups {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyStudentGroupsData {
    pub my_student_groups: Vec<Group>,
}

impl GraphqlOperation for MyStudentGroups {
    type Response = MyStudentGroupsData;
    const NAME: &'static str = "GetStudentGroups";
    const DOCUMENT: &'static str = "query GetStudentGroups { myStudentGroups { id name description \
        owner { id firstName lastName email } \
        members { id role user { id firstName lastName email } } } }";
    const TOPIC: Option<Topic> = Some(Topic::Groups);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentUsers {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUsersData {
    pub student_users: Vec<Person>,
}

impl GraphqlOperation for StudentUsers {
    type Response = StudentUsersData;
    const NAME: &'static str = "GetStudents";
    const DOCUMENT: &'static str = "query GetStudents { studentUsers { id firstName lastName email } }";
    const TOPIC: Option<Topic> = Some(Topic::Students);
}

// =========================================================
// 小组变更 (Group Mutations)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroup {
    pub create_group_input: CreateGroupInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupData {
    pub create_group: Group,
}

impl GraphqlOperation for CreateGroup {
    type Response = CreateGroupData;
    const NAME: &'static str = "CreateGroup";
    const DOCUMENT: &'static str = "mutation CreateGroup($createGroupInput: CreateGroupInput!) { \
        createGroup(createGroupInput: $createGroupInput) { id name description } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Groups];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGroupMemberInput {
    pub group_id: String,
    pub user_id: String,
    pub role: MembershipRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGroupMember {
    pub add_group_member_input: AddGroupMemberInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGroupMemberData {
    pub add_group_member: crate::Membership,
}

impl GraphqlOperation for AddGroupMember {
    type Response = AddGroupMemberData;
    const NAME: &'static str = "AddGroupMember";
    const DOCUMENT: &'static str = "mutation AddGroupMember($addGroupMemberInput: AddGroupMemberInput!) { \
        addGroupMember(addGroupMemberInput: $addGroupMemberInput) { id role user { id firstName lastName } } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Groups];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupMember {
    pub group_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupMemberData {
    pub remove_group_member: bool,
}

impl GraphqlOperation for RemoveGroupMember {
    type Response = RemoveGroupMemberData;
    const NAME: &'static str = "RemoveGroupMember";
    const DOCUMENT: &'static str = "mutation RemoveGroupMember($groupId: ID!, $userId: ID!) { \
        removeGroupMember(groupId: $groupId, userId: $userId) }";
    const INVALIDATES: &'static [Topic] = &[Topic::Groups];
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveGroup {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RemovedGroup {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupData {
    pub remove_group: RemovedGroup,
}

impl GraphqlOperation for RemoveGroup {
    type Response = RemoveGroupData;
    const NAME: &'static str = "RemoveGroup";
    const DOCUMENT: &'static str = "mutation RemoveGroup($id: ID!) { removeGroup(id: $id) { id name } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Groups];
}

// =========================================================
// 活动 (Activities)
// =========================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct MyActivitiesAsStudent {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyActivitiesAsStudentData {
    pub my_activities_as_student: Vec<crate::Activity>,
}

impl GraphqlOperation for MyActivitiesAsStudent {
    type Response = MyActivitiesAsStudentData;
    const NAME: &'static str = "GetStudentActivities";
    const DOCUMENT: &'static str = concat!(
        "query GetStudentActivities { myActivitiesAsStudent { ",
        activity_fields!(),
        " createdBy { id firstName lastName } attendees { id firstName lastName } } }"
    );
    const TOPIC: Option<Topic> = Some(Topic::Activities);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MyActivitiesAsTeacher {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyActivitiesAsTeacherData {
    pub my_activities_as_teacher: Vec<crate::Activity>,
}

impl GraphqlOperation for MyActivitiesAsTeacher {
    type Response = MyActivitiesAsTeacherData;
    const NAME: &'static str = "GetTeacherActivities";
    const DOCUMENT: &'static str = concat!(
        "query GetTeacherActivities { myActivitiesAsTeacher { ",
        activity_fields!(),
        " attendees { id firstName lastName } } }"
    );
    const TOPIC: Option<Topic> = Some(Topic::Activities);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MyJoinedActivities {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyJoinedActivitiesData {
    pub my_joined_activities: Vec<crate::Activity>,
}

impl GraphqlOperation for MyJoinedActivities {
    type Response = MyJoinedActivitiesData;
    const NAME: &'static str = "GetJoinedActivities";
    const DOCUMENT: &'static str = concat!(
        "query GetJoinedActivities { myJoinedActivities { ",
        activity_fields!(),
        " createdBy { id firstName lastName } } }"
    );
    const TOPIC: Option<Topic> = Some(Topic::JoinedActivities);
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinActivityInput {
    pub activity_id: String,
}

/// 加入活动
///
/// 重复加入的去重完全由后端保证，客户端只在渲染前按参与者列表隐藏入口。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinActivity {
    pub join_activity_input: JoinActivityInput,
}

impl JoinActivity {
    pub fn new(activity_id: impl Into<String>) -> Self {
        Self {
            join_activity_input: JoinActivityInput {
                activity_id: activity_id.into(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JoinedActivity {
    pub id: String,
    #[serde(default)]
    pub attendees: Vec<Person>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinActivityData {
    pub join_activity: JoinedActivity,
}

impl GraphqlOperation for JoinActivity {
    type Response = JoinActivityData;
    const NAME: &'static str = "JoinActivity";
    const DOCUMENT: &'static str = "mutation JoinActivity($joinActivityInput: JoinActivityInput!) { \
        joinActivity(joinActivityInput: $joinActivityInput) { id attendees { id firstName lastName } } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Activities, Topic::JoinedActivities];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityInput {
    pub title: String,
    pub description: String,
    pub group_id: String,
    /// RFC 3339 UTC
    pub scheduled_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub state: ActivityState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    pub create_activity_input: CreateActivityInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedActivity {
    pub id: String,
    pub title: String,
    pub state: ActivityState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityData {
    pub create_activity: CreatedActivity,
}

impl GraphqlOperation for CreateActivity {
    type Response = CreateActivityData;
    const NAME: &'static str = "CreateActivity";
    const DOCUMENT: &'static str = "mutation CreateActivity($createActivityInput: CreateActivityInput!) { \
        createActivity(createActivityInput: $createActivityInput) { id title description scheduledAt state } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Activities];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityStateInput {
    pub activity_id: String,
    pub state: ActivityState,
}

/// 更新活动状态
///
/// 只能通过 [`UpdateActivityState::new`] 或 [`UpdateActivityState::from_action`] 构造，
/// 保证发出的迁移在本地已经校验过。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityState {
    update_activity_state_input: UpdateActivityStateInput,
}

impl UpdateActivityState {
    pub fn new(
        activity_id: impl Into<String>,
        current: ActivityState,
        next: ActivityState,
    ) -> Result<Self, TransitionError> {
        let state = current.transition(next)?;
        Ok(Self {
            update_activity_state_input: UpdateActivityStateInput {
                activity_id: activity_id.into(),
                state,
            },
        })
    }

    pub fn from_action(
        activity_id: impl Into<String>,
        current: ActivityState,
        action: StateAction,
    ) -> Result<Self, TransitionError> {
        Self::new(activity_id, current, action.target())
    }

    pub fn target(&self) -> ActivityState {
        self.update_activity_state_input.state
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatedActivity {
    pub id: String,
    pub state: ActivityState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityStateData {
    pub update_activity_state: UpdatedActivity,
}

impl GraphqlOperation for UpdateActivityState {
    type Response = UpdateActivityStateData;
    const NAME: &'static str = "UpdateActivityState";
    const DOCUMENT: &'static str = "mutation UpdateActivityState($updateActivityStateInput: UpdateActivityStateInput!) { \
        updateActivityState(updateActivityStateInput: $updateActivityStateInput) { id state } }";
    const INVALIDATES: &'static [Topic] = &[Topic::Activities];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_name_document_and_variables() {
        let op = RemoveGroupMember {
            group_id: "g1".to_string(),
            user_id: "u9".to_string(),
        };
        let body = serde_json::to_value(GraphqlRequest::new(&op)).unwrap();
        assert_eq!(body["operationName"], "RemoveGroupMember");
        assert_eq!(body["variables"], json!({ "groupId": "g1", "userId": "u9" }));
        assert!(body["query"].as_str().unwrap().contains("removeGroupMember"));
    }

    #[test]
    fn variable_free_queries_send_an_empty_object() {
        let body = serde_json::to_value(GraphqlRequest::new(&MyGroups {})).unwrap();
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn nested_inputs_use_wire_names() {
        let op = AddGroupMember {
            add_group_member_input: AddGroupMemberInput {
                group_id: "g1".to_string(),
                user_id: "s1".to_string(),
                role: MembershipRole::GroupLeader,
            },
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({ "addGroupMemberInput": { "groupId": "g1", "userId": "s1", "role": "GROUP_LEADER" } })
        );

        let op = CreateActivity {
            create_activity_input: CreateActivityInput {
                title: "Lab".to_string(),
                description: "Titration".to_string(),
                group_id: "g1".to_string(),
                scheduled_at: "2024-05-01T12:30:00.000Z".to_string(),
                location: None,
                state: ActivityState::New,
            },
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["createActivityInput"]["state"], "NEW");
        assert!(value["createActivityInput"].get("location").is_none());
    }

    #[test]
    fn state_update_rejects_illegal_moves() {
        let op = UpdateActivityState::from_action("a1", ActivityState::New, StateAction::Start)
            .unwrap();
        assert_eq!(op.target(), ActivityState::InProgress);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({ "updateActivityStateInput": { "activityId": "a1", "state": "IN_PROGRESS" } })
        );

        assert!(
            UpdateActivityState::new("a1", ActivityState::Completed, ActivityState::Canceled)
                .is_err()
        );
        assert!(UpdateActivityState::new("a1", ActivityState::InProgress, ActivityState::New).is_err());
    }

    #[test]
    fn mutations_declare_what_they_invalidate() {
        assert_eq!(CreateGroup::INVALIDATES, &[Topic::Groups]);
        assert_eq!(
            JoinActivity::INVALIDATES,
            &[Topic::Activities, Topic::JoinedActivities]
        );
        assert!(Login::INVALIDATES.is_empty());
        assert_eq!(MyGroups::TOPIC, Some(Topic::Groups));
        assert_eq!(MyJoinedActivities::TOPIC, Some(Topic::JoinedActivities));
    }

    #[test]
    fn topic_indices_are_dense() {
        for (i, topic) in Topic::ALL.iter().enumerate() {
            assert_eq!(topic.index(), i);
        }
    }
}
