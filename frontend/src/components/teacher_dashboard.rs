//! 教师面板
//!
//! 小组管理：创建 / 删除小组，添加 / 移除成员。
//! 所有变更成功后由失效总线触发 `myGroups` 重新查询。

use classroom_shared::notice::ErrorNotice;
use classroom_shared::protocol::{
    AddGroupMember, AddGroupMemberInput, CreateGroup, CreateGroupInput, MyGroups, RemoveGroup,
    RemoveGroupMember, StudentUsers,
};
use classroom_shared::{Group, MembershipRole, Person};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::AppContext;
use crate::api::ApiHandle;
use crate::components::error_banner::{ErrorBanner, raise_notice};
use crate::components::icons::{Plus, Trash2};
use crate::components::modal::{Modal, ModalActions, confirm};

const CONFIRM_REMOVE_MEMBER: &str = "Are you sure you want to remove this student from the group?";
const CONFIRM_REMOVE_GROUP: &str = "Are you sure you want to remove this group? This action cannot be undone and all member associations will be deleted.";

/// 添加成员对话框的目标小组
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectedGroup {
    id: String,
    name: String,
}

#[component]
pub fn TeacherDashboard(ctx: AppContext) -> impl IntoView {
    let api = ctx.api;
    let auth = ctx.auth;

    let groups = api.watch(MyGroups::default(), |d| d.my_groups);
    let students = api.watch(StudentUsers::default(), |d| d.student_users);

    let notice = RwSignal::new(ErrorNotice::new());
    let show_create = RwSignal::new(false);
    let selected = RwSignal::new(Option::<SelectedGroup>::None);

    let handle_remove_group = move |group_id: String| {
        if !confirm(CONFIRM_REMOVE_GROUP) {
            return;
        }
        spawn_local(async move {
            if let Err(e) = api.mutate(&RemoveGroup { id: group_id }).await {
                raise_notice(notice, e.to_string());
            }
        });
    };

    let handle_remove_member = move |group_id: String, user_id: String| {
        if !confirm(CONFIRM_REMOVE_MEMBER) {
            return;
        }
        spawn_local(async move {
            if let Err(e) = api.mutate(&RemoveGroupMember { group_id, user_id }).await {
                raise_notice(notice, e.to_string());
            }
        });
    };

    let first_name = move || auth.user().map(|u| u.first_name).unwrap_or_default();

    let body = move || {
        if groups.is_initial_loading() {
            return view! { <div class="text-center py-8">"Loading your groups..."</div> }.into_any();
        }
        if let Some(err) = groups.error.get() {
            return view! {
                <div class="text-center py-8 text-error">"Error loading your groups: " {err}</div>
            }
            .into_any();
        }

        let list = groups.get().unwrap_or_default();
        if list.is_empty() {
            return view! {
                <div class="text-center py-8 text-base-content/50">
                    "You haven't created any groups yet. Click \"Create Group\" to get started."
                </div>
            }
            .into_any();
        }

        view! {
            <div class="p-6 space-y-6">
                <h3 class="text-lg font-medium">"Your Groups"</h3>
                {list
                    .into_iter()
                    .map(|group| view! {
                        <TeacherGroupCard
                            group=group
                            on_add=Callback::new(move |g: SelectedGroup| selected.set(Some(g)))
                            on_remove_group=Callback::new(handle_remove_group)
                            on_remove_member=Callback::new(move |(g, u): (String, String)| handle_remove_member(g, u))
                        />
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <ErrorBanner notice=notice />
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h2 class="card-title text-2xl">"Teacher Dashboard"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Welcome back, " {first_name} "! Manage your student groups."
                        </p>
                    </div>
                    <button class="btn btn-primary gap-2" on:click=move |_| show_create.set(true)>
                        <Plus attr:class="h-4 w-4" /> "Create Group"
                    </button>
                </div>
                {body}
            </div>
        </div>

        <CreateGroupDialog api=api open=show_create notice=notice />
        <AddMemberDialog api=api selected=selected students=students.data notice=notice />
    }
}

#[component]
fn TeacherGroupCard(
    group: Group,
    on_add: Callback<SelectedGroup>,
    on_remove_group: Callback<String>,
    on_remove_member: Callback<(String, String)>,
) -> impl IntoView {
    let target = SelectedGroup {
        id: group.id.clone(),
        name: group.name.clone(),
    };
    let group_id = group.id.clone();
    let description = group.description_or_default().to_string();

    let members = if group.members.is_empty() {
        view! { <p class="text-sm text-base-content/50">"No members in this group yet."</p> }.into_any()
    } else {
        view! {
            <ul class="divide-y divide-base-300">
                {group
                    .members
                    .into_iter()
                    .map(|member| {
                        let ids = (group_id.clone(), member.user.id.clone());
                        view! {
                            <li class="py-3 flex justify-between items-center">
                                <div>
                                    <p class="text-sm font-medium">{member.user.full_name()}</p>
                                    <p class="text-sm text-base-content/60">{member.user.email.clone().unwrap_or_default()}</p>
                                    <p class="text-xs text-primary mt-1">{member.role.label()}</p>
                                </div>
                                <button
                                    class="btn btn-ghost btn-xs text-error"
                                    on:click=move |_| on_remove_member.run(ids.clone())
                                >
                                    "Remove"
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-200 shadow">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <div>
                        <h4 class="card-title text-lg">{group.name}</h4>
                        <p class="text-sm text-base-content/70">{description}</p>
                    </div>
                    <div class="flex gap-2">
                        <button class="btn btn-primary btn-sm" on:click=move |_| on_add.run(target.clone())>
                            "Add Student"
                        </button>
                        <button class="btn btn-error btn-sm gap-1" on:click=move |_| on_remove_group.run(group.id.clone())>
                            <Trash2 attr:class="h-4 w-4" /> "Remove Group"
                        </button>
                    </div>
                </div>
                <div class="divider my-1"></div>
                <h5 class="font-medium">"Group Members"</h5>
                {members}
            </div>
        </div>
    }
}

#[component]
fn CreateGroupDialog(api: ApiHandle, open: RwSignal<bool>, notice: RwSignal<ErrorNotice>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let op = CreateGroup {
            create_group_input: CreateGroupInput {
                name: name.get().trim().to_string(),
                description: description.get(),
            },
        };

        busy.set(true);
        spawn_local(async move {
            match api.mutate(&op).await {
                Ok(_) => {
                    open.set(false);
                    name.set(String::new());
                    description.set(String::new());
                }
                Err(e) => raise_notice(notice, e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <Modal open=open title="Create Group".to_string()>
            <form on:submit=on_submit class="space-y-4">
                <div class="form-control">
                    <label for="group_name" class="label">
                        <span class="label-text">"Group Name"</span>
                    </label>
                    <input id="group_name" type="text" required
                        class="input input-bordered w-full"
                        on:input=move |ev| name.set(event_target_value(&ev))
                        prop:value=move || name.get()
                    />
                </div>
                <div class="form-control">
                    <label for="group_description" class="label">
                        <span class="label-text">"Description"</span>
                    </label>
                    <textarea id="group_description" rows="3"
                        class="textarea textarea-bordered w-full"
                        on:input=move |ev| description.set(event_target_value(&ev))
                        prop:value=move || description.get()
                    ></textarea>
                </div>
                <ModalActions open=open busy=busy label="Create Group" busy_label="Creating..." />
            </form>
        </Modal>
    }
}

#[component]
fn AddMemberDialog(
    api: ApiHandle,
    selected: RwSignal<Option<SelectedGroup>>,
    students: RwSignal<Option<Vec<Person>>>,
    notice: RwSignal<ErrorNotice>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let student_id = RwSignal::new(String::new());
    let role = RwSignal::new(MembershipRole::default());
    let busy = RwSignal::new(false);

    // 选中小组即打开；关闭时清空选择
    Effect::new(move |_| {
        let wanted = selected.with(Option::is_some);
        if open.get_untracked() != wanted {
            open.set(wanted);
        }
    });
    Effect::new(move |_| {
        if !open.get() && selected.with_untracked(Option::is_some) {
            selected.set(None);
            student_id.set(String::new());
            role.set(MembershipRole::default());
        }
    });

    let title = Signal::derive(move || {
        selected
            .with(|s| s.as_ref().map(|g| format!("Add Student to {}", g.name)))
            .unwrap_or_default()
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(group) = selected.get() else {
            return;
        };
        let user_id = student_id.get();
        if user_id.is_empty() {
            return;
        }

        let op = AddGroupMember {
            add_group_member_input: AddGroupMemberInput {
                group_id: group.id,
                user_id,
                role: role.get(),
            },
        };

        busy.set(true);
        spawn_local(async move {
            match api.mutate(&op).await {
                Ok(_) => open.set(false),
                Err(e) => raise_notice(notice, e.to_string()),
            }
            busy.set(false);
        });
    };

    let student_options = move || {
        students
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|s| {
                let label = match &s.email {
                    Some(email) => format!("{} ({})", s.full_name(), email),
                    None => s.full_name(),
                };
                view! { <option value=s.id>{label}</option> }
            })
            .collect_view()
    };

    view! {
        <Modal open=open title=title>
            <form on:submit=on_submit class="space-y-4">
                <div class="form-control">
                    <label for="student_id" class="label">
                        <span class="label-text">"Select Student"</span>
                    </label>
                    <select id="student_id" required
                        class="select select-bordered w-full"
                        prop:value=move || student_id.get()
                        on:change=move |ev| student_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select a student"</option>
                        {student_options}
                    </select>
                </div>
                <div class="form-control">
                    <label for="member_role" class="label">
                        <span class="label-text">"Role"</span>
                    </label>
                    <select id="member_role"
                        class="select select-bordered w-full"
                        on:change=move |ev| role.set(MembershipRole::from_form_value(&event_target_value(&ev)))
                    >
                        <option value="GROUP_LEADER" selected=move || role.get() == MembershipRole::GroupLeader>
                            "Group Leader"
                        </option>
                        <option value="COMMON_MEMBER" selected=move || role.get() == MembershipRole::CommonMember>
                            "Common Member"
                        </option>
                    </select>
                </div>
                <ModalActions open=open busy=busy label="Add Student" busy_label="Adding..." />
            </form>
        </Modal>
    }
}
