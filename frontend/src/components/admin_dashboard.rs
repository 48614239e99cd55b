//! 管理员面板
//!
//! 只读总览：全部用户与全部小组。

use classroom_shared::date::format_date;
use classroom_shared::protocol::{Groups, Users};
use classroom_shared::{Group, User};
use leptos::prelude::*;

use crate::AppContext;
use crate::components::profile::role_badge_class;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Users,
    Groups,
}

fn tab_class(active: bool) -> &'static str {
    if active { "tab tab-active" } else { "tab" }
}

#[component]
pub fn AdminDashboard(ctx: AppContext) -> impl IntoView {
    let auth = ctx.auth;
    let users = ctx.api.watch(Users::default(), |d| d.users);
    let groups = ctx.api.watch(Groups::default(), |d| d.groups);
    let tab = RwSignal::new(Tab::Users);

    let first_name = move || auth.user().map(|u| u.first_name).unwrap_or_default();

    let users_tab = move || {
        if users.is_initial_loading() {
            return view! { <div class="text-center py-8">"Loading users..."</div> }.into_any();
        }
        if let Some(err) = users.error.get() {
            return view! { <div class="text-center py-8 text-error">"Error loading users: " {err}</div> }
                .into_any();
        }
        view! { <UsersTable users=users.get().unwrap_or_default() /> }.into_any()
    };

    let groups_tab = move || {
        if groups.is_initial_loading() {
            return view! { <div class="text-center py-8">"Loading groups..."</div> }.into_any();
        }
        if let Some(err) = groups.error.get() {
            return view! { <div class="text-center py-8 text-error">"Error loading groups: " {err}</div> }
                .into_any();
        }
        view! { <GroupsGrid groups=groups.get().unwrap_or_default() /> }.into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">"Admin Dashboard"</h2>
                <p class="text-base-content/70 text-sm">
                    "Welcome, " {first_name} "! You have full administrative access."
                </p>

                <div role="tablist" class="tabs tabs-bordered my-4">
                    <a role="tab" class=move || tab_class(tab.get() == Tab::Users)
                        on:click=move |_| tab.set(Tab::Users)>
                        "Users"
                    </a>
                    <a role="tab" class=move || tab_class(tab.get() == Tab::Groups)
                        on:click=move |_| tab.set(Tab::Groups)>
                        "Groups"
                    </a>
                </div>

                {move || match tab.get() {
                    Tab::Users => users_tab(),
                    Tab::Groups => groups_tab(),
                }}
            </div>
        </div>
    }
}

#[component]
fn UsersTable(users: Vec<User>) -> impl IntoView {
    view! {
        <h3 class="text-lg font-medium mb-4">"All Users"</h3>
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Registered"</th>
                    </tr>
                </thead>
                <tbody>
                    {users
                        .into_iter()
                        .map(|user| {
                            let registered = user.created_at.as_deref().map(format_date).unwrap_or_default();
                            view! {
                                <tr>
                                    <td class="font-medium">{user.full_name()}</td>
                                    <td class="text-base-content/70">{user.email}</td>
                                    <td><span class=role_badge_class(user.role)>{user.role.as_str()}</span></td>
                                    <td class="text-base-content/70">{registered}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn GroupsGrid(groups: Vec<Group>) -> impl IntoView {
    if groups.is_empty() {
        return view! {
            <h3 class="text-lg font-medium mb-4">"All Groups"</h3>
            <p class="text-base-content/50 text-center">"No groups have been created yet."</p>
        }
        .into_any();
    }

    view! {
        <h3 class="text-lg font-medium mb-4">"All Groups"</h3>
        <div class="grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-3">
            {groups.into_iter().map(|group| view! { <AdminGroupCard group=group /> }).collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn AdminGroupCard(group: Group) -> impl IntoView {
    let description = group.description_or_default().to_string();
    let owner = group.owner.as_ref().map(|o| o.full_name()).unwrap_or_default();
    let created = group.created_at.as_deref().map(format_date).unwrap_or_default();
    let member_count = group.members.len();

    let members = if group.members.is_empty() {
        view! { <p class="text-sm text-base-content/50">"No members"</p> }.into_any()
    } else {
        view! {
            <ul class="space-y-1">
                {group
                    .members
                    .into_iter()
                    .map(|m| view! {
                        <li class="text-sm">
                            {m.user.full_name()}
                            <span class="text-xs ml-1 text-primary">"(" {m.role.short_label()} ")"</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-200 shadow">
            <div class="card-body">
                <h4 class="card-title text-lg">{group.name}</h4>
                <p class="text-sm text-base-content/70">{description}</p>
                <div class="mt-2">
                    <p class="text-sm font-medium text-base-content/60">"Owner"</p>
                    <p class="text-sm">{owner}</p>
                </div>
                <div class="mt-2">
                    <p class="text-sm font-medium text-base-content/60">"Created"</p>
                    <p class="text-sm">{created}</p>
                </div>
                <div class="mt-2">
                    <p class="text-sm font-medium text-base-content/60">"Members (" {member_count} ")"</p>
                    {members}
                </div>
            </div>
        </div>
    }
}
