use classroom_shared::Group;
use classroom_shared::protocol::MyStudentGroups;
use leptos::prelude::*;

use crate::AppContext;
use crate::components::icons::UsersIcon;

#[component]
pub fn StudentDashboard(ctx: AppContext) -> impl IntoView {
    let auth = ctx.auth;
    let groups = ctx
        .api
        .watch(MyStudentGroups::default(), |d| d.my_student_groups);

    let user_id = auth.user_id_untracked();
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
                    "You are not a member of any groups yet."
                </div>
            }
            .into_any();
        }

        let user_id = user_id.clone();
        view! {
            <div class="p-6">
                <h3 class="text-lg font-medium mb-4">"Your Groups"</h3>
                <div class="grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-3">
                    {list
                        .into_iter()
                        .map(|group| view! { <StudentGroupCard group=group user_id=user_id.clone() /> })
                        .collect_view()}
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h2 class="card-title text-2xl">"Student Dashboard"</h2>
                    <p class="text-base-content/70 text-sm">
                        "Welcome back, " {first_name} "! Here are your groups."
                    </p>
                </div>
                {body}
            </div>
        </div>
    }
}

#[component]
fn StudentGroupCard(group: Group, user_id: String) -> impl IntoView {
    let teacher = group
        .owner
        .as_ref()
        .map(|o| o.full_name())
        .unwrap_or_default();
    let role = group.role_label_for(&user_id);
    let description = group.description_or_default().to_string();

    view! {
        <div class="card bg-base-100 border border-base-300 shadow">
            <div class="card-body">
                <h4 class="card-title text-lg">
                    <UsersIcon attr:class="h-5 w-5 opacity-50" />
                    {group.name}
                </h4>
                <p class="text-sm text-base-content/70">{description}</p>
                <div class="mt-2">
                    <p class="text-sm font-medium text-base-content/60">"Teacher"</p>
                    <p class="text-sm">{teacher}</p>
                </div>
                <div class="mt-2">
                    <p class="text-sm font-medium text-base-content/60">"Your Role"</p>
                    <p class="text-sm">{role}</p>
                </div>
            </div>
        </div>
    }
}
