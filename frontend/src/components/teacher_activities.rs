//! 教师活动页
//!
//! 创建活动，并按 `ActivityState::actions()` 提供状态迁移按钮。

use classroom_shared::activity::StateAction;
use classroom_shared::notice::ErrorNotice;
use classroom_shared::protocol::{MyActivitiesAsTeacher, MyGroups, UpdateActivityState};
use classroom_shared::{Activity, Person};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::AppContext;
use crate::components::activity_card::ActivityCard;
use crate::components::create_activity_dialog::CreateActivityDialog;
use crate::components::error_banner::{ErrorBanner, raise_notice};

fn action_class(action: StateAction) -> &'static str {
    match action {
        StateAction::Start => "btn btn-warning btn-sm",
        StateAction::Complete => "btn btn-success btn-sm",
        StateAction::Cancel => "btn btn-error btn-sm",
    }
}

#[component]
pub fn TeacherActivities(ctx: AppContext) -> impl IntoView {
    let api = ctx.api;

    let activities = api.watch(MyActivitiesAsTeacher::default(), |d| d.my_activities_as_teacher);
    let groups = api.watch(MyGroups::default(), |d| d.my_groups);
    let notice = RwSignal::new(ErrorNotice::new());

    let handle_action = move |activity: Activity, action: StateAction| {
        // 本地先校验迁移，非法迁移不会发出请求
        let op = match UpdateActivityState::from_action(activity.id.clone(), activity.state, action) {
            Ok(op) => op,
            Err(e) => {
                raise_notice(notice, e.to_string());
                return;
            }
        };
        spawn_local(async move {
            if let Err(e) = api.mutate(&op).await {
                raise_notice(notice, e.to_string());
            }
        });
    };

    let body = move || {
        if activities.is_initial_loading() {
            return view! { <div class="text-center py-8">"Loading your activities..."</div> }.into_any();
        }
        if let Some(err) = activities.error.get() {
            return view! {
                <div class="text-center py-8 text-error">"Error loading your activities: " {err}</div>
            }
            .into_any();
        }

        let list = activities.get().unwrap_or_default();
        if list.is_empty() {
            return view! {
                <div class="text-center py-8 text-base-content/50">
                    "You haven't created any activities yet. Click \"Create Activity\" to get started."
                </div>
            }
            .into_any();
        }

        view! {
            <div class="p-6 space-y-6">
                <h3 class="text-lg font-medium">"Your Activities"</h3>
                {list
                    .into_iter()
                    .map(|activity| {
                        let attendees = activity.attendees.clone();
                        let buttons = activity
                            .state
                            .actions()
                            .iter()
                            .map(|&action| {
                                let target = activity.clone();
                                view! {
                                    <button
                                        class=action_class(action)
                                        on:click=move |_| handle_action(target.clone(), action)
                                    >
                                        {action.label()}
                                    </button>
                                }
                            })
                            .collect_view();

                        view! {
                            <div class="space-y-2">
                                <ActivityCard activity=activity>
                                    <div class="flex gap-2">{buttons}</div>
                                </ActivityCard>
                                <AttendeeList attendees=attendees />
                            </div>
                        }
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
                        <h2 class="card-title text-2xl">"Activities"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Create and manage activities for your student groups."
                        </p>
                    </div>
                    <CreateActivityDialog api=api groups=groups.data notice=notice />
                </div>
                {body}
            </div>
        </div>
    }
}

#[component]
fn AttendeeList(attendees: Vec<Person>) -> impl IntoView {
    let content = if attendees.is_empty() {
        view! { <p class="text-sm text-base-content/50">"No attendees yet."</p> }.into_any()
    } else {
        view! {
            <ul class="grid grid-cols-1 gap-2 sm:grid-cols-2 lg:grid-cols-3">
                {attendees
                    .into_iter()
                    .map(|a| view! {
                        <li class="px-4 py-2 bg-base-100 shadow rounded-md text-sm font-medium">
                            {a.full_name()}
                        </li>
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="px-4">
            <h5 class="font-medium mb-2">"Attendees"</h5>
            {content}
        </div>
    }
}
