//! 学生活动页
//!
//! 两个标签页：可加入的活动（来自所在小组、仍开放且尚未加入）与已加入的活动。

use classroom_shared::activity::available_for;
use classroom_shared::notice::ErrorNotice;
use classroom_shared::protocol::{JoinActivity, MyActivitiesAsStudent, MyJoinedActivities};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::AppContext;
use crate::components::activity_card::ActivityCard;
use crate::components::error_banner::{ErrorBanner, raise_notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Available,
    Joined,
}

fn tab_class(active: bool) -> &'static str {
    if active { "tab tab-active" } else { "tab" }
}

#[component]
pub fn StudentActivities(ctx: AppContext) -> impl IntoView {
    let api = ctx.api;
    let user_id = ctx.auth.user_id_untracked();

    let activities = api.watch(MyActivitiesAsStudent::default(), |d| d.my_activities_as_student);
    let joined = api.watch(MyJoinedActivities::default(), |d| d.my_joined_activities);

    let tab = RwSignal::new(Tab::Available);
    let joining = RwSignal::new(false);
    let notice = RwSignal::new(ErrorNotice::new());

    let handle_join = move |activity_id: String| {
        joining.set(true);
        spawn_local(async move {
            // 成功后 Activities 与 JoinedActivities 两个主题都会重新查询
            if let Err(e) = api.mutate(&JoinActivity::new(activity_id)).await {
                raise_notice(notice, e.to_string());
            }
            joining.set(false);
        });
    };

    let available_view = move || {
        let list = activities.get().unwrap_or_default();
        let open = available_for(&list, &user_id)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        if open.is_empty() {
            return view! {
                <div class="text-center py-8 text-base-content/50">"No available activities found."</div>
            }
            .into_any();
        }

        view! {
            <div class="space-y-6">
                {open
                    .into_iter()
                    .map(|activity| {
                        let id = activity.id.clone();
                        view! {
                            <ActivityCard activity=activity show_teacher=true>
                                <button
                                    class="btn btn-primary btn-sm"
                                    disabled=move || joining.get()
                                    on:click=move |_| handle_join(id.clone())
                                >
                                    {move || if joining.get() { "Joining..." } else { "Join Activity" }}
                                </button>
                            </ActivityCard>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    let joined_view = move || {
        let list = joined.get().unwrap_or_default();
        if list.is_empty() {
            return view! {
                <div class="text-center py-8 text-base-content/50">"You haven't joined any activities yet."</div>
            }
            .into_any();
        }

        view! {
            <div class="space-y-6">
                {list
                    .into_iter()
                    .map(|activity| view! { <ActivityCard activity=activity show_teacher=true /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    let body = move || {
        if activities.is_initial_loading() || joined.is_initial_loading() {
            return view! { <div class="text-center py-8">"Loading activities..."</div> }.into_any();
        }
        if let Some(err) = activities.error.get() {
            return view! {
                <div class="text-center py-8 text-error">"Error loading activities: " {err}</div>
            }
            .into_any();
        }

        match tab.get() {
            Tab::Available => view! {
                <h3 class="text-lg font-medium mb-4">"Available Activities"</h3>
                {available_view.clone()}
            }
            .into_any(),
            Tab::Joined => view! {
                <h3 class="text-lg font-medium mb-4">"My Activities"</h3>
                {joined_view}
            }
            .into_any(),
        }
    };

    view! {
        <ErrorBanner notice=notice />
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">"Activities"</h2>
                <p class="text-base-content/70 text-sm">"View and join activities from your groups."</p>

                <div role="tablist" class="tabs tabs-bordered my-4">
                    <a role="tab" class=move || tab_class(tab.get() == Tab::Available)
                        on:click=move |_| tab.set(Tab::Available)>
                        "Available Activities"
                    </a>
                    <a role="tab" class=move || tab_class(tab.get() == Tab::Joined)
                        on:click=move |_| tab.set(Tab::Joined)>
                        "My Activities"
                    </a>
                </div>

                {body}
            </div>
        </div>
    }
}
