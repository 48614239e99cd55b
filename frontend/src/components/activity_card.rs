use classroom_shared::date::format_datetime;
use classroom_shared::{Activity, ActivityState};
use leptos::prelude::*;

use crate::components::icons::{CalendarIcon, MapPin};

/// 状态徽章的颜色
pub fn state_badge_class(state: ActivityState) -> &'static str {
    match state {
        ActivityState::New => "badge badge-info",
        ActivityState::InProgress => "badge badge-warning",
        ActivityState::Completed => "badge badge-success",
        ActivityState::Canceled => "badge badge-error",
    }
}

/// 活动卡片：标题、描述、状态 / 时间 / 小组 / 地点徽章，右侧放操作按钮
#[component]
pub fn ActivityCard(
    activity: Activity,
    /// 是否显示创建者
    #[prop(optional)]
    show_teacher: bool,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let teacher = activity
        .created_by
        .as_ref()
        .filter(|_| show_teacher)
        .map(|p| format!("Teacher: {}", p.full_name()));
    let location = activity.location().map(str::to_string);
    let scheduled = format_datetime(&activity.scheduled_at);

    view! {
        <div class="card bg-base-200 shadow">
            <div class="card-body flex-row justify-between items-start gap-4">
                <div class="space-y-2">
                    <h4 class="card-title text-lg">{activity.title}</h4>
                    <p class="text-sm text-base-content/70">{activity.description}</p>
                    <div class="flex flex-wrap gap-2">
                        <span class=state_badge_class(activity.state)>{activity.state.label()}</span>
                        <span class="badge badge-ghost gap-1">
                            <CalendarIcon attr:class="h-3 w-3" />
                            {scheduled}
                        </span>
                        <span class="badge badge-secondary badge-outline">{activity.group.name}</span>
                        {location.map(|l| view! {
                            <span class="badge badge-accent badge-outline gap-1">
                                <MapPin attr:class="h-3 w-3" />
                                {l}
                            </span>
                        })}
                    </div>
                    {teacher.map(|t| view! { <div class="text-xs text-base-content/60">{t}</div> })}
                </div>
                {children.map(|c| view! { <div class="flex-none">{c()}</div> })}
            </div>
        </div>
    }
}
