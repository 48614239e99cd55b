//! 安排表单组件
//!
//! 小组选择、时间与可选地点。小组列表来自教师自己的 `myGroups`。

use classroom_shared::Group;
use leptos::prelude::*;

use super::form_state::FormState;

#[component]
pub fn ScheduleSection(state: FormState, groups: RwSignal<Option<Vec<Group>>>) -> impl IntoView {
    let group_options = move || {
        groups
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|g| view! { <option value=g.id>{g.name}</option> })
            .collect_view()
    };

    view! {
        <div class="form-control">
            <label for="activity_group" class="label">
                <span class="label-text">"Select Group"</span>
            </label>
            <select id="activity_group" required
                class="select select-bordered w-full"
                prop:value=move || state.group_id.get()
                on:change=move |ev| state.group_id.set(event_target_value(&ev))
            >
                <option value="">"Select a group"</option>
                {group_options}
            </select>
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="activity_scheduled_at" class="label">
                    <span class="label-text">"Date and Time"</span>
                </label>
                <input id="activity_scheduled_at" required
                    type="datetime-local"
                    on:input=move |ev| state.scheduled_at.set(event_target_value(&ev))
                    prop:value=move || state.scheduled_at.get()
                    class="input input-bordered w-full"
                />
            </div>
            <div class="form-control">
                <label for="activity_location" class="label">
                    <span class="label-text">"Location (Optional)"</span>
                </label>
                <input id="activity_location"
                    type="text"
                    on:input=move |ev| state.location.set(event_target_value(&ev))
                    prop:value=move || state.location.get()
                    class="input input-bordered w-full"
                />
            </div>
        </div>
    }
}
