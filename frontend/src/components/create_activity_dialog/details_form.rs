//! 基础信息表单组件
//!
//! 活动标题与描述。

use leptos::prelude::*;

use super::form_state::FormState;

#[component]
pub fn DetailsForm(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="activity_title" class="label">
                <span class="label-text">"Activity Title"</span>
            </label>
            <input id="activity_title" required
                type="text"
                on:input=move |ev| state.title.set(event_target_value(&ev))
                prop:value=move || state.title.get()
                class="input input-bordered w-full"
            />
        </div>

        <div class="form-control">
            <label for="activity_description" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea id="activity_description" required rows="3"
                on:input=move |ev| state.description.set(event_target_value(&ev))
                prop:value=move || state.description.get()
                class="textarea textarea-bordered w-full"
            ></textarea>
        </div>
    }
}
