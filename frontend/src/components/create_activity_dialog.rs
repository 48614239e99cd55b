//! 创建活动对话框
//!
//! 采用组件化拆分：
//! - `form_state`: 表单状态与请求转换
//! - `details_form`: 标题与描述
//! - `schedule_section`: 小组、时间与地点

mod details_form;
mod form_state;
mod schedule_section;

use classroom_shared::Group;
use classroom_shared::notice::ErrorNotice;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiHandle;
use crate::components::error_banner::raise_notice;
use crate::components::icons::Plus;
use crate::components::modal::{Modal, ModalActions};

use details_form::DetailsForm;
use form_state::FormState;
use schedule_section::ScheduleSection;

#[component]
pub fn CreateActivityDialog(
    api: ApiHandle,
    groups: RwSignal<Option<Vec<Group>>>,
    notice: RwSignal<ErrorNotice>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let state = FormState::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let op = match state.draft().into_request() {
            Ok(op) => op,
            Err(e) => {
                raise_notice(notice, e.message());
                return;
            }
        };

        busy.set(true);
        spawn_local(async move {
            match api.mutate(&op).await {
                Ok(data) => {
                    tracing::info!(activity_id = %data.create_activity.id, "activity created");
                    open.set(false);
                    state.reset();
                }
                Err(e) => raise_notice(notice, e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Create Activity"
        </button>

        <Modal open=open title="Create Activity".to_string()>
            <form on:submit=on_submit class="space-y-4">
                <DetailsForm state=state />
                <ScheduleSection state=state groups=groups />
                <ModalActions open=open busy=busy label="Create Activity" busy_label="Creating..." />
            </form>
        </Modal>
    }
}
