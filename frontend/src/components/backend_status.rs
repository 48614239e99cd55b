use classroom_shared::client::ConnectionStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiHandle;

/// 后端连通性提示，挂载时探测一次，仅作提示
#[component]
pub fn BackendStatus(api: ApiHandle) -> impl IntoView {
    let status = RwSignal::new(ConnectionStatus::Checking);

    spawn_local(async move {
        status.set(api.probe().await);
    });

    move || match status.get() {
        ConnectionStatus::Checking => view! {
            <div class="toast toast-bottom toast-start z-50">
                <div class="alert alert-warning text-sm py-2">
                    <span class="loading loading-spinner loading-xs"></span>
                    "Checking backend connection..."
                </div>
            </div>
        }
        .into_any(),
        ConnectionStatus::Error => view! {
            <div class="toast toast-bottom toast-start z-50">
                <div class="alert alert-error text-sm py-2">
                    "Backend connection failed. Make sure the backend service is running."
                </div>
            </div>
        }
        .into_any(),
        ConnectionStatus::Connected => view! { <></> }.into_any(),
    }
}
