//! 变更错误横幅
//!
//! 显示 [`ErrorNotice`] 中的消息，5 秒后或用户点击关闭时消失。

use classroom_shared::notice::{ERROR_NOTICE_TTL, ErrorNotice};
use leptos::prelude::*;

use crate::components::icons::{AlertCircle, XIcon};

/// 显示一条错误并启动自己的过期定时器
pub fn raise_notice(notice: RwSignal<ErrorNotice>, message: impl Into<String>) {
    let mut generation = 0;
    notice.update(|n| generation = n.raise(message));
    set_timeout(
        move || {
            notice.update(|n| {
                n.expire(generation);
            })
        },
        ERROR_NOTICE_TTL,
    );
}

#[component]
pub fn ErrorBanner(notice: RwSignal<ErrorNotice>) -> impl IntoView {
    let message = move || notice.with(|n| n.message().map(str::to_string));

    view! {
        <Show when=move || notice.with(|n| n.is_visible())>
            <div role="alert" class="alert alert-error shadow-lg mb-4">
                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                <span>{move || message().unwrap_or_default()}</span>
                <button
                    class="btn btn-ghost btn-sm btn-circle"
                    aria-label="Dismiss"
                    on:click=move |_| notice.update(|n| n.dismiss())
                >
                    <XIcon attr:class="h-4 w-4" />
                </button>
            </div>
        </Show>
    }
}
