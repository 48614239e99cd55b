use leptos::prelude::*;

/// 原生 `<dialog>` 模态框
///
/// `open` 信号驱动 `show_modal` / `close`，ESC 或点击背景关闭时回写信号。
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg mb-4">{move || title.get()}</h3>
                {children()}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// 表单底部的取消 / 提交按钮
#[component]
pub fn ModalActions(
    open: RwSignal<bool>,
    busy: RwSignal<bool>,
    label: &'static str,
    busy_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="modal-action">
            <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
            <button type="submit" disabled=move || busy.get() class="btn btn-primary">
                {move || if busy.get() {
                    view! { <span class="loading loading-spinner"></span> {busy_label} }.into_any()
                } else {
                    label.into_any()
                }}
            </button>
        </div>
    }
}

/// 浏览器原生确认框；调用失败视为取消
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
