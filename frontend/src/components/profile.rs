//! 个人资料页
//!
//! 挂载时用 `me` 刷新缓存用户的服务端字段；姓名编辑只更新本地会话（后端没有资料变更接口），
//! 刷新时不会被覆盖。

use classroom_shared::UserRole;
use classroom_shared::date::format_date;
use classroom_shared::protocol::Me;
use leptos::prelude::*;

use crate::AppContext;

/// 角色徽章颜色
pub fn role_badge_class(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "badge badge-secondary",
        UserRole::Teacher => "badge badge-success",
        UserRole::Student => "badge badge-info",
    }
}

#[component]
pub fn ProfilePage(ctx: AppContext) -> impl IntoView {
    let auth = ctx.auth;

    let me = ctx.api.watch(Me::default(), |d| d.me);
    Effect::new(move |_| {
        let Some(fresh) = me.get() else { return };
        let Some(cached) = auth.user_untracked() else { return };
        // 本地编辑的姓名保留，其余字段以服务端为准
        let merged = cached.refreshed_from(fresh);
        if merged != cached {
            auth.update_user(merged);
        }
    });

    let editing = RwSignal::new(false);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());

    let toggle_edit = move |_| {
        // 进入或取消编辑都从当前用户重新填充
        if let Some(user) = auth.user_untracked() {
            first_name.set(user.first_name);
            last_name.set(user.last_name);
        }
        editing.update(|e| *e = !*e);
    };

    let save = move |_| {
        if let Some(mut user) = auth.user_untracked() {
            user.first_name = first_name.get_untracked();
            user.last_name = last_name.get_untracked();
            auth.update_user(user);
        }
        editing.set(false);
    };

    let full_name = move || auth.user().map(|u| u.full_name()).unwrap_or_default();
    let email = move || auth.user().map(|u| u.email).unwrap_or_default();
    let role = move || auth.user().map(|u| u.role);
    let created = move || {
        auth.user()
            .and_then(|u| u.created_at)
            .map(|c| format_date(&c))
            .unwrap_or_default()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <div>
                        <h2 class="card-title text-2xl">"Profile"</h2>
                        <p class="text-base-content/70 text-sm">"Your personal information and account details."</p>
                    </div>
                    <button class="btn btn-primary" on:click=toggle_edit>
                        {move || if editing.get() { "Cancel" } else { "Edit Profile" }}
                    </button>
                </div>

                <Show when=move || me.error.get().is_some()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        {move || me.error.get().unwrap_or_default()}
                    </div>
                </Show>

                <dl class="divide-y divide-base-300 mt-4">
                    <div class="py-4 grid grid-cols-3 gap-4">
                        <dt class="text-sm font-medium text-base-content/60">"Full name"</dt>
                        <dd class="col-span-2 text-sm">
                            <Show when=move || editing.get() fallback=full_name>
                                <div class="flex gap-2">
                                    <input type="text" placeholder="First Name"
                                        class="input input-bordered input-sm w-full"
                                        on:input=move |ev| first_name.set(event_target_value(&ev))
                                        prop:value=move || first_name.get()
                                    />
                                    <input type="text" placeholder="Last Name"
                                        class="input input-bordered input-sm w-full"
                                        on:input=move |ev| last_name.set(event_target_value(&ev))
                                        prop:value=move || last_name.get()
                                    />
                                </div>
                            </Show>
                        </dd>
                    </div>
                    <div class="py-4 grid grid-cols-3 gap-4">
                        <dt class="text-sm font-medium text-base-content/60">"Email address"</dt>
                        <dd class="col-span-2 text-sm">{email}</dd>
                    </div>
                    <div class="py-4 grid grid-cols-3 gap-4">
                        <dt class="text-sm font-medium text-base-content/60">"Role"</dt>
                        <dd class="col-span-2 text-sm">
                            {move || role().map(|r| view! { <span class=role_badge_class(r)>{r.as_str()}</span> })}
                        </dd>
                    </div>
                    <div class="py-4 grid grid-cols-3 gap-4">
                        <dt class="text-sm font-medium text-base-content/60">"Account created"</dt>
                        <dd class="col-span-2 text-sm">{created}</dd>
                    </div>
                </dl>

                <Show when=move || editing.get()>
                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" on:click=save>"Save"</button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
