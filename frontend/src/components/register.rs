use classroom_shared::UserRole;
use classroom_shared::protocol::{Register, RegisterInput};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::AppContext;
use crate::components::icons::GraduationCap;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 注册表单的字段
#[derive(Clone, Copy)]
struct RegisterForm {
    email: RwSignal<String>,
    password: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    role: RwSignal<UserRole>,
}

impl RegisterForm {
    fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            role: RwSignal::new(UserRole::Student),
        }
    }

    /// 必填项缺失时返回 None
    fn to_request(self) -> Option<Register> {
        let email = self.email.get().trim().to_string();
        let first_name = self.first_name.get().trim().to_string();
        let last_name = self.last_name.get().trim().to_string();
        let password = self.password.get();

        if email.is_empty() || password.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return None;
        }

        Some(Register {
            register_input: RegisterInput {
                email,
                password,
                first_name,
                last_name,
                role: self.role.get(),
            },
        })
    }
}

#[component]
pub fn RegisterPage(ctx: AppContext) -> impl IntoView {
    let form = RegisterForm::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(op) = form.to_request() else {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match ctx.api.mutate(&op).await {
                Ok(data) => ctx.auth.login(data.register),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create an account"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="first_name">
                                    <span class="label-text">"First Name"</span>
                                </label>
                                <input id="first_name" type="text" required
                                    class="input input-bordered w-full"
                                    on:input=move |ev| form.first_name.set(event_target_value(&ev))
                                    prop:value=move || form.first_name.get()
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="last_name">
                                    <span class="label-text">"Last Name"</span>
                                </label>
                                <input id="last_name" type="text" required
                                    class="input input-bordered w-full"
                                    on:input=move |ev| form.last_name.set(event_target_value(&ev))
                                    prop:value=move || form.last_name.get()
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="reg_email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input id="reg_email" type="email" required
                                class="input input-bordered"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=move || form.email.get()
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input id="reg_password" type="password" required
                                class="input input-bordered"
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                prop:value=move || form.password.get()
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_role">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select id="reg_role" class="select select-bordered"
                                on:change=move |ev| {
                                    let role = if event_target_value(&ev) == "TEACHER" {
                                        UserRole::Teacher
                                    } else {
                                        UserRole::Student
                                    };
                                    form.role.set(role);
                                }
                            >
                                <option value="STUDENT" selected=move || form.role.get() == UserRole::Student>"Student"</option>
                                <option value="TEACHER" selected=move || form.role.get() == UserRole::Teacher>"Teacher"</option>
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link router=ctx.router to=AppRoute::Login class="link link-primary">
                                "Sign in"
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
