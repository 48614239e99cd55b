use leptos::prelude::*;

use crate::AppContext;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn NotFoundPage(ctx: AppContext) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-4xl font-bold text-error">"404 - Page Not Found"</h1>
                <p class="text-base-content/70">"The page you are looking for does not exist."</p>
                <Link router=ctx.router to=AppRoute::Dashboard class="link link-primary">
                    "Return to Dashboard"
                </Link>
            </div>
        </div>
    }
}
