//! 首页

use leptos::prelude::*;

use crate::components::icons::{Droplet, HeartPulse};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    // 已登录去表单页，未登录先去登录页（守卫会兜底）
    let on_request = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        let target = if session.state.get_untracked().is_present() {
            AppRoute::RequestForm
        } else {
            AppRoute::Login
        };
        router.navigate(target);
    };

    let on_join = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(AppRoute::Register);
    };

    view! {
        <div class="hero min-h-[70vh] bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <div class="flex justify-center mb-4">
                        <div class="p-4 bg-error/10 rounded-2xl text-error">
                            <Droplet attr:class="h-12 w-12" />
                        </div>
                    </div>
                    <h1 class="text-5xl font-bold">"Donate Blood, Save Lives"</h1>
                    <p class="py-6 text-base-content/70">
                        "Youth Blood connects patients who need blood with donors in their community. "
                        "Submit a request in minutes and track it until it is fulfilled."
                    </p>
                    <div class="flex justify-center gap-3">
                        <button class="btn btn-error text-white gap-2" on:click=on_request>
                            <HeartPulse attr:class="h-5 w-5" /> "Request Blood"
                        </button>
                        <button class="btn btn-outline" on:click=on_join>
                            "Become a Member"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
