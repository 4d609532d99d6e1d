//! 用户仪表盘
//!
//! 展示会话声明（姓名 / 邮箱 / 血型 / 角色）与快捷入口。

use leptos::prelude::*;

use crate::components::icons::{ClipboardList, HeartPulse, UserCircle};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    move || {
        let Some(user) = session.current() else {
            // 守卫会重定向，这里只需占位
            return ().into_any();
        };

        let go = move |target: AppRoute| {
            move |ev: leptos::web_sys::MouseEvent| {
                ev.prevent_default();
                router.navigate(target.clone());
            }
        };

        let blood_group = user
            .blood_group
            .map(|g| g.as_str().to_string())
            .unwrap_or_else(|| "—".to_string());
        let role_label = if user.role.is_admin() { "Admin" } else { "Member" };

        view! {
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-5xl mx-auto space-y-6">
                    <div>
                        <h1 class="text-3xl font-bold">"Hello, " {user.name.clone()}</h1>
                        <p class="text-base-content/70">{user.email.clone()}</p>
                    </div>

                    <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                        <div class="stat">
                            <div class="stat-figure text-error">
                                <HeartPulse attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Blood Group"</div>
                            <div class="stat-value text-error">{blood_group}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-figure text-primary">
                                <UserCircle attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Account"</div>
                            <div class="stat-value text-2xl">{role_label}</div>
                            <div class="stat-desc">{user.email.clone()}</div>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">
                                    <HeartPulse attr:class="h-5 w-5 text-error" /> "Need Blood?"
                                </h2>
                                <p>"Submit a new blood request with the patient's details."</p>
                                <div class="card-actions justify-end">
                                    <button class="btn btn-error text-white" on:click=go(AppRoute::RequestForm)>
                                        "New Request"
                                    </button>
                                </div>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">
                                    <ClipboardList attr:class="h-5 w-5 text-primary" /> "Your Requests"
                                </h2>
                                <p>"Review, track and manage the requests you have submitted."</p>
                                <div class="card-actions justify-end">
                                    <button class="btn btn-outline" on:click=go(AppRoute::RequestList)>
                                        "Manage Requests"
                                    </button>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        }
        .into_any()
    }
}
