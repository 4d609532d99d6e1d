//! 顶部导航栏
//!
//! 全站唯一的一条导航栏，链接集合随会话状态与角色变化。

use leptos::prelude::*;

use crate::components::icons::{Droplet, LogOut};
use crate::session::{SessionState, logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 生成走路由服务的导航链接（阻止浏览器整页跳转）
fn nav_link(label: &'static str, target: AppRoute) -> impl IntoView {
    let router = use_router();
    let href = target.to_path();
    view! {
        <li>
            <a
                href=href
                on:click=move |ev: leptos::web_sys::MouseEvent| {
                    ev.prevent_default();
                    router.navigate(target.clone());
                }
            >
                {label}
            </a>
        </li>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let on_logout = move |_| {
        logout(session);
        router.navigate(AppRoute::Home);
    };

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1 gap-2">
                <Droplet attr:class="h-6 w-6 text-error" />
                <a
                    class="btn btn-ghost text-xl"
                    href="/"
                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate(AppRoute::Home);
                    }
                >
                    "Youth Blood"
                </a>
            </div>
            <div class="flex-none">
                {move || match session.state.get() {
                    SessionState::Present(user) => {
                        let is_admin = user.role.is_admin();
                        view! {
                        <ul class="menu menu-horizontal items-center px-1 gap-1">
                            {nav_link("Dashboard", AppRoute::Dashboard)}
                            {nav_link("Request Blood", AppRoute::RequestForm)}
                            {nav_link("My Requests", AppRoute::RequestList)}
                            {nav_link("Profile", AppRoute::Profile)}
                            <Show when=move || is_admin>
                                {nav_link("Admin", AppRoute::Admin)}
                            </Show>
                            <li>
                                <button class="btn btn-sm btn-outline btn-error gap-1" on:click=on_logout>
                                    <LogOut attr:class="h-4 w-4" /> "Sign Out"
                                </button>
                            </li>
                        </ul>
                        }
                        .into_any()
                    }
                    _ => view! {
                        <ul class="menu menu-horizontal items-center px-1 gap-1">
                            {nav_link("Sign In", AppRoute::Login)}
                            <li>
                                <a
                                    class="btn btn-sm btn-error text-white"
                                    href="/register"
                                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate(AppRoute::Register);
                                    }
                                >
                                    "Join Us"
                                </a>
                            </li>
                        </ul>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
