use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::BloodApi;
use crate::components::icons::Droplet;
use crate::session::{login, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let api = BloodApi::from_storage();
            match login(session, &api, email.get_untracked(), password.get_untracked()).await {
                Ok(()) => {
                    router.navigate(AppRoute::auth_success_redirect());
                }
                Err(e) => {
                    // try_*: 跳转可能已卸载本页，过期完成静默丢弃
                    let _ = set_error_msg.try_set(Some(e.message));
                }
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    let on_register = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(AppRoute::Register);
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-error/10 rounded-2xl text-error">
                            <Droplet attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">
                            "Sign in to manage your blood requests"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="user@youthblood.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-error text-white" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <a class="link link-error" href="/register" on:click=on_register>
                                "Register here"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
