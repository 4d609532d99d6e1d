use leptos::prelude::*;
use leptos::task::spawn_local;

use youthblood_shared::BloodGroup;
use youthblood_shared::protocol::RegisterRequest;

use crate::api::BloodApi;
use crate::components::icons::HeartPulse;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (blood_group, set_blood_group) = signal(Option::<BloodGroup>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().trim().is_empty() || email.get().trim().is_empty() || password.get().is_empty()
        {
            set_error_msg.set(Some("Please fill in all required fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let api = BloodApi::from_storage();
            let payload = RegisterRequest {
                name: name.get_untracked().trim().to_string(),
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
                blood_group: blood_group.get_untracked(),
            };
            match api.register(&payload).await {
                Ok(()) => {
                    // 注册成功后去登录页走正常登录流程
                    router.navigate(AppRoute::Login);
                }
                Err(e) => {
                    // try_*: 跳转可能已卸载本页，过期完成静默丢弃
                    let _ = set_error_msg.try_set(Some(e.message));
                }
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    let on_login = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(AppRoute::Login);
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-error/10 rounded-2xl text-error">
                            <HeartPulse attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Join Youth Blood"</h1>
                        <p class="text-base-content/70">
                            "Create an account to request and donate blood"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="Jane Doe"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-blood-group">
                                <span class="label-text">"Blood Group (optional)"</span>
                            </label>
                            <select
                                id="reg-blood-group"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    set_blood_group.set(BloodGroup::parse(&event_target_value(&ev)))
                                }
                            >
                                <option value="" selected=move || blood_group.get().is_none()>
                                    "Prefer not to say"
                                </option>
                                {BloodGroup::ALL
                                    .iter()
                                    .map(|g| {
                                        let g = *g;
                                        view! {
                                            <option
                                                value=g.as_str()
                                                selected=move || blood_group.get() == Some(g)
                                            >
                                                {g.as_str()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-error text-white" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already a member? "
                            <a class="link link-error" href="/login" on:click=on_login>
                                "Sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
