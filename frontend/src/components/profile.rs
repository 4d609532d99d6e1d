//! 个人资料
//!
//! 姓名与血型可在本地会话快照中更新，邮箱是所有权判定的锚点，
//! 保持只读。

use leptos::prelude::*;

use youthblood_shared::{BloodGroup, Session};

use crate::components::icons::UserCircle;
use crate::session::{update_profile, use_session};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();

    move || match session.current() {
        Some(user) => view! { <ProfileInner user=user /> }.into_any(),
        None => ().into_any(),
    }
}

#[component]
fn ProfileInner(user: Session) -> impl IntoView {
    let session = use_session();

    let (name, set_name) = signal(user.name.clone());
    let (blood_group, set_blood_group) = signal(user.blood_group);
    let (saved, set_saved) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let trimmed = name.get().trim().to_string();
        if trimmed.is_empty() {
            set_error_msg.set(Some("Name cannot be empty".to_string()));
            return;
        }
        set_error_msg.set(None);

        let updated = Session {
            name: trimmed,
            blood_group: blood_group.get(),
            ..user.clone()
        };
        update_profile(session, updated);
        set_saved.set(true);
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-md mx-auto">
                <div class="text-center mb-6">
                    <div class="flex justify-center mb-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserCircle attr:class="h-8 w-8" />
                        </div>
                    </div>
                    <h1 class="text-3xl font-bold">"My Profile"</h1>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body gap-4" on:submit=on_submit>
                        <Show when=move || saved.get()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>"Profile updated"</span>
                            </div>
                        </Show>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="profile-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="profile-email"
                                type="email"
                                class="input input-bordered"
                                prop:value=session
                                    .current()
                                    .map(|u| u.email)
                                    .unwrap_or_default()
                                disabled
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="profile-name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="profile-name"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| {
                                    set_saved.set(false);
                                    set_name.set(event_target_value(&ev));
                                }
                                prop:value=name
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="profile-blood-group">
                                <span class="label-text">"Blood Group"</span>
                            </label>
                            <select
                                id="profile-blood-group"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    set_saved.set(false);
                                    set_blood_group.set(BloodGroup::parse(&event_target_value(&ev)));
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

                        <div class="form-control mt-4">
                            <button class="btn btn-primary">"Save Changes"</button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
