//! 血液请求提交表单
//!
//! 提交体的 requester 字段取自当前会话；提交成功后清空表单并
//! 跳转到列表页，失败时保留输入并展示错误。

mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;

use youthblood_shared::{BloodGroup, Session, Urgency, MAX_REQUIRED_UNITS, MIN_REQUIRED_UNITS};

use crate::api::BloodApi;
use crate::components::icons::HeartPulse;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use self::form_state::FormState;

#[component]
pub fn RequestFormPage() -> impl IntoView {
    let session = use_session();

    // 路由守卫之外的第二道闸：没有会话就不渲染表单
    move || match session.current() {
        Some(user) => view! { <RequestFormInner user=user /> }.into_any(),
        None => view! {
            <div class="hero min-h-[60vh] bg-base-200">
                <div class="hero-content text-center">
                    <p class="text-base-content/70">"Please sign in to submit a blood request."</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn RequestFormInner(user: Session) -> impl IntoView {
    let router = use_router();

    let form = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let payload = match form.to_payload(&user) {
            Ok(payload) => payload,
            Err(message) => {
                set_error_msg.set(Some(message));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let api = BloodApi::from_storage();
            match api.create_request(&payload).await {
                Ok(_created) => {
                    form.reset();
                    router.navigate(AppRoute::RequestList);
                }
                Err(e) => {
                    // 输入保留，用户修正后可直接重交
                    let _ = set_error_msg.try_set(Some(e.message));
                }
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto">
                <div class="text-center mb-6">
                    <div class="flex justify-center mb-2">
                        <div class="p-3 bg-error/10 rounded-2xl text-error">
                            <HeartPulse attr:class="h-8 w-8" />
                        </div>
                    </div>
                    <h1 class="text-3xl font-bold">"Request Blood"</h1>
                    <p class="text-base-content/70">
                        "Fill in the patient's details. Fields marked * are required."
                    </p>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body gap-4" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="patient-name">
                                    <span class="label-text">"Patient Name *"</span>
                                </label>
                                <input
                                    id="patient-name"
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| form.patient_name.set(event_target_value(&ev))
                                    prop:value=form.patient_name
                                    required
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="blood-group">
                                    <span class="label-text">"Blood Group *"</span>
                                </label>
                                <select
                                    id="blood-group"
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        form.blood_group.set(BloodGroup::parse(&event_target_value(&ev)))
                                    }
                                    required
                                >
                                    <option value="" selected=move || form.blood_group.get().is_none()>
                                        "Select blood group"
                                    </option>
                                    {BloodGroup::ALL
                                        .iter()
                                        .map(|g| {
                                            let g = *g;
                                            view! {
                                                <option
                                                    value=g.as_str()
                                                    selected=move || form.blood_group.get() == Some(g)
                                                >
                                                    {g.as_str()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="form-control">
                                <label class="label" for="required-units">
                                    <span class="label-text">"Units Needed (1-10) *"</span>
                                </label>
                                <input
                                    id="required-units"
                                    type="number"
                                    min=MIN_REQUIRED_UNITS.to_string()
                                    max=MAX_REQUIRED_UNITS.to_string()
                                    class="input input-bordered"
                                    on:input=move |ev| {
                                        let parsed = event_target_value(&ev).parse::<u32>().unwrap_or(1);
                                        form.required_units.set(parsed);
                                    }
                                    prop:value=move || form.required_units.get().to_string()
                                    required
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="urgency">
                                    <span class="label-text">"Urgency *"</span>
                                </label>
                                <select
                                    id="urgency"
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        if let Some(u) = Urgency::parse(&event_target_value(&ev)) {
                                            form.urgency.set(u);
                                        }
                                    }
                                >
                                    {Urgency::ALL
                                        .iter()
                                        .map(|u| {
                                            let u = *u;
                                            view! {
                                                <option
                                                    value=u.as_str()
                                                    selected=move || form.urgency.get() == u
                                                >
                                                    {u.as_str()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="form-control">
                                <label class="label" for="mobile-number">
                                    <span class="label-text">"Mobile Number *"</span>
                                </label>
                                <input
                                    id="mobile-number"
                                    type="tel"
                                    class="input input-bordered"
                                    on:input=move |ev| form.mobile_number.set(event_target_value(&ev))
                                    prop:value=form.mobile_number
                                    required
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="needed-date">
                                    <span class="label-text">"Needed Date *"</span>
                                </label>
                                <input
                                    id="needed-date"
                                    type="date"
                                    class="input input-bordered"
                                    on:input=move |ev| form.needed_date.set(event_target_value(&ev))
                                    prop:value=form.needed_date
                                    required
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="hospital-name">
                                    <span class="label-text">"Hospital Name *"</span>
                                </label>
                                <input
                                    id="hospital-name"
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| form.hospital_name.set(event_target_value(&ev))
                                    prop:value=form.hospital_name
                                    required
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="location">
                                    <span class="label-text">"Location *"</span>
                                </label>
                                <input
                                    id="location"
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| form.location.set(event_target_value(&ev))
                                    prop:value=form.location
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="sick-details">
                                <span class="label-text">"Patient Condition *"</span>
                            </label>
                            <textarea
                                id="sick-details"
                                class="textarea textarea-bordered"
                                rows="3"
                                on:input=move |ev| form.sick_details.set(event_target_value(&ev))
                                prop:value=form.sick_details
                                required
                            ></textarea>
                        </div>

                        <div class="form-control">
                            <label class="label" for="additional-info">
                                <span class="label-text">"Additional Info"</span>
                            </label>
                            <textarea
                                id="additional-info"
                                class="textarea textarea-bordered"
                                rows="2"
                                on:input=move |ev| form.additional_info.set(event_target_value(&ev))
                                prop:value=form.additional_info
                            ></textarea>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-error text-white" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                                } else {
                                    "Submit Request".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
