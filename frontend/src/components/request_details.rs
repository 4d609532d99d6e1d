//! 单条血液请求详情

use leptos::prelude::*;
use leptos::task::spawn_local;

use youthblood_shared::BloodRequest;
use youthblood_shared::error::ApiResult;

use crate::api::BloodApi;
use crate::components::icons::ArrowLeft;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between gap-4 py-2 border-b border-base-200 last:border-0">
            <span class="text-base-content/60">{label}</span>
            <span class="font-medium text-right">{value}</span>
        </div>
    }
}

#[component]
pub fn RequestDetailsPage(id: String) -> impl IntoView {
    let router = use_router();

    let (result, set_result) = signal(Option::<ApiResult<BloodRequest>>::None);

    {
        let id = id.clone();
        Effect::new(move |_| {
            let id = id.clone();
            spawn_local(async move {
                let api = BloodApi::from_storage();
                let fetched = api.get_request(&id).await;
                let _ = set_result.try_set(Some(fetched));
            });
        });
    }

    let on_back = move |_| router.navigate(AppRoute::RequestList);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-4">
                <button class="btn btn-ghost gap-2" on:click=on_back>
                    <ArrowLeft attr:class="h-4 w-4" /> "Back to requests"
                </button>

                {move || match result.get() {
                    None => view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-error"></span>
                        </div>
                    }
                    .into_any(),
                    Some(Err(e)) => {
                        let message = if e.is_not_found() {
                            "This blood request no longer exists.".to_string()
                        } else {
                            e.to_string()
                        };
                        view! {
                            <div role="alert" class="alert alert-error">
                                <span>{message}</span>
                            </div>
                        }
                        .into_any()
                    }
                    Some(Ok(request)) => view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex items-center justify-between">
                                    <h1 class="card-title text-2xl">{request.patient_name.clone()}</h1>
                                    <span class="badge badge-error badge-lg text-white font-bold">
                                        {request.blood_group.as_str()}
                                    </span>
                                </div>
                                <div class="mt-4">
                                    {detail_row("Units needed", request.required_units.to_string())}
                                    {detail_row("Urgency", request.urgency.as_str().to_string())}
                                    {detail_row("Status", request.status.to_string())}
                                    {detail_row("Hospital", request.hospital_name.clone())}
                                    {detail_row("Location", request.location.clone())}
                                    {detail_row("Contact", request.mobile_number.clone())}
                                    {detail_row(
                                        "Needed by",
                                        request.needed_date.format("%Y-%m-%d").to_string(),
                                    )}
                                    {detail_row("Condition", request.sick_details.clone())}
                                    {request
                                        .additional_info
                                        .clone()
                                        .map(|info| detail_row("Additional info", info))}
                                    {request
                                        .requested_by
                                        .clone()
                                        .map(|by| detail_row("Requested by", by))}
                                </div>
                            </div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
