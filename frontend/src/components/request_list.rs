//! 血液请求列表
//!
//! 挂载时拉取全量集合，按可见性规则过滤后渲染。截断 / 展开全部
//! 在客户端完成，删除成功只改本地状态不重拉。

use leptos::prelude::*;
use leptos::task::spawn_local;

use youthblood_shared::policy::{can_delete, visible_requests};
use youthblood_shared::{BloodRequest, RequestStatus, Session, Urgency};

use crate::api::BloodApi;
use crate::components::icons::{AlertTriangle, Trash};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 初始可见条数，超过后出现 Show All
pub const INITIAL_VISIBLE: usize = 6;

/// 当前应渲染的条数：展开时全量，收起时截断到初始页
fn visible_slice_len(total: usize, show_all: bool) -> usize {
    if show_all { total } else { total.min(INITIAL_VISIBLE) }
}

fn urgency_badge(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Normal => "badge badge-ghost",
        Urgency::Urgent => "badge badge-warning",
        Urgency::Emergency => "badge badge-error text-white",
    }
}

fn status_badge(status: &RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "badge badge-info badge-outline",
        RequestStatus::Completed => "badge badge-success badge-outline",
        RequestStatus::Cancelled => "badge badge-neutral badge-outline",
        RequestStatus::Other(_) => "badge badge-ghost badge-outline",
    }
}

#[component]
pub fn RequestListPage() -> impl IntoView {
    let session = use_session();

    move || match session.current() {
        Some(user) => view! { <RequestListInner user=user /> }.into_any(),
        // 守卫会重定向，这里只需占位
        None => ().into_any(),
    }
}

#[component]
fn RequestListInner(user: Session) -> impl IntoView {
    let router = use_router();

    let (items, set_items) = signal(Vec::<BloodRequest>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (show_all, set_show_all) = signal(false);

    let viewer = user.clone();
    let load = move || {
        let viewer = viewer.clone();
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            let api = BloodApi::from_storage();
            match api.list_requests().await {
                Ok(all) => {
                    let mine = visible_requests(&viewer, all);
                    // try_*: 组件卸载后响应才到达时静默丢弃
                    let _ = set_items.try_set(mine);
                    let _ = set_error_msg.try_set(None);
                }
                Err(e) => {
                    let _ = set_items.try_set(Vec::new());
                    let _ = set_error_msg.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    // 初始加载
    {
        let load = load.clone();
        Effect::new(move |_| {
            load();
        });
    }

    let deleter = user.clone();
    let handle_delete = move |request: BloodRequest| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Delete this blood request? This cannot be undone.")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let id = request.id.clone();
        spawn_local(async move {
            let api = BloodApi::from_storage();
            match api.delete_request(&id).await {
                Ok(()) => {
                    let _ = set_items.try_update(|list| list.retain(|r| r.id != id));
                }
                Err(e) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window
                            .alert_with_message(&format!("Failed to delete request: {}", e));
                    }
                }
            }
        });
    };

    let visible_count = move || visible_slice_len(items.with(|i| i.len()), show_all.get());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-6xl mx-auto space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-3xl font-bold">"Blood Requests"</h1>
                    <button
                        class="btn btn-error text-white"
                        on:click=move |_| router.navigate(AppRoute::RequestForm)
                    >
                        "New Request"
                    </button>
                </div>

                // 错误横幅 + 手动重试
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <AlertTriangle attr:class="h-6 w-6" />
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                        <button class="btn btn-sm" on:click={
                            let load = load.clone();
                            move |_| load()
                        }>
                            "Try Again"
                        </button>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-error"></span>
                        </div>
                    }
                >
                    <Show
                        clone:deleter
                        clone:handle_delete
                        when=move || items.with(|i| !i.is_empty())
                        fallback=move || view! {
                            <Show when=move || error_msg.get().is_none()>
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body items-center text-center">
                                        <p class="text-base-content/60">
                                            "No blood requests yet. Submit one to get started."
                                        </p>
                                    </div>
                                </div>
                            </Show>
                        }
                    >
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                            <For
                                each=move || {
                                    items.with(|all| {
                                        all.iter().take(visible_count()).cloned().collect::<Vec<_>>()
                                    })
                                }
                                key=|request| request.id.clone()
                                children={
                                    let deleter = deleter.clone();
                                    let handle_delete = handle_delete.clone();
                                    move |request: BloodRequest| {
                                        let deletable = can_delete(&request, &deleter);
                                        let open = {
                                            let id = request.id.clone();
                                            move |_| {
                                                router.navigate(AppRoute::RequestDetails(id.clone()))
                                            }
                                        };
                                        let on_delete = {
                                            let handle_delete = handle_delete.clone();
                                            let request = request.clone();
                                            move |ev: leptos::web_sys::MouseEvent| {
                                                ev.stop_propagation();
                                                handle_delete(request.clone());
                                            }
                                        };
                                        view! {
                                            <div
                                                class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow cursor-pointer"
                                                on:click=open
                                            >
                                                <div class="card-body gap-3">
                                                    <div class="flex items-center justify-between">
                                                        <h2 class="card-title">{request.patient_name.clone()}</h2>
                                                        <span class="badge badge-error badge-lg text-white font-bold">
                                                            {request.blood_group.as_str()}
                                                        </span>
                                                    </div>
                                                    <div class="flex flex-wrap gap-2">
                                                        <span class=urgency_badge(request.urgency)>
                                                            {request.urgency.as_str()}
                                                        </span>
                                                        <span class=status_badge(&request.status)>
                                                            {request.status.to_string()}
                                                        </span>
                                                        <span class="badge badge-outline">
                                                            {request.required_units} " unit(s)"
                                                        </span>
                                                    </div>
                                                    <p class="text-sm text-base-content/70">
                                                        {request.hospital_name.clone()} ", " {request.location.clone()}
                                                    </p>
                                                    <p class="text-sm">
                                                        "Needed by " {request.needed_date.format("%Y-%m-%d").to_string()}
                                                    </p>
                                                    <Show when=move || deletable>
                                                        <div class="card-actions justify-end">
                                                            <button
                                                                class="btn btn-sm btn-outline btn-error gap-1"
                                                                on:click=on_delete.clone()
                                                            >
                                                                <Trash attr:class="h-4 w-4" /> "Delete"
                                                            </button>
                                                        </div>
                                                    </Show>
                                                </div>
                                            </div>
                                        }
                                    }
                                }
                            />
                        </div>

                        // 超过初始条数时的展开 / 收起
                        <Show when=move || items.with(|i| i.len() > INITIAL_VISIBLE)>
                            <div class="flex justify-center mt-6">
                                <button
                                    class="btn btn-outline"
                                    on:click=move |_| set_show_all.update(|s| *s = !*s)
                                >
                                    {move || if show_all.get() { "Show Less" } else { "Show All" }}
                                </button>
                            </div>
                        </Show>
                    </Show>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_are_never_truncated() {
        assert_eq!(visible_slice_len(0, false), 0);
        assert_eq!(visible_slice_len(6, false), 6);
        assert_eq!(visible_slice_len(6, true), 6);
    }

    #[test]
    fn seventh_item_hides_behind_the_toggle() {
        assert_eq!(visible_slice_len(7, false), INITIAL_VISIBLE);
        assert_eq!(visible_slice_len(7, true), 7);
    }

    #[test]
    fn eight_items_show_six_then_all() {
        // 8 条记录：初始 6 条，Show All 后全部 8 条
        assert_eq!(visible_slice_len(8, false), 6);
        assert_eq!(visible_slice_len(8, true), 8);
        // 收起后回到初始页
        assert_eq!(visible_slice_len(8, false), 6);
    }
}
