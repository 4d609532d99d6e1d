//! 管理面板
//!
//! 挂载时并发拉取用户 / 活动 / 统计三组数据，三个面板各自
//! 持有自己的结果信号，任一失败只降级对应面板。统计值由
//! 服务端预计算，客户端原样展示。

use leptos::prelude::*;
use leptos::task::spawn_local;

use youthblood_shared::error::ApiResult;
use youthblood_shared::protocol::{ACTIVITY_FETCH_LIMIT, ActivityRecord, AdminUser, Statistics};

use crate::api::BloodApi;
use crate::components::icons::{Activity, AlertTriangle, Users};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Overview,
    Users,
    Activities,
}

fn format_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn panel_error(message: String) -> AnyView {
    view! {
        <div role="alert" class="alert alert-error">
            <AlertTriangle attr:class="h-6 w-6" />
            <span>{message}</span>
        </div>
    }
    .into_any()
}

fn panel_loading() -> AnyView {
    view! {
        <div class="flex justify-center py-12">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
    .into_any()
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (active_tab, set_active_tab) = signal(AdminTab::Overview);

    // None = 仍在加载；Some(Err) = 该面板降级
    let (users, set_users) = signal(Option::<ApiResult<Vec<AdminUser>>>::None);
    let (activities, set_activities) = signal(Option::<ApiResult<Vec<ActivityRecord>>>::None);
    let (statistics, set_statistics) = signal(Option::<ApiResult<Statistics>>::None);

    Effect::new(move |_| {
        spawn_local(async move {
            let api = BloodApi::from_storage();
            let (fetched_users, fetched_activities, fetched_statistics) = futures::join!(
                api.fetch_users(),
                api.fetch_activities(ACTIVITY_FETCH_LIMIT),
                api.fetch_statistics(),
            );
            let _ = set_users.try_set(Some(fetched_users));
            let _ = set_activities.try_set(Some(fetched_activities));
            let _ = set_statistics.try_set(Some(fetched_statistics));
        });
    });

    let tab_class = move |tab: AdminTab| {
        if active_tab.get() == tab {
            "tab tab-active"
        } else {
            "tab"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Admin Dashboard"</h1>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 w-fit">
                    <a role="tab" class=move || tab_class(AdminTab::Overview)
                        on:click=move |_| set_active_tab.set(AdminTab::Overview)>
                        "Overview"
                    </a>
                    <a role="tab" class=move || tab_class(AdminTab::Users)
                        on:click=move |_| set_active_tab.set(AdminTab::Users)>
                        "Users"
                    </a>
                    <a role="tab" class=move || tab_class(AdminTab::Activities)
                        on:click=move |_| set_active_tab.set(AdminTab::Activities)>
                        "Activity Log"
                    </a>
                </div>

                {move || match active_tab.get() {
                    AdminTab::Overview => view! { <OverviewPanel statistics=statistics /> }.into_any(),
                    AdminTab::Users => view! { <UsersPanel users=users /> }.into_any(),
                    AdminTab::Activities => {
                        view! { <ActivitiesPanel activities=activities /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn OverviewPanel(statistics: ReadSignal<Option<ApiResult<Statistics>>>) -> impl IntoView {
    move || match statistics.get() {
        None => panel_loading(),
        Some(Err(e)) => panel_error(format!("Failed to load statistics: {}", e)),
        Some(Ok(stats)) => view! {
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-figure text-primary">
                        <Users attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Users"</div>
                    <div class="stat-value text-primary">{stats.total_users}</div>
                </div>
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-title">"Logins Today"</div>
                    <div class="stat-value">{stats.today_logins}</div>
                </div>
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-title">"Total Logins"</div>
                    <div class="stat-value">{stats.total_logins}</div>
                </div>
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-title">"Registrations Today"</div>
                    <div class="stat-value">{stats.today_registrations}</div>
                </div>
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-title">"Blood Requests"</div>
                    <div class="stat-value text-error">{stats.total_blood_requests}</div>
                </div>
                <div class="stat bg-base-100 rounded-box shadow">
                    <div class="stat-title">"Pending Requests"</div>
                    <div class="stat-value text-warning">{stats.pending_blood_requests}</div>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn UsersPanel(users: ReadSignal<Option<ApiResult<Vec<AdminUser>>>>) -> impl IntoView {
    move || match users.get() {
        None => panel_loading(),
        Some(Err(e)) => panel_error(format!("Failed to load users: {}", e)),
        Some(Ok(list)) => view! {
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Blood Type"</th>
                            <th>"Logins"</th>
                            <th>"Last Login"</th>
                            <th>"Joined"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|u| {
                                view! {
                                    <tr>
                                        <td>{u.name}</td>
                                        <td>{u.email}</td>
                                        <td>{u.blood_type.unwrap_or_else(|| "—".to_string())}</td>
                                        <td>{u.login_count}</td>
                                        <td>{format_timestamp(u.last_login)}</td>
                                        <td>{format_timestamp(u.created_at)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ActivitiesPanel(
    activities: ReadSignal<Option<ApiResult<Vec<ActivityRecord>>>>,
) -> impl IntoView {
    move || match activities.get() {
        None => panel_loading(),
        Some(Err(e)) => panel_error(format!("Failed to load activities: {}", e)),
        Some(Ok(list)) => view! {
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th><Activity attr:class="h-4 w-4 inline" /> " Type"</th>
                            <th>"Email"</th>
                            <th>"Time"</th>
                            <th>"IP"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|a| {
                                view! {
                                    <tr>
                                        <td>{a.activity_type}</td>
                                        <td>{a.email}</td>
                                        <td>{format_timestamp(a.timestamp)}</td>
                                        <td>{a.ip.unwrap_or_else(|| "—".to_string())}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any(),
    }
}
