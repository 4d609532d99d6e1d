//! Youth Blood 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含守卫）
//! - `session`: 会话状态管理
//! - `api`: 外部数据服务客户端
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod admin_dashboard;
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod profile;
    pub mod register;
    pub mod request_details;
    pub mod request_form;
    pub mod request_list;
}
mod session;

pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::request_details::RequestDetailsPage;
use crate::components::request_form::RequestFormPage;
use crate::components::request_list::RequestListPage;
use crate::session::{SessionContext, init_session};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::RequestForm => view! { <RequestFormPage /> }.into_any(),
        AppRoute::RequestList => view! { <RequestListPage /> }.into_any(),
        AppRoute::RequestDetails(id) => view! { <RequestDetailsPage id=id /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Admin => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // 2. 从 LocalStorage 恢复会话（含过期检查）
    init_session(session_ctx);

    // 3. 会话状态信号注入路由服务，实现守卫（解耦！）
    let session_state = session_ctx.state_signal();

    view! {
        <Router session_state=session_state>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
