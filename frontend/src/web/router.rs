//! 路由引擎
//!
//! 基于 History API 的客户端路由：popstate 监听、守卫导航、
//! 会话变化驱动的重定向。守卫规则全部来自 [`AppRoute`] 的判定，
//! 引擎只负责执行。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::session::SessionState;
use crate::web::route::AppRoute;

// =========================================================
// 路由服务
// =========================================================

/// 路由服务，通过 provide_context 注入组件树
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<SessionState>,
}

impl RouterService {
    /// 当前路由信号
    pub fn route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到目标路由（经守卫裁决，可能被改写为重定向目标）
    pub fn navigate(&self, route: AppRoute) {
        let resolved = self.session.with_untracked(|s| resolve_route(route, s));
        push_history_state(&resolved.to_path());
        self.set_route.set(resolved);
    }

    /// 替换当前历史记录项（重定向用，不产生返回栈条目）
    fn redirect(&self, route: AppRoute) {
        replace_history_state(&route.to_path());
        self.set_route.set(route);
    }
}

/// 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

/// 守卫裁决：给定目标路由与会话状态，返回实际应落地的路由
///
/// Unresolved 状态下放行原路由，出口组件以占位渲染等待会话恢复。
fn resolve_route(target: AppRoute, session: &SessionState) -> AppRoute {
    match session {
        SessionState::Unresolved => target,
        SessionState::Absent => {
            if target.requires_auth() {
                AppRoute::auth_failure_redirect()
            } else {
                target
            }
        }
        SessionState::Present(user) => {
            if target.requires_admin() && !user.role.is_admin() {
                AppRoute::auth_success_redirect()
            } else if target.should_redirect_when_authenticated() {
                AppRoute::auth_success_redirect()
            } else {
                target
            }
        }
    }
}

// =========================================================
// History API
// =========================================================

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            if let Err(e) =
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            {
                web_sys::console::warn_1(&e);
            }
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            if let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            {
                web_sys::console::warn_1(&e);
            }
        }
    }
}

// =========================================================
// 组件
// =========================================================

/// 路由器根组件
///
/// 初始化当前路由、挂载 popstate 监听，并随会话状态变化重新
/// 执行守卫（登出后停留在受保护页面时踢回登录页）。
#[component]
pub fn Router(session_state: Signal<SessionState>, children: Children) -> impl IntoView {
    let initial = AppRoute::from_path(&current_path());
    let (current_route, set_route) = signal(initial);

    let service = RouterService {
        current_route,
        set_route,
        session: session_state,
    };
    provide_context(service);

    // 浏览器前进 / 后退
    if let Some(window) = web_sys::window() {
        let on_popstate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event| {
            let route = AppRoute::from_path(&current_path());
            let resolved = session_state.with_untracked(|s| resolve_route(route, s));
            // try_set: 应用卸载后仍可能触发 popstate，此时静默忽略
            if let Some(unset) = set_route.try_set(resolved) {
                web_sys::console::warn_1(
                    &format!("popstate after unmount: {}", unset.to_path()).into(),
                );
            }
        });
        if let Err(e) = window
            .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
        {
            web_sys::console::warn_1(&e);
        }
        // 监听器与应用同生命周期
        on_popstate.forget();
    }

    // 会话状态解析 / 变化后重新裁决当前路由
    Effect::new(move |_| {
        let session = session_state.get();
        if !session.is_resolved() {
            return;
        }
        let route = current_route.get_untracked();
        let resolved = resolve_route(route.clone(), &session);
        if resolved != route {
            service.redirect(resolved);
        }
    });

    children()
}

/// 守卫出口
///
/// 受保护路由在会话恢复完成前渲染加载占位，守卫重定向生效前
/// 渲染空视图，其余情况交给 matcher 渲染页面。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    let session = crate::session::use_session();

    move || {
        let route = router.route().get();
        let state = session.state.get();

        match &state {
            SessionState::Unresolved if route.requires_auth() => view! {
                <div class="flex justify-center items-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            SessionState::Absent if route.requires_auth() => ().into_any(),
            SessionState::Present(user)
                if route.requires_admin() && !user.role.is_admin() =>
            {
                ().into_any()
            }
            _ => matcher(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use youthblood_shared::{Role, Session};

    fn user(role: Role) -> Session {
        Session {
            user_id: "u1".into(),
            name: "T".into(),
            email: "t@x.com".into(),
            role,
            blood_group: None,
        }
    }

    #[test]
    fn absent_session_is_sent_to_login() {
        let s = SessionState::Absent;
        assert_eq!(resolve_route(AppRoute::Dashboard, &s), AppRoute::Login);
        assert_eq!(resolve_route(AppRoute::Admin, &s), AppRoute::Login);
        assert_eq!(resolve_route(AppRoute::Home, &s), AppRoute::Home);
        assert_eq!(resolve_route(AppRoute::Login, &s), AppRoute::Login);
    }

    #[test]
    fn unresolved_session_passes_through() {
        let s = SessionState::Unresolved;
        assert_eq!(resolve_route(AppRoute::Dashboard, &s), AppRoute::Dashboard);
    }

    #[test]
    fn authenticated_user_skips_login_page() {
        let s = SessionState::Present(user(Role::User));
        assert_eq!(resolve_route(AppRoute::Login, &s), AppRoute::Dashboard);
        assert_eq!(resolve_route(AppRoute::Register, &s), AppRoute::Dashboard);
        assert_eq!(
            resolve_route(AppRoute::RequestList, &s),
            AppRoute::RequestList
        );
    }

    #[test]
    fn admin_routes_need_admin_role() {
        let plain = SessionState::Present(user(Role::User));
        assert_eq!(resolve_route(AppRoute::Admin, &plain), AppRoute::Dashboard);

        let admin = SessionState::Present(user(Role::Admin));
        assert_eq!(resolve_route(AppRoute::Admin, &admin), AppRoute::Admin);
    }
}
