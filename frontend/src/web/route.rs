//! 路由定义
//!
//! 应用内所有可达页面的枚举，以及路径与路由之间的双向映射。
//! 守卫判定（是否需要登录 / 是否需要管理员）也集中在这里，
//! 路由引擎与各组件共享同一份判定。

use std::fmt;

// =========================================================
// 路由枚举
// =========================================================

/// 应用路由
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppRoute {
    /// 首页
    #[default]
    Home,
    /// 登录页
    Login,
    /// 注册页
    Register,
    /// 用户仪表盘
    Dashboard,
    /// 提交血液请求表单
    RequestForm,
    /// 请求列表（自己的请求；管理员可见全部）
    RequestList,
    /// 单条请求详情
    RequestDetails(String),
    /// 个人资料
    Profile,
    /// 管理面板
    Admin,
    /// 未匹配路径
    NotFound,
}

impl AppRoute {
    /// 从浏览器路径解析路由
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        match normalized {
            "/" => AppRoute::Home,
            "/login" | "/auth/login" => AppRoute::Login,
            "/register" | "/auth/register" => AppRoute::Register,
            "/dashboard" => AppRoute::Dashboard,
            "/blood-request" => AppRoute::RequestForm,
            "/manage-requests" => AppRoute::RequestList,
            "/my-profile" => AppRoute::Profile,
            "/admin" | "/admin/dashboard" => AppRoute::Admin,
            other => match other.strip_prefix("/blood-request/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    AppRoute::RequestDetails(id.to_string())
                }
                _ => AppRoute::NotFound,
            },
        }
    }

    /// 路由对应的规范路径
    pub fn to_path(&self) -> String {
        match self {
            AppRoute::Home => "/".to_string(),
            AppRoute::Login => "/login".to_string(),
            AppRoute::Register => "/register".to_string(),
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::RequestForm => "/blood-request".to_string(),
            AppRoute::RequestList => "/manage-requests".to_string(),
            AppRoute::RequestDetails(id) => format!("/blood-request/{id}"),
            AppRoute::Profile => "/my-profile".to_string(),
            AppRoute::Admin => "/admin/dashboard".to_string(),
            AppRoute::NotFound => "/404".to_string(),
        }
    }

    // =========================================================
    // 守卫判定
    // =========================================================

    /// 该路由是否要求已登录
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            AppRoute::Dashboard
                | AppRoute::RequestForm
                | AppRoute::RequestList
                | AppRoute::RequestDetails(_)
                | AppRoute::Profile
                | AppRoute::Admin
        )
    }

    /// 该路由是否要求管理员角色
    pub fn requires_admin(&self) -> bool {
        matches!(self, AppRoute::Admin)
    }

    /// 已登录用户访问时应重定向走的路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, AppRoute::Login | AppRoute::Register)
    }

    /// 守卫拒绝时的跳转目标
    pub fn auth_failure_redirect() -> Self {
        AppRoute::Login
    }

    /// 登录成功后的默认落点
    pub fn auth_success_redirect() -> Self {
        AppRoute::Dashboard
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/auth/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/manage-requests"), AppRoute::RequestList);
        assert_eq!(AppRoute::from_path("/manage-requests/"), AppRoute::RequestList);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::Admin);
        assert_eq!(AppRoute::from_path("/admin/dashboard"), AppRoute::Admin);
    }

    #[test]
    fn parses_details_with_id() {
        assert_eq!(
            AppRoute::from_path("/blood-request/66f0abc123"),
            AppRoute::RequestDetails("66f0abc123".to_string())
        );
        // 末尾斜杠不影响解析
        assert_eq!(
            AppRoute::from_path("/blood-request/66f0abc123/"),
            AppRoute::RequestDetails("66f0abc123".to_string())
        );
        // 多级子路径不是合法详情路由
        assert_eq!(AppRoute::from_path("/blood-request/a/b"), AppRoute::NotFound);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/no-such-page"), AppRoute::NotFound);
    }

    #[test]
    fn path_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::RequestForm,
            AppRoute::RequestList,
            AppRoute::RequestDetails("abc".to_string()),
            AppRoute::Profile,
            AppRoute::Admin,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn guard_matrix() {
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::RequestForm.requires_auth());
        assert!(AppRoute::RequestList.requires_auth());
        assert!(AppRoute::RequestDetails("x".to_string()).requires_auth());
        assert!(AppRoute::Profile.requires_auth());
        assert!(AppRoute::Admin.requires_auth());

        assert!(AppRoute::Admin.requires_admin());
        assert!(!AppRoute::Dashboard.requires_admin());

        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Home.should_redirect_when_authenticated());
    }
}
