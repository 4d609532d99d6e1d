//! 会话存储 (Session Store)
//!
//! 会话快照持久化在 LocalStorage，启动时恢复并做过期检查。
//! 所有组件通过 [`SessionContext`] 的响应式信号读取当前会话；
//! login / logout / update_profile 是仅有的三个写入口。

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use youthblood_shared::error::ApiResult;
use youthblood_shared::Session;

use crate::api::BloodApi;

// =========================================================
// 常量
// =========================================================

/// LocalStorage 中的会话键
pub const STORAGE_SESSION_KEY: &str = "youthblood_session";

/// 会话客户端本地有效期（天）
pub const SESSION_TTL_DAYS: i64 = 30;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// =========================================================
// 会话状态
// =========================================================

/// 当前会话的三态
///
/// `Unresolved` 仅存在于启动恢复完成之前，守卫在该状态下不做重定向。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// 启动恢复尚未完成
    #[default]
    Unresolved,
    /// 已确认无会话
    Absent,
    /// 已登录
    Present(Session),
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, SessionState::Present(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Present(session) => Some(session),
            _ => None,
        }
    }
}

/// 会话上下文，通过 provide_context 注入组件树
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::Unresolved);
        Self { state, set_state }
    }

    /// 以 Signal 形式暴露给路由引擎
    pub fn state_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    /// 当前已登录用户的快照（未登录时为 None）
    pub fn current(&self) -> Option<Session> {
        self.state.with(|s| s.session().cloned())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从组件树获取会话上下文
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

// =========================================================
// 持久化形态
// =========================================================

/// 落盘的会话快照
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: Option<String>,
    user: Session,
    /// 过期时刻（Unix 毫秒），恢复时超过即丢弃
    expires_at_ms: i64,
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// 从给定时刻起算的过期时限
fn expiry_deadline(from_ms: i64) -> i64 {
    from_ms + SESSION_TTL_DAYS * MS_PER_DAY
}

fn is_expired(stored_deadline_ms: i64, now_ms: i64) -> bool {
    now_ms >= stored_deadline_ms
}

fn persist(user: &Session, token: Option<String>) {
    let snapshot = StoredSession {
        token,
        user: user.clone(),
        expires_at_ms: expiry_deadline(now_ms()),
    };
    if let Err(e) = LocalStorage::set(STORAGE_SESSION_KEY, &snapshot) {
        web_sys::console::warn_1(&format!("failed to persist session: {e}").into());
    }
}

// =========================================================
// 操作
// =========================================================

/// 启动时恢复会话
///
/// 快照缺失、损坏或已过期时统一归为 Absent，过期快照同时从
/// LocalStorage 删除。
pub fn init_session(ctx: SessionContext) {
    let restored: Option<StoredSession> = LocalStorage::get(STORAGE_SESSION_KEY).ok();

    let next = match restored {
        Some(snapshot) if !is_expired(snapshot.expires_at_ms, now_ms()) => {
            SessionState::Present(snapshot.user)
        }
        Some(_) => {
            LocalStorage::delete(STORAGE_SESSION_KEY);
            SessionState::Absent
        }
        None => SessionState::Absent,
    };

    ctx.set_state.set(next);
}

/// 登录：委托认证服务校验凭据，成功后持久化并切换为 Present
pub async fn login(
    ctx: SessionContext,
    api: &BloodApi,
    email: String,
    password: String,
) -> ApiResult<()> {
    let outcome = api.login(email, password).await?;
    persist(&outcome.user, outcome.token);
    ctx.set_state.set(SessionState::Present(outcome.user));
    Ok(())
}

/// 登出：清除快照并切换为 Absent
pub fn logout(ctx: SessionContext) {
    LocalStorage::delete(STORAGE_SESSION_KEY);
    ctx.set_state.set(SessionState::Absent);
}

/// 更新已登录用户的资料快照（姓名 / 血型等），保持 token 不变
pub fn update_profile(ctx: SessionContext, user: Session) {
    let token = LocalStorage::get::<StoredSession>(STORAGE_SESSION_KEY)
        .ok()
        .and_then(|s| s.token);
    persist(&user, token);
    ctx.set_state.set(SessionState::Present(user));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_thirty_days_out() {
        let from = 1_000_000;
        assert_eq!(expiry_deadline(from), from + 30 * MS_PER_DAY);
    }

    #[test]
    fn expiry_is_inclusive_at_deadline() {
        let deadline = expiry_deadline(0);
        assert!(!is_expired(deadline, deadline - 1));
        assert!(is_expired(deadline, deadline));
        assert!(is_expired(deadline, deadline + 1));
    }

    #[test]
    fn stored_session_round_trips() {
        let raw = r#"{
            "token": "t0k",
            "user": {"id":"7","name":"N","email":"n@x.com","role":"user"},
            "expires_at_ms": 1756100000000
        }"#;
        let snapshot: StoredSession = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.user.user_id, "7");
        assert_eq!(snapshot.token.as_deref(), Some("t0k"));

        let back = serde_json::to_string(&snapshot).unwrap();
        let again: StoredSession = serde_json::from_str(&back).unwrap();
        assert_eq!(again.expires_at_ms, snapshot.expires_at_ms);
    }

    #[test]
    fn missing_token_is_tolerated() {
        let raw = r#"{
            "user": {"id":"7","name":"N","email":"n@x.com"},
            "expires_at_ms": 1
        }"#;
        let snapshot: StoredSession = serde_json::from_str(raw).unwrap();
        assert!(snapshot.token.is_none());
    }
}
