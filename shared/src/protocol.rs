//! 线格式定义 (Wire Protocol)
//!
//! 外部 API 的端点路径、`{success, data}` 信封约定，以及认证 /
//! 管理端点的请求与响应体。列表端点额外容忍裸数组响应。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::Session;

// =========================================================
// 端点路径
// =========================================================

pub const BLOODS_PATH: &str = "/bloods";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const USERS_PATH: &str = "/auth/users";
pub const ACTIVITIES_PATH: &str = "/auth/activities";
pub const STATISTICS_PATH: &str = "/auth/statistics";

/// 管理面板一次拉取的活动记录上限
pub const ACTIVITY_FETCH_LIMIT: u32 = 50;

// =========================================================
// 信封 (Envelope)
// =========================================================

/// 标准响应信封 `{success, data, message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// success 为 true 时取出 data，否则返回 None
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// 列表端点的两种合法形态：裸数组，或信封包裹的数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Bare(Vec<T>),
    Enveloped(Envelope<Vec<T>>),
}

impl<T> ListBody<T> {
    /// 归一化为有序序列（顺序即服务端返回顺序，视作任意）
    ///
    /// 信封形态下 success 为 false 时视为空序列。
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Enveloped(envelope) => envelope.into_data().unwrap_or_default(),
        }
    }
}

/// 非 2xx 响应的错误体，message 可能缺失
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 认证
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应：`{success, user, token}`
///
/// token 由外部会话服务签发 (JWT, 30 天有效期)，客户端不解析其内容。
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<Session>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 登录成功后客户端持有的结果
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: Session,
    pub token: Option<String>,
}

impl LoginResponse {
    /// 凭据无效（success 为 false 或未返回用户）映射为 AuthError
    pub fn into_outcome(self) -> ApiResult<LoginOutcome> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok(LoginOutcome {
                user,
                token: self.token,
            }),
            _ => Err(ApiError::auth(
                self.message
                    .unwrap_or_else(|| "invalid email or password".to_string()),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<crate::BloodGroup>,
}

// =========================================================
// 管理端集合（统计值由服务端预计算，客户端原样信任）
// =========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub login_count: u32,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    pub activity_type: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub today_logins: u64,
    #[serde(default)]
    pub total_logins: u64,
    #[serde(default)]
    pub today_registrations: u64,
    #[serde(default)]
    pub total_blood_requests: u64,
    #[serde(default)]
    pub pending_blood_requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BloodRequest;

    #[test]
    fn list_body_accepts_bare_array() {
        let body = r#"[{"_id":"1","patientName":"A","bloodGroup":"A+","neededDate":"2026-09-01"}]"#;
        let parsed: ListBody<BloodRequest> = serde_json::from_str(body).unwrap();
        let items = parsed.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
    }

    #[test]
    fn list_body_accepts_envelope() {
        let body = r#"{"success":true,"data":[
            {"_id":"1","patientName":"A","bloodGroup":"A+","neededDate":"2026-09-01"},
            {"_id":"2","patientName":"B","bloodGroup":"O-","neededDate":"2026-09-02"}
        ]}"#;
        let parsed: ListBody<BloodRequest> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_items().len(), 2);
    }

    #[test]
    fn unsuccessful_envelope_normalizes_to_empty() {
        let body = r#"{"success":false,"message":"boom"}"#;
        let parsed: ListBody<BloodRequest> = serde_json::from_str(body).unwrap();
        assert!(parsed.into_items().is_empty());
    }

    #[test]
    fn login_response_maps_to_outcome() {
        let ok: LoginResponse = serde_json::from_str(
            r#"{"success":true,"token":"t0k","user":{"id":"7","name":"N","email":"n@x.com","role":"admin","bloodGroup":"B+"}}"#,
        )
        .unwrap();
        let outcome = ok.into_outcome().unwrap();
        assert_eq!(outcome.user.user_id, "7");
        assert!(outcome.user.role.is_admin());
        assert_eq!(outcome.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn login_without_user_is_auth_error() {
        let denied: LoginResponse =
            serde_json::from_str(r#"{"success":false,"message":"bad credentials"}"#).unwrap();
        let err = denied.into_outcome().unwrap_err();
        assert_eq!(err.error_code(), "AUTH_ERROR");
        assert_eq!(err.message, "bad credentials");

        // success 为 true 但缺少 user 同样视为认证失败
        let empty: LoginResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(empty.into_outcome().is_err());
    }

    #[test]
    fn statistics_defaults_missing_counters() {
        let stats: Statistics =
            serde_json::from_str(r#"{"totalUsers":12,"pendingBloodRequests":3}"#).unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_blood_requests, 3);
        assert_eq!(stats.today_logins, 0);
    }
}
