//! 血液请求数据客户端
//!
//! 所有对外部 REST 服务的访问集中在 [`BloodApi`]。每次调用带
//! 10 秒本地超时，错误统一映射为 [`ApiError`] 分类后交给 UI。

use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;

use youthblood_shared::error::{ApiError, ApiResult};
use youthblood_shared::protocol::{
    ACTIVITIES_PATH, ActivityRecord, AdminUser, BLOODS_PATH, Envelope, ErrorBody, ListBody,
    LOGIN_PATH, LoginOutcome, LoginRequest, LoginResponse, REGISTER_PATH, RegisterRequest,
    STATISTICS_PATH, Statistics, USERS_PATH,
};
use youthblood_shared::{BloodRequest, CreateBloodRequest};

// =========================================================
// 常量
// =========================================================

/// 默认服务地址
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// LocalStorage 中的服务地址覆盖键
pub const STORAGE_API_BASE_KEY: &str = "youthblood_api_base";

/// 单次请求超时（毫秒）
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

// =========================================================
// 客户端
// =========================================================

/// 数据客户端
#[derive(Debug, Clone)]
pub struct BloodApi {
    base_url: String,
}

impl BloodApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// 从 LocalStorage 读取服务地址覆盖，缺失时用默认地址
    pub fn from_storage() -> Self {
        let base: String =
            LocalStorage::get(STORAGE_API_BASE_KEY).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================
    // 血液请求
    // =========================================================

    /// 拉取全部血液请求（可见性过滤在视图层做）
    pub async fn list_requests(&self) -> ApiResult<Vec<BloodRequest>> {
        let url = self.url(BLOODS_PATH);
        with_timeout(async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                return Err(ApiError::fetch(format!(
                    "failed to fetch blood requests: HTTP {}",
                    response.status()
                )));
            }
            let body: ListBody<BloodRequest> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            Ok(body.into_items())
        })
        .await
    }

    /// 按 id 拉取单条请求
    pub async fn get_request(&self, id: &str) -> ApiResult<BloodRequest> {
        let url = self.url(&format!("{BLOODS_PATH}/{id}"));
        with_timeout(async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if response.status() == 404 {
                return Err(ApiError::not_found("blood request not found"));
            }
            if !response.ok() {
                return Err(ApiError::fetch(format!(
                    "failed to fetch blood request: HTTP {}",
                    response.status()
                )));
            }
            let envelope: Envelope<BloodRequest> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            let message = envelope.message.clone();
            envelope.into_data().ok_or_else(|| {
                ApiError::not_found(message.unwrap_or_else(|| "blood request not found".into()))
            })
        })
        .await
    }

    /// 提交新的血液请求，返回服务端回填 id 后的完整记录
    pub async fn create_request(&self, payload: &CreateBloodRequest) -> ApiResult<BloodRequest> {
        let url = self.url(BLOODS_PATH);
        let request = Request::post(&url)
            .json(payload)
            .map_err(|e| ApiError::validation(e.to_string()))?;
        with_timeout(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                return Err(ApiError::validation(body.message.unwrap_or_else(|| {
                    format!("failed to submit blood request: HTTP {}", response.status())
                })));
            }
            let envelope: Envelope<BloodRequest> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            let message = envelope.message.clone();
            envelope.into_data().ok_or_else(|| {
                ApiError::validation(message.unwrap_or_else(|| "submission rejected".into()))
            })
        })
        .await
    }

    /// 删除一条请求
    pub async fn delete_request(&self, id: &str) -> ApiResult<()> {
        let url = self.url(&format!("{BLOODS_PATH}/{id}"));
        with_timeout(async move {
            let response = Request::delete(&url)
                .send()
                .await
                .map_err(|e| ApiError::delete(e.to_string()))?;
            if !response.ok() {
                return Err(ApiError::delete(format!(
                    "failed to delete blood request: HTTP {}",
                    response.status()
                )));
            }
            Ok(())
        })
        .await
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 校验凭据，成功返回用户与 token
    pub async fn login(&self, email: String, password: String) -> ApiResult<LoginOutcome> {
        let url = self.url(LOGIN_PATH);
        let request = Request::post(&url)
            .json(&LoginRequest { email, password })
            .map_err(|e| ApiError::fetch(e.to_string()))?;
        with_timeout(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                if response.status() == 401 {
                    return Err(ApiError::auth(
                        body.message
                            .unwrap_or_else(|| "invalid email or password".into()),
                    ));
                }
                return Err(ApiError::fetch(format!(
                    "login failed: HTTP {}",
                    response.status()
                )));
            }
            let body: LoginResponse = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            body.into_outcome()
        })
        .await
    }

    /// 注册新用户
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResult<()> {
        let url = self.url(REGISTER_PATH);
        let request = Request::post(&url)
            .json(payload)
            .map_err(|e| ApiError::fetch(e.to_string()))?;
        with_timeout(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            let body: ErrorBody = response.json().await.unwrap_or_default();
            if !response.ok() || !body.success {
                return Err(ApiError::validation(
                    body.message.unwrap_or_else(|| "registration failed".into()),
                ));
            }
            Ok(())
        })
        .await
    }

    // =========================================================
    // 管理端
    // =========================================================

    /// 拉取全部注册用户（管理面板）
    pub async fn fetch_users(&self) -> ApiResult<Vec<AdminUser>> {
        let url = self.url(USERS_PATH);
        with_timeout(async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                return Err(ApiError::fetch(format!(
                    "failed to fetch users: HTTP {}",
                    response.status()
                )));
            }
            let body: ListBody<AdminUser> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            Ok(body.into_items())
        })
        .await
    }

    /// 拉取最近活动记录
    pub async fn fetch_activities(&self, limit: u32) -> ApiResult<Vec<ActivityRecord>> {
        let url = format!("{}?limit={limit}", self.url(ACTIVITIES_PATH));
        with_timeout(async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                return Err(ApiError::fetch(format!(
                    "failed to fetch activities: HTTP {}",
                    response.status()
                )));
            }
            let body: ListBody<ActivityRecord> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            Ok(body.into_items())
        })
        .await
    }

    /// 拉取服务端预计算的统计量
    pub async fn fetch_statistics(&self) -> ApiResult<Statistics> {
        let url = self.url(STATISTICS_PATH);
        with_timeout(async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            if !response.ok() {
                return Err(ApiError::fetch(format!(
                    "failed to fetch statistics: HTTP {}",
                    response.status()
                )));
            }
            let envelope: Envelope<Statistics> = response
                .json()
                .await
                .map_err(|e| ApiError::fetch(e.to_string()))?;
            envelope
                .into_data()
                .ok_or_else(|| ApiError::fetch("statistics unavailable"))
        })
        .await
    }
}

impl Default for BloodApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

// =========================================================
// 超时
// =========================================================

/// 在 [`REQUEST_TIMEOUT_MS`] 内竞争完成，超时裁决为 [`ApiError::timeout`]
async fn with_timeout<T, F>(fut: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    match select(Box::pin(fut), TimeoutFuture::new(REQUEST_TIMEOUT_MS)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::timeout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_strips_trailing_slashes() {
        let api = BloodApi::new("http://localhost:5000///");
        assert_eq!(api.url(BLOODS_PATH), "http://localhost:5000/bloods");

        let default = BloodApi::default();
        assert_eq!(
            default.url(&format!("{BLOODS_PATH}/abc")),
            "http://localhost:5000/bloods/abc"
        );
    }
}
