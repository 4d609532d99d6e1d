//! 客户端错误类型
//!
//! 所有网络操作都在调用点被捕获并转为可见的 UI 错误状态，
//! 没有任何错误是进程致命的。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 错误类别枚举
///
/// 对应规格中的错误分类：传输/非 2xx、超时、未找到、校验失败、
/// 认证失败、删除失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// 传输失败或非 2xx 状态
    Fetch,
    /// 请求超时（客户端本地裁决）
    Timeout,
    /// 目标 id 不存在
    NotFound,
    /// 服务端校验拒绝（必填字段缺失等）
    Validation,
    /// 凭据无效，认证服务未返回用户
    Auth,
    /// 删除操作被拒绝
    Delete,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Fetch => "FETCH_ERROR",
            ApiErrorKind::Timeout => "TIMEOUT",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::Validation => "VALIDATION_ERROR",
            ApiErrorKind::Auth => "AUTH_ERROR",
            ApiErrorKind::Delete => "DELETE_ERROR",
        }
    }
}

/// 客户端 API 错误
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Fetch, message)
    }

    pub fn timeout() -> Self {
        Self::new(ApiErrorKind::Timeout, "request timed out")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Auth, message)
    }

    pub fn delete(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Delete, message)
    }

    // --- Accessors ---

    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_error_code() {
        let e = ApiError::validation("patientName is required");
        assert_eq!(e.to_string(), "[VALIDATION_ERROR] patientName is required");
    }

    #[test]
    fn timeout_has_fixed_message() {
        assert_eq!(ApiError::timeout().kind, ApiErrorKind::Timeout);
        assert!(ApiError::not_found("x").is_not_found());
        assert!(!ApiError::timeout().is_not_found());
    }
}
