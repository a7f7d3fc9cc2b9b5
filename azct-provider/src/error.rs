use serde::{Deserialize, Serialize};

/// Unified error type for all resource-provider operations.
///
/// Each variant includes a `provider` field identifying which backend produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Transient Errors
///
/// The following variants represent transient failures that may succeed on a later refresh:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API throttling
///
/// The browser core never retries; a backend may do so internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Backend that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// No usable identity, or the token has expired.
    Unauthenticated {
        /// Backend that produced the error.
        provider: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The signed-in identity lacks permission for the requested listing.
    PermissionDenied {
        /// Backend that produced the error.
        provider: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The addressed subscription, group, account, container, vault or item does not exist.
    ResourceNotFound {
        /// Backend that produced the error.
        provider: String,
        /// Identifier of the missing resource.
        resource: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Backend that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The request timed out.
    Timeout {
        /// Backend that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// Failed to parse the backend's response.
    ParseError {
        /// Backend that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the backend.
    Unknown {
        /// Backend that produced the error.
        provider: String,
        /// Raw error code, if available.
        raw_code: Option<String>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（权限不足、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated { .. }
                | Self::PermissionDenied { .. }
                | Self::ResourceNotFound { .. }
                | Self::RateLimited { .. }
        )
    }

    /// 是否为瞬时错误（稍后刷新可能成功）
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// 产生该错误的后端标识
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Unauthenticated { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::ResourceNotFound { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Unauthenticated {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Not authenticated: {msg}")
                } else {
                    write!(f, "[{provider}] Not authenticated")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ResourceNotFound {
                provider,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Resource '{resource}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Resource '{resource}' not found")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
