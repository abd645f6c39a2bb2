//! 应用程序错误类型
//!
//! 错误分为三类：
//! - 传输错误：网络失败或非 2xx 响应，对当前操作是终结性的，不自动重试
//! - 服务错误：服务端在成功响应里报告的业务失败（`status: failed` / `success: false`）
//! - 校验错误：发起网络请求之前在客户端就能发现的问题

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络请求失败（连接失败或非 2xx 响应）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端报告的业务失败
    #[error("服务返回错误: {message}")]
    Service { message: String },
    /// 客户端校验失败（未发起网络请求）
    #[error("{message}")]
    Validation { message: String },
    /// 响应体解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    /// 创建传输错误
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建服务错误
    pub fn service(message: impl Into<String>) -> Self {
        AppError::Service {
            message: message.into(),
        }
    }

    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
        }
    }

    /// 创建解析错误
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
