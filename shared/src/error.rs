use thiserror::Error;

use crate::ActivityState;

/// 网关客户端错误
///
/// `Display` 直接作为界面上的错误文案，后端返回的消息原样透传。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 请求未能到达后端（fetch 失败、CORS、断网）
    #[error("Network error: {0}")]
    Network(String),

    /// 非 2xx 且响应体不是 GraphQL 结果
    #[error("Server responded with status {status}")]
    Status { status: u16 },

    /// GraphQL `errors` 数组，多条消息以换行拼接
    #[error("{0}")]
    Graphql(String),

    /// 请求体序列化失败
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// 响应体无法解析为期望的结构
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// 既没有 `data` 也没有 `errors`
    #[error("Response contained no data")]
    MissingData,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode user record: {0}")]
    Encode(String),
}

/// 非法的活动状态迁移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move activity from {from} to {to}")]
pub struct TransitionError {
    pub from: ActivityState,
    pub to: ActivityState,
}
