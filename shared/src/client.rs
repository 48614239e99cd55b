//! API 网关客户端
//!
//! 所有读写都经由同一个 GraphQL 端点。客户端只负责：
//! - 构造请求体并附加 `authorization` 头（有 token 时）
//! - 解析 `{data, errors}` 响应
//!
//! 不重试、不排队、不去重，也不设置超时。

use serde::de::DeserializeOwned;

use crate::ClientError;
use crate::protocol::{GraphqlOperation, GraphqlRequest, GraphqlResponse, TypenameProbe};

// =========================================================
// 核心抽象层 (Transport Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层特性
///
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的。
/// 网络层失败应映射为 [`ClientError::Network`]。
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// 在发请求时提供当前 token
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

/// 固定 token，用于探测和测试
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

// =========================================================
// 网关客户端 (Gateway Client)
// =========================================================

#[derive(Debug, Clone)]
pub struct GatewayClient<T, S> {
    endpoint: String,
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenSource> GatewayClient<T, S> {
    pub fn new(endpoint: impl Into<String>, transport: T, tokens: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
            tokens,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 执行一次 GraphQL 操作
    pub async fn execute<Op: GraphqlOperation>(&self, op: &Op) -> Result<Op::Response, ClientError> {
        let req = self.build_request(op)?;

        tracing::debug!(operation = Op::NAME, "sending graphql operation");
        let resp = match self.transport.post(req).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(operation = Op::NAME, error = %e, "transport failed");
                return Err(e);
            }
        };

        let result = decode_response::<Op::Response>(&resp);
        if let Err(e) = &result {
            tracing::warn!(operation = Op::NAME, status = resp.status, error = %e, "graphql operation failed");
        }
        result
    }

    /// 构造带认证头的请求
    pub fn build_request<Op: GraphqlOperation>(&self, op: &Op) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(&GraphqlRequest::new(op))
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        let mut req = HttpRequest::new(&self.endpoint)
            .with_header("content-type", "application/json")
            .with_body(body);

        // 无 token 时省略该头
        if let Some(token) = self.tokens.token().filter(|t| !t.is_empty()) {
            req = req.with_header("authorization", &format!("Bearer {}", token));
        }
        Ok(req)
    }

    /// 连通性探测：发送一次 `__typename` 查询
    pub async fn probe(&self) -> ConnectionStatus {
        let result = self.execute(&TypenameProbe::default()).await;
        if let Err(e) = &result {
            tracing::error!(endpoint = %self.endpoint, error = %e, "backend connection error");
        }
        ConnectionStatus::from_probe(&result)
    }
}

/// 解析 GraphQL 响应体
///
/// `errors` 非空时优先返回错误；无法解析时按状态码区分 HTTP 错误与格式错误。
pub fn decode_response<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ClientError> {
    let parsed: GraphqlResponse<T> = match serde_json::from_str(&resp.body) {
        Ok(parsed) => parsed,
        Err(_) if !resp.ok() => return Err(ClientError::Status { status: resp.status }),
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };

    if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("\n");
        return Err(ClientError::Graphql(message));
    }

    match parsed.data {
        Some(data) => Ok(data),
        None if !resp.ok() => Err(ClientError::Status { status: resp.status }),
        None => Err(ClientError::MissingData),
    }
}

// =========================================================
// 连通性状态 (Connectivity)
// =========================================================

/// 后端连通性指示，仅用于提示，不阻塞任何操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn from_probe<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => ConnectionStatus::Connected,
            Err(_) => ConnectionStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests;
