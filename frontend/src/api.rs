//! 浏览器端 API 入口
//!
//! `FetchTransport` 用 gloo-net 实现共享层的 [`Transport`]，
//! `ApiHandle` 在其上区分读（query）与写（mutate），写成功后发布失效主题。

use classroom_shared::ClientError;
use classroom_shared::client::{
    ConnectionStatus, GatewayClient, HttpRequest, HttpResponse, Transport,
};
use classroom_shared::protocol::GraphqlOperation;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::AuthContext;
use crate::sync::InvalidationBus;

/// 基于 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = Request::post(&req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let res = builder
            .body(req.body)
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

pub type Api = GatewayClient<FetchTransport, AuthContext>;

/// 组件持有的 API 句柄
#[derive(Clone, Copy)]
pub struct ApiHandle {
    client: StoredValue<Api>,
    bus: InvalidationBus,
}

impl ApiHandle {
    pub fn new(endpoint: &str, auth: AuthContext, bus: InvalidationBus) -> Self {
        tracing::info!(endpoint, "api gateway configured");
        Self {
            client: StoredValue::new(GatewayClient::new(endpoint, FetchTransport, auth)),
            bus,
        }
    }

    /// 读操作
    pub async fn query<Op: GraphqlOperation>(&self, op: &Op) -> Result<Op::Response, ClientError> {
        let client = self.client.get_value();
        client.execute(op).await
    }

    /// 写操作：成功后使 `Op::INVALIDATES` 中的读视图重新拉取
    pub async fn mutate<Op: GraphqlOperation>(&self, op: &Op) -> Result<Op::Response, ClientError> {
        let client = self.client.get_value();
        let result = client.execute(op).await;
        self.bus.publish_if_ok(Op::INVALIDATES, result)
    }

    /// 后端连通性探测
    pub async fn probe(&self) -> ConnectionStatus {
        let client = self.client.get_value();
        client.probe().await
    }

    /// 挂载一个读视图
    ///
    /// 立即查询一次；之后每当 `Op::TOPIC` 被发布就重新查询。
    /// 重新查询期间保留上一次的数据，只采用最后一次发出的查询结果。
    pub fn watch<Op, T>(&self, op: Op, select: fn(Op::Response) -> T) -> QueryState<T>
    where
        Op: GraphqlOperation + Clone + 'static,
        T: Send + Sync + 'static,
    {
        let api = *self;
        let state = QueryState::new();

        Effect::new(move |_| {
            if let Some(topic) = Op::TOPIC {
                api.bus.track(topic);
            }

            let op = op.clone();
            let ticket = state.begin();
            spawn_local(async move {
                let result = api.query(&op).await.map(select);
                if !state.settle(ticket, result) {
                    tracing::debug!(operation = Op::NAME, ticket, "stale query result dropped");
                }
            });
        });

        state
    }
}

// ============================================================================
// 查询状态
// ============================================================================

/// 一次查询在组件内的镜像
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// 最近一次发出的查询序号
    latest: StoredValue<u64>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            latest: StoredValue::new(0),
        }
    }

    /// 发出一次查询，返回其序号
    fn begin(&self) -> u64 {
        let ticket = self.latest.get_value() + 1;
        self.latest.set_value(ticket);
        self.loading.set(true);
        ticket
    }

    /// 写入查询结果；序号已过期或视图已卸载时丢弃并返回 `false`
    fn settle(&self, ticket: u64, result: Result<T, ClientError>) -> bool {
        if self.latest.try_get_value() != Some(ticket) {
            return false;
        }
        match result {
            Ok(data) => {
                self.data.set(Some(data));
                self.error.set(None);
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
        self.loading.set(false);
        true
    }

    /// 首次加载中（尚无数据）
    pub fn is_initial_loading(&self) -> bool {
        self.loading.get() && self.data.with(Option::is_none)
    }
}

impl<T: Clone + Send + Sync + 'static> QueryState<T> {
    /// 当前数据的快照
    pub fn get(&self) -> Option<T> {
        self.data.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_query_wins_over_slower_earlier_one() {
        let owner = Owner::new();
        owner.with(|| {
            let state = QueryState::<Vec<&'static str>>::new();
            let first = state.begin();
            let second = state.begin();

            assert!(state.settle(second, Ok(vec!["Ada"])));
            assert!(!state.settle(first, Ok(vec!["Ada", "Grace"])));

            assert_eq!(state.data.get_untracked(), Some(vec!["Ada"]));
            assert!(!state.loading.get_untracked());
        });
    }

    #[test]
    fn outdated_result_keeps_loading_until_latest_arrives() {
        let owner = Owner::new();
        owner.with(|| {
            let state = QueryState::<u32>::new();
            let first = state.begin();
            let second = state.begin();

            assert!(!state.settle(first, Err(ClientError::Network("offline".to_string()))));
            assert!(state.loading.get_untracked());
            assert!(state.error.get_untracked().is_none());

            assert!(state.settle(second, Ok(7)));
            assert_eq!(state.data.get_untracked(), Some(7));
            assert!(!state.loading.get_untracked());
        });
    }

    #[test]
    fn error_keeps_previous_data() {
        let owner = Owner::new();
        owner.with(|| {
            let state = QueryState::<u32>::new();
            let ticket = state.begin();
            state.settle(ticket, Ok(1));

            let ticket = state.begin();
            assert!(state.settle(ticket, Err(ClientError::Graphql("Forbidden".to_string()))));

            assert_eq!(state.data.get_untracked(), Some(1));
            assert_eq!(state.error.get_untracked().as_deref(), Some("Forbidden"));
            assert!(!state.is_initial_loading());
        });
    }
}
