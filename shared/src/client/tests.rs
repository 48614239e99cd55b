use super::*;
use crate::protocol::{CreateGroup, CreateGroupInput, MyGroups, RemoveGroupMember};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct TestContext {
    /// Requests seen by the transport, in order
    sent: RefCell<Vec<HttpRequest>>,
    /// Scripted replies, consumed front to back
    replies: RefCell<VecDeque<Result<HttpResponse, ClientError>>>,
}

impl TestContext {
    fn reply(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(ClientError::Network(message.to_string())));
    }
}

struct ScriptedTransport {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.ctx.sent.borrow_mut().push(req);
        self.ctx
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted reply".to_string())))
    }
}

fn client(token: Option<&str>) -> (GatewayClient<ScriptedTransport, StaticToken>, Rc<TestContext>) {
    let ctx = Rc::new(TestContext::default());
    let client = GatewayClient::new(
        "http://localhost:4000/graphql",
        ScriptedTransport { ctx: ctx.clone() },
        StaticToken(token.map(str::to_string)),
    );
    (client, ctx)
}

const MY_GROUPS_BODY: &str = r#"{"data":{"myGroups":[
    {"id":"g1","name":"Math 101","description":"","members":[]},
    {"id":"g2","name":"Chemistry","description":"Lab work","members":[
        {"id":"m1","role":"GROUP_LEADER","user":{"id":"s1","firstName":"Sam","lastName":"Lee","email":"sam@school.edu"}}
    ]}
]}}"#;

// =========================================================
// Request Construction
// =========================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let (client, ctx) = client(Some("jwt-abc"));
    ctx.reply(200, MY_GROUPS_BODY);

    client.execute(&MyGroups {}).await.unwrap();

    let sent = ctx.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "http://localhost:4000/graphql");
    assert_eq!(sent[0].header("authorization"), Some("Bearer jwt-abc"));
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
    assert!(sent[0].body.contains("\"operationName\":\"GetTeacherGroups\""));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let (client, ctx) = client(None);
    ctx.reply(200, r#"{"data":{"__typename":"Query"}}"#);

    assert_eq!(client.probe().await, ConnectionStatus::Connected);
    assert_eq!(ctx.sent.borrow()[0].header("authorization"), None);

    let (client, _) = self::client(Some(""));
    let req = client.build_request(&MyGroups {}).unwrap();
    assert_eq!(req.header("authorization"), None);
}

// =========================================================
// Response Decoding
// =========================================================

#[tokio::test]
async fn created_group_with_empty_description_renders_placeholder() {
    let (client, ctx) = client(Some("jwt-abc"));
    ctx.reply(
        200,
        r#"{"data":{"createGroup":{"id":"g1","name":"Math 101","description":""}}}"#,
    );
    ctx.reply(200, MY_GROUPS_BODY);

    let created = client
        .execute(&CreateGroup {
            create_group_input: CreateGroupInput {
                name: "Math 101".to_string(),
                description: String::new(),
            },
        })
        .await
        .unwrap()
        .create_group;

    let groups = client.execute(&MyGroups {}).await.unwrap().my_groups;
    let listed = groups.iter().find(|g| g.id == created.id).unwrap();
    assert_eq!(listed.name, "Math 101");
    assert_eq!(listed.description_or_default(), "No description");
}

#[tokio::test]
async fn repeated_reads_yield_identical_lists() {
    let (client, ctx) = client(Some("jwt-abc"));
    ctx.reply(200, MY_GROUPS_BODY);
    ctx.reply(200, MY_GROUPS_BODY);

    let first = client.execute(&MyGroups {}).await.unwrap().my_groups;
    let second = client.execute(&MyGroups {}).await.unwrap().my_groups;
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn graphql_errors_surface_verbatim() {
    let (client, ctx) = client(Some("jwt-abc"));
    ctx.reply(
        200,
        r#"{"data":null,"errors":[{"message":"Network error"}]}"#,
    );

    let err = client
        .execute(&RemoveGroupMember {
            group_id: "g1".to_string(),
            user_id: "s1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Network error");
}

#[tokio::test]
async fn multiple_errors_are_joined_by_newline() {
    let (client, ctx) = client(Some("jwt-abc"));
    ctx.reply(
        400,
        r#"{"errors":[{"message":"Forbidden resource"},{"message":"Unauthorized"}]}"#,
    );

    let err = client.execute(&MyGroups {}).await.unwrap_err();
    assert_eq!(err, ClientError::Graphql("Forbidden resource\nUnauthorized".to_string()));
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    let (client, ctx) = client(None);
    ctx.fail("Failed to fetch");

    let err = client.execute(&MyGroups {}).await.unwrap_err();
    assert_eq!(err.to_string(), "Network error: Failed to fetch");
}

#[tokio::test]
async fn probe_reports_error_when_backend_is_down() {
    let (client, ctx) = client(None);
    ctx.fail("connection refused");
    assert_eq!(client.probe().await, ConnectionStatus::Error);
}

#[test]
fn non_graphql_failure_maps_to_status() {
    let resp = HttpResponse {
        status: 502,
        body: "<html>Bad Gateway</html>".to_string(),
    };
    let err = decode_response::<serde_json::Value>(&resp).unwrap_err();
    assert_eq!(err, ClientError::Status { status: 502 });

    let resp = HttpResponse {
        status: 200,
        body: "{}".to_string(),
    };
    let err = decode_response::<serde_json::Value>(&resp).unwrap_err();
    assert_eq!(err, ClientError::MissingData);
}

#[test]
fn default_status_is_checking() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Checking);
}
