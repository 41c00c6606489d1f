//! Shared fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use nativex_web::config::{AppConfig, Environment};
use nativex_web::content::{ContentFetcher, ContentItem, FetchError, StoryQuery};
use nativex_web::HttpServer;

pub const STORY_ID: &str = "5c8f";
pub const CANONICAL_HOST: &str = "www.example.com";
pub const CANONICAL_URL: &str = "http://www.example.com/story/5c8f";

/// Story payload as the content API returns it.
pub fn story_json(image: Option<&str>) -> Value {
    json!({
        "id": STORY_ID,
        "url": CANONICAL_URL,
        "path": "/story/5c8f",
        "title": "Ten Ways To Save",
        "teaser": "Practical tips",
        "body": "<p>Story body</p>",
        "primaryImage": image.map(|src| json!({ "id": "img1", "src": src })),
        "publishedAt": 1556712000000i64,
        "updatedAt": 1556785800000i64,
        "publisher": { "id": "pub1", "name": "Example Daily" },
        "advertiser": { "id": "adv1", "name": "Acme" }
    })
}

pub fn story(image: Option<&str>) -> ContentItem {
    serde_json::from_value(story_json(image)).unwrap()
}

/// In-memory content source recording every query it receives.
#[derive(Default)]
pub struct FixtureFetcher {
    stories: HashMap<String, ContentItem>,
    fail_status: Option<u16>,
    pub queries: Mutex<Vec<StoryQuery>>,
}

impl FixtureFetcher {
    pub fn with_story(item: ContentItem) -> Self {
        let mut stories = HashMap::new();
        stories.insert(item.id.clone(), item);
        Self {
            stories,
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn last_query(&self) -> Option<StoryQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentFetcher for FixtureFetcher {
    async fn fetch_story(&self, query: &StoryQuery) -> Result<ContentItem, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(status) = self.fail_status {
            return Err(FetchError::Status(status));
        }
        self.stories
            .get(&query.id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(query.id.clone()))
    }
}

pub fn config(environment: Environment) -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = environment;
    config
}

pub fn server(environment: Environment, fetcher: Arc<FixtureFetcher>) -> HttpServer {
    HttpServer::new(config(environment), fetcher).unwrap()
}

pub fn get(uri: &str, host: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(host) = host {
        builder = builder.header("host", host);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A request received by the mock content API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

/// Start a mock GraphQL endpoint at `/graphql` answering with `respond`.
pub async fn start_graphql_backend<F>(respond: F) -> (String, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn(&Value) -> (StatusCode, Value) + Clone + Send + Sync + 'static,
{
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    let app = Router::new().route(
        "/graphql",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let log = log.clone();
            let respond = respond.clone();
            async move {
                let (status, payload) = respond(&body);
                log.lock().unwrap().push(RecordedRequest { headers, body });
                (status, Json(payload))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/graphql"), recorded)
}
