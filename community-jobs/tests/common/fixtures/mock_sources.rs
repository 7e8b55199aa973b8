//! Wiremock mounts for the external fact/quote/trend APIs.

use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use community_jobs::config::{HeaderAuth, SourceConfig};

/// Source config pointing at a route on a mock server.
pub fn source_for(server: &MockServer, route: &str, field_name: &str) -> SourceConfig {
    SourceConfig {
        url: format!("{}{}", server.uri(), route),
        field_name: field_name.to_string(),
        header: None,
    }
}

/// Keyed-header variant of [`source_for`].
pub fn keyed_source_for(
    server: &MockServer,
    route: &str,
    field_name: &str,
    header_name: &str,
    key: &str,
) -> SourceConfig {
    SourceConfig {
        header: Some(HeaderAuth {
            name: header_name.to_string(),
            value: key.to_string(),
        }),
        ..source_for(server, route, field_name)
    }
}

fn fact_body(field_name: &str, text: &str) -> Value {
    let mut body = Map::new();
    body.insert(field_name.to_string(), Value::String(text.to_string()));
    Value::Object(body)
}

/// Mount a fact endpoint returning the same object payload on every call.
pub async fn mount_fact(server: &MockServer, route: &str, field_name: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(fact_body(field_name, text)))
        .mount(server)
        .await;
}

/// Mount a fact endpoint that requires an API key header.
pub async fn mount_keyed_fact(
    server: &MockServer,
    route: &str,
    field_name: &str,
    text: &str,
    header_name: &str,
    key: &str,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header(header_name, key))
        .respond_with(ResponseTemplate::new(200).set_body_json(fact_body(field_name, text)))
        .mount(server)
        .await;
}

/// Mount a fact endpoint returning a list payload.
pub async fn mount_fact_list(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a failing fact endpoint.
pub async fn mount_fact_failure(server: &MockServer, route: &str, status_code: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status_code))
        .mount(server)
        .await;
}

/// Responder that returns `"<prefix> <n>"` for the n-th call, so every
/// fetch yields a fresh fact.
pub struct NumberedFactResponder {
    field_name: String,
    prefix: String,
    calls: AtomicUsize,
}

impl NumberedFactResponder {
    pub fn new(field_name: &str, prefix: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            prefix: prefix.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for NumberedFactResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let text = format!("{} {}", self.prefix, n);
        ResponseTemplate::new(200).set_body_json(fact_body(&self.field_name, &text))
    }
}

/// Mount a numbered fact endpoint; call n returns `"<prefix> <n>"`.
pub async fn mount_numbered_facts(server: &MockServer, route: &str, field_name: &str, prefix: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(NumberedFactResponder::new(field_name, prefix))
        .mount(server)
        .await;
}

/// Mount a quote-of-the-day endpoint.
pub async fn mount_quote(server: &MockServer, route: &str, quote: &str, author: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": { "quotes": [{ "quote": quote, "author": author, "id": "abc123" }] }
        })))
        .mount(server)
        .await;
}

/// Mount a trends endpoint in the place-list shape.
pub async fn mount_trends(server: &MockServer, route: &str, trends: &[(&str, &str)]) {
    let entries: Vec<Value> = trends
        .iter()
        .map(|(name, url)| json!({ "name": name, "url": url }))
        .collect();
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "trends": entries }])))
        .mount(server)
        .await;
}

/// Mount an on-this-day endpoint with one selection per `(text, url)` pair.
pub async fn mount_on_this_day(server: &MockServer, route: &str, events: &[(&str, &str)]) {
    let selected: Vec<Value> = events
        .iter()
        .map(|(text, url)| {
            json!({
                "text": text,
                "pages": [{ "content_urls": { "desktop": { "page": url } } }]
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "selected": selected })))
        .mount(server)
        .await;
}
