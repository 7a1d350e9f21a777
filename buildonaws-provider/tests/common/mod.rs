//! In-memory OpenSearch stand-in served through wiremock.

#![allow(dead_code)]

use buildonaws_provider::{BuildOnAwsProvider, ConfiguredProvider, ProviderConfig};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const INDEX: &str = "buildonaws";

#[derive(Default)]
struct Store {
    next_id: u64,
    docs: Vec<(String, Map<String, Value>)>,
}

impl Store {
    fn position(&self, id: &str) -> Option<usize> {
        self.docs.iter().position(|(doc_id, _)| doc_id == id)
    }
}

/// Answers the document, search and ping calls the provider makes, keeping
/// documents in insertion order.
#[derive(Clone, Default)]
pub struct FakeOpenSearch {
    store: Arc<Mutex<Store>>,
}

impl FakeOpenSearch {
    /// Start a server backed by a fresh store.
    pub async fn start() -> (MockServer, FakeOpenSearch) {
        let server = MockServer::start().await;
        let fake = FakeOpenSearch::default();

        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;

        (server, fake)
    }

    /// Store a document directly, bypassing the provider.
    pub fn seed(&self, id: &str, source: Value) {
        let mut store = self.store.lock().unwrap();
        let source = source.as_object().cloned().unwrap_or_default();
        store.docs.push((id.to_string(), source));
    }

    /// Source of a stored document.
    pub fn source(&self, id: &str) -> Option<Value> {
        let store = self.store.lock().unwrap();
        store
            .position(id)
            .map(|i| Value::Object(store.docs[i].1.clone()))
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.store.lock().unwrap().docs.len()
    }

    fn index(&self, body: Value) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id = format!("char-{:04}", store.next_id);
        store
            .docs
            .push((id.clone(), body.as_object().cloned().unwrap_or_default()));

        ResponseTemplate::new(201).set_body_json(json!({
            "_index": INDEX,
            "_id": id,
            "_version": 1,
            "result": "created"
        }))
    }

    fn get(&self, id: &str) -> ResponseTemplate {
        let store = self.store.lock().unwrap();
        match store.position(id) {
            Some(i) => ResponseTemplate::new(200).set_body_json(json!({
                "_index": INDEX,
                "_id": id,
                "found": true,
                "_source": store.docs[i].1
            })),
            None => ResponseTemplate::new(404).set_body_json(json!({
                "_index": INDEX,
                "_id": id,
                "found": false
            })),
        }
    }

    fn update(&self, id: &str, body: Value) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        let Some(i) = store.position(id) else {
            return ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "type": "document_missing_exception",
                    "reason": format!("[{}]: document missing", id)
                },
                "status": 404
            }));
        };

        if let Some(patch) = body.get("doc").and_then(Value::as_object) {
            for (key, value) in patch {
                store.docs[i].1.insert(key.clone(), value.clone());
            }
        }

        ResponseTemplate::new(200).set_body_json(json!({
            "_index": INDEX,
            "_id": id,
            "result": "updated"
        }))
    }

    fn delete(&self, id: &str) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        match store.position(id) {
            Some(i) => {
                store.docs.remove(i);
                ResponseTemplate::new(200).set_body_json(json!({
                    "_index": INDEX,
                    "_id": id,
                    "result": "deleted"
                }))
            }
            None => ResponseTemplate::new(404).set_body_json(json!({
                "_index": INDEX,
                "_id": id,
                "result": "not_found"
            })),
        }
    }

    fn search(&self, body: Value) -> ResponseTemplate {
        let store = self.store.lock().unwrap();
        let identity = body
            .pointer("/query/match/identity")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let hits: Vec<Value> = store
            .docs
            .iter()
            .filter(|(_, source)| source.get("identity").and_then(Value::as_str) == Some(identity))
            .map(|(id, source)| {
                json!({
                    "_index": INDEX,
                    "_id": id,
                    "_score": 1.0,
                    "_source": source
                })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": 1.0,
                "hits": hits
            }
        }))
    }
}

impl Respond for FakeOpenSearch {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let segments: Vec<&str> = request
            .url
            .path()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("HEAD", []) => ResponseTemplate::new(200).insert_header("x-opensearch-fake", "1"),
            ("POST", [INDEX, "_doc"]) => self.index(body),
            ("GET", [INDEX, "_doc", id]) => self.get(id),
            ("DELETE", [INDEX, "_doc", id]) => self.delete(id),
            ("POST", [INDEX, "_update", id]) => self.update(id, body),
            ("POST" | "GET", [INDEX, "_search"]) => self.search(body),
            _ => ResponseTemplate::new(400).set_body_json(json!({
                "error": format!("no handler found for uri [{}]", request.url.path()),
                "status": 400
            })),
        }
    }
}

/// Configure the provider against a running server.
pub async fn configure(server: &MockServer) -> ConfiguredProvider {
    let config = ProviderConfig::new().with_backend_address(server.uri());
    BuildOnAwsProvider::default()
        .configure(&config)
        .await
        .expect("provider should configure against the fake backend")
}
