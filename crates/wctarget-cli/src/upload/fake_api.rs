//! In-memory stand-in for the WooCommerce API.
//!
//! Emulates the handful of routes the uploader touches, records every call,
//! and lets a test pin a canned response on any route. Route patterns used
//! for overrides and call counting compare path segments, with `*` matching
//! any single segment (`products/*/variations`). Query strings are ignored
//! for matching.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::{json, Value};
use wctarget_client::{ApiResponse, ClientError, WooApi};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

struct Override {
    method: &'static str,
    pattern: String,
    status: u16,
    body: Value,
}

struct State {
    categories: Vec<(i64, String)>,
    next_id: i64,
    calls: Vec<RecordedCall>,
    overrides: Vec<Override>,
}

pub(crate) struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::with_categories(&[])
    }

    pub(crate) fn with_categories(categories: &[(i64, &str)]) -> Self {
        Self {
            state: Mutex::new(State {
                categories: categories
                    .iter()
                    .map(|(id, name)| (*id, (*name).to_owned()))
                    .collect(),
                next_id: 1000,
                calls: Vec::new(),
                overrides: Vec::new(),
            }),
        }
    }

    /// Answer `method pattern` with `status` and a WooCommerce-style error
    /// body carrying `message`.
    pub(crate) fn fail(&self, method: &'static str, pattern: &str, status: u16, message: &str) {
        self.respond(
            method,
            pattern,
            status,
            json!({"code": "test_error", "message": message, "data": {"status": status}}),
        );
    }

    /// Answer `method pattern` with a fixed response.
    pub(crate) fn respond(&self, method: &'static str, pattern: &str, status: u16, body: Value) {
        self.state.lock().unwrap().overrides.push(Override {
            method,
            pattern: pattern.to_owned(),
            status,
            body,
        });
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// `"METHOD path"` for every call, in order, query strings stripped.
    pub(crate) fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, route(&c.path)))
            .collect()
    }

    pub(crate) fn count(&self, method: &str, pattern: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && matches_pattern(pattern, &c.path))
            .count()
    }

    pub(crate) fn bodies(&self, method: &str, pattern: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && matches_pattern(pattern, &c.path))
            .filter_map(|c| c.body)
            .collect()
    }

    pub(crate) fn category_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .categories
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn handle(&self, method: &'static str, path: &str, body: Option<Value>) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            method,
            path: path.to_owned(),
            body: body.clone(),
        });

        if let Some(o) = state
            .overrides
            .iter()
            .find(|o| o.method == method && matches_pattern(&o.pattern, path))
        {
            return ApiResponse::new(o.status, o.body.to_string());
        }

        let segments: Vec<&str> = route(path).split('/').collect();
        match (method, segments.as_slice()) {
            ("GET", ["products", "categories"]) => {
                let page = query_value(path, "page").unwrap_or(1).max(1);
                let per_page = query_value(path, "per_page").unwrap_or(10);
                let listed: Vec<Value> = state
                    .categories
                    .iter()
                    .skip((page - 1) * per_page)
                    .take(per_page)
                    .map(|(id, name)| json!({"id": id, "name": name, "slug": name.to_lowercase()}))
                    .collect();
                ApiResponse::new(200, Value::Array(listed).to_string())
            }
            ("POST", ["products", "categories"]) => {
                let name = body
                    .as_ref()
                    .and_then(|b| b.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
                let id = next_id(&mut state);
                state.categories.push((id, name.clone()));
                ApiResponse::new(201, json!({"id": id, "name": name}).to_string())
            }
            ("POST", ["products"] | ["products", _, "variations"]) => {
                let id = next_id(&mut state);
                ApiResponse::new(201, json!({"id": id}).to_string())
            }
            ("PUT", ["products", id]) => {
                ApiResponse::new(200, json!({"id": id.parse::<i64>().ok()}).to_string())
            }
            _ => ApiResponse::new(
                404,
                json!({
                    "code": "rest_no_route",
                    "message": "No route was found matching the URL and request method.",
                })
                .to_string(),
            ),
        }
    }
}

impl WooApi for FakeApi {
    async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        Ok(self.handle("GET", path, None))
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body).expect("request body should serialize");
        Ok(self.handle("POST", path, Some(body)))
    }

    async fn put<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body).expect("request body should serialize");
        Ok(self.handle("PUT", path, Some(body)))
    }
}

fn next_id(state: &mut State) -> i64 {
    state.next_id += 1;
    state.next_id
}

fn route(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn query_value(path: &str, key: &str) -> Option<usize> {
    let (_, query) = path.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| v.parse().ok())
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let actual: Vec<&str> = route(path).split('/').collect();
    pattern.len() == actual.len()
        && pattern
            .iter()
            .zip(&actual)
            .all(|(p, a)| *p == "*" || p == a)
}
