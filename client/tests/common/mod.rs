//! In-process fake of the vendor API and public site.

#![allow(dead_code)]

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower_http::compression::CompressionLayer;

pub const API_KEY: &str = "test-subscription-key";

/// Products served by the fake search endpoint.
pub const TOTAL_PRODUCTS: usize = 71;

/// A request the fake server received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
}

#[derive(Clone, Default)]
struct FakeState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    /// `Content-Encoding` of every response sent, empty when uncompressed.
    encodings: Arc<Mutex<Vec<String>>>,
}

impl FakeState {
    fn record(&self, path: &str, query: Option<String>, headers: &HeaderMap) {
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            query: query.unwrap_or_default(),
            headers: headers.clone(),
        });
    }
}

/// Handle to a running fake server.
pub struct FakeVendor {
    pub base_url: String,
    state: FakeState,
}

impl FakeVendor {
    pub async fn start() -> Self {
        Self::serve(false).await
    }

    /// Like [`FakeVendor::start`], but gzip-compresses responses for
    /// clients that accept it.
    pub async fn start_gzip() -> Self {
        Self::serve(true).await
    }

    async fn serve(gzip: bool) -> Self {
        let state = FakeState::default();
        let mut app = Router::new()
            .route("/", get(site_root))
            .route("/appsettings.js", get(app_settings))
            .route("/sb-api-ecommerce/v1/productsearch/search", get(search))
            .route("/sb-api-ecommerce/v1/sitesearch/site", get(site_search))
            .route(
                "/sb-api-ecommerce/v1/stockbalance/store/{store}/{product}/",
                get(stock_balance),
            )
            .with_state(state.clone());
        if gzip {
            app = app.layer(CompressionLayer::new().gzip(true));
        }
        let app = app.layer(axum::middleware::map_response_with_state(
            state.clone(),
            record_encoding,
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn response_encodings(&self) -> Vec<String> {
        self.state.encodings.lock().unwrap().clone()
    }

    pub fn search_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with("/productsearch/search"))
            .collect()
    }
}

async fn record_encoding(State(state): State<FakeState>, response: Response) -> Response {
    let encoding = response
        .headers()
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.encodings.lock().unwrap().push(encoding);
    response
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("ocp-apim-subscription-key")
        .is_some_and(|key| key == API_KEY)
}

async fn site_root(State(state): State<FakeState>, headers: HeaderMap) -> Html<&'static str> {
    state.record("/", None, &headers);
    Html(
        r#"<!doctype html><html><head><script>
        window.__NEXT_DATA__ = {"runtimeConfig":{"appSettingsFilePath":"~/appsettings.js","locale":"sv-SE"}};
        </script></head><body></body></html>"#,
    )
}

async fn app_settings(State(state): State<FakeState>, headers: HeaderMap) -> &'static str {
    state.record("/appsettings.js", None, &headers);
    "window.AppSettings = Object.freeze({\n  \"ocpApimSubscriptionKey\": \"test-subscription-key\",\n  \"environment\": \"test\"\n});"
}

async fn search(
    State(state): State<FakeState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record("/sb-api-ecommerce/v1/productsearch/search", raw, &headers);

    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing subscription key").into_response();
    }
    if params.get("textQuery").map(String::as_str) == Some("unavailable") {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    if params.get("textQuery").map(String::as_str) == Some("garbage") {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    let size: usize = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(30);
    let page: usize = params.get("page").and_then(|s| s.parse().ok()).unwrap_or(1);

    let start = (page - 1) * size;
    let end = (start + size).min(TOTAL_PRODUCTS);
    let products: Vec<Value> = (start..end)
        .map(|i| {
            json!({
                "productId": format!("{}", 1000 + i),
                "productNumber": format!("{}01", 1000 + i),
                "productNameBold": format!("Product {i}"),
                "price": 99.0 + i as f64,
            })
        })
        .collect();
    let next_page = if end < TOTAL_PRODUCTS { page + 1 } else { 0 };

    Json(json!({
        "metadata": {
            "docCount": products.len(),
            "fullAssortmentDocCount": TOTAL_PRODUCTS,
            "nextPage": next_page,
            "priceRange": {"min": 99.0, "max": 169.0},
        },
        "products": products,
        "filters": [{
            "name": "Country",
            "type": "Term",
            "displayName": "Land",
            "symmary": "Ursprungsland",
            "isMultipleChoice": true,
            "searchModifiers": [{"value": "Frankrike", "count": 12, "isActive": false}],
        }],
    }))
    .into_response()
}

async fn site_search(
    State(state): State<FakeState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record("/sb-api-ecommerce/v1/sitesearch/site", raw, &headers);

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let stores = vec![
        json!({
            "siteId": "0102",
            "alias": "Fältöversten",
            "streetAddress": "Karlaplan 13",
            "displayName": "Stockholm, Karlaplan 13",
            "city": "Stockholm",
            "county": "Stockholms län",
            "isAgent": false,
            "isBlocked": false,
            "blockedText": null,
            "isSvanenCertified": true,
            "isOpen": true,
            "isTastingStore": false,
            "openingHours": [{"date": "2024-06-21", "openFrom": "10:00:00", "openTo": "15:00:00", "reason": null}],
            "position": {"latitude": 59.338, "longitude": 18.091},
        }),
        json!({
            "siteId": "1401",
            "alias": null,
            "displayName": "Göteborg, Nordstan",
            "city": "Göteborg",
            "isAgent": false,
            "position": null,
        }),
    ];

    let stores: Vec<Value> = match params.get("q") {
        Some(q) => stores
            .into_iter()
            .filter(|s| s["city"].as_str().is_some_and(|city| city.contains(q.as_str())))
            .collect(),
        None => stores,
    };

    Json(json!({ "siteSearchResults": stores })).into_response()
}

async fn stock_balance(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((store, product)): Path<(String, String)>,
) -> Response {
    state.record(
        &format!("/sb-api-ecommerce/v1/stockbalance/store/{store}/{product}/"),
        None,
        &headers,
    );

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if product == "0000" {
        return StatusCode::NOT_FOUND.into_response();
    }

    Json(json!({
        "productId": product,
        "storeId": store,
        "stock": 12,
        "shelf": "B7",
        "isInStoreAssortment": true,
    }))
    .into_response()
}
