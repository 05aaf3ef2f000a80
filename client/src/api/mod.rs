//! HTTP client for the vendor API.
//!
//! [`Client`] implements the engine's [`Transport`] for product search and
//! also exposes the store and stock endpoints.

mod stock;
mod stores;

pub use stock::StockBalance;
pub use stores::{Store, StoreOpeningHours, StorePosition};

use crate::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, ORIGIN, PRAGMA};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use sysbol_engine::{
    async_trait, encode_query, Cursor, PredicateSet, QueryOptions, QueryParams, ResultPage,
    Transport,
};
use tracing::{debug, error};

/// Production API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api-extern.systembolaget.se";

/// Origin the vendor frontend sends; the API rejects requests without it.
pub const SITE_ORIGIN: &str = "https://www.systembolaget.se";

const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
const SEARCH_PATH: &str = "/sb-api-ecommerce/v1/productsearch/search";
const SITE_SEARCH_PATH: &str = "/sb-api-ecommerce/v1/sitesearch/site";
const STOCK_PATH: &str = "/sb-api-ecommerce/v1/stockbalance/store";

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    user_agent: Option<String>,
    proxy: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Use another API host, e.g. a local test server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send every request through this proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Per-request timeout. No timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| ClientError::Credentials("API key is not a valid header value".into()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
        headers.insert(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(HeaderName::from_static(SUBSCRIPTION_KEY_HEADER), key);

        // gzip is negotiated and decoded by reqwest itself.
        let mut builder = reqwest::Client::builder().default_headers(headers).gzip(true);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(proxy) = self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::BadRequest(format!("invalid base URL: {e}")))?;

        Ok(Client {
            http: builder.build()?,
            base_url,
        })
    }
}

/// Authenticated client for the vendor API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Client for the production API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: None,
            proxy: None,
            timeout: None,
        }
    }

    /// Fetch a single page of search results.
    pub async fn search_page(
        &self,
        predicates: &PredicateSet,
        options: &QueryOptions,
    ) -> Result<ResultPage> {
        Ok(Transport::search(self, options, &predicates.encode()).await?)
    }

    /// A cursor over every result of a search, borrowing this client.
    pub fn search_with_cursor(
        &self,
        predicates: PredicateSet,
        options: QueryOptions,
    ) -> Cursor<&Client> {
        Cursor::new(self, predicates, options)
    }

    /// Search stores by name or location. An empty query lists all stores.
    pub async fn search_stores(&self, query: &str, include_predictions: bool) -> Result<Vec<Store>> {
        let mut params = QueryParams::new();
        params.set("includePredictions", include_predictions.to_string());
        if !query.is_empty() {
            params.set("q", query);
        }

        let response: stores::SiteSearchResponse =
            self.get_json(SITE_SEARCH_PATH, Some(&params)).await?;
        Ok(response.site_search_results)
    }

    /// Every store.
    pub async fn stores(&self) -> Result<Vec<Store>> {
        self.search_stores("", true).await
    }

    /// Stock of one product in one store.
    pub async fn stock_balance(&self, store_id: &str, product_number: &str) -> Result<StockBalance> {
        if store_id.is_empty() || product_number.is_empty() {
            return Err(ClientError::BadRequest(
                "store id and product number are required".into(),
            ));
        }
        let path = format!("{STOCK_PATH}/{store_id}/{product_number}/");
        Ok(self.get_json(&path, None).await?)
    }

    fn url(&self, path: &str, query: Option<&QueryParams>) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        if let Some(query) = query {
            url.set_query(Some(&query.encode()));
        }
        url
    }

    /// GET `path` and decode a JSON body. Non-200 is an error; no retries.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> sysbol_engine::Result<T> {
        let url = self.url(path, query);
        debug!(url = %url, "performing request");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            error!(url = %url, error = %e, "request failed");
            sysbol_engine::Error::transport(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(url = %url, status = status.as_u16(), "got unexpected status code");
            return Err(sysbol_engine::Error::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!(url = %url, error = %e, "failed to read body");
            sysbol_engine::Error::transport(e)
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            error!(url = %url, error = %e, "failed to decode body");
            sysbol_engine::Error::from(e)
        })
    }
}

#[async_trait]
impl Transport for Client {
    async fn search(
        &self,
        options: &QueryOptions,
        predicates: &QueryParams,
    ) -> sysbol_engine::Result<ResultPage> {
        let query = encode_query(options, predicates);
        let page: ResultPage = self.get_json(SEARCH_PATH, Some(&query)).await?;
        debug!(
            records = page.len(),
            doc_count = page.metadata.document_count,
            next_page = page.metadata.next_page,
            "got results"
        );
        Ok(page)
    }
}
