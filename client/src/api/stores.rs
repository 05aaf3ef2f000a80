//! Store search types.

use serde::{Deserialize, Serialize};
use sysbol_engine::page::null_as_default;

/// A physical store or agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Store {
    #[serde(deserialize_with = "null_as_default")]
    pub site_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alias: String,
    #[serde(deserialize_with = "null_as_default")]
    pub street_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub county: String,
    pub is_agent: bool,
    pub is_blocked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub blocked_text: String,
    pub is_svanen_certified: bool,
    pub is_open: bool,
    pub is_tasting_store: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub opening_hours: Vec<StoreOpeningHours>,
    pub position: Option<StorePosition>,
}

/// Opening hours for one day. Times are local, as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreOpeningHours {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_to: String,
    /// Why the store deviates from its regular hours, if it does.
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StorePosition {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SiteSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_search_results: Vec<Store>,
}
