//! Stock balance types.

use serde::{Deserialize, Serialize};

/// Stock of one product in one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBalance {
    #[serde(rename = "productId")]
    pub product_number: String,
    pub store_id: String,
    #[serde(rename = "stock", default)]
    pub stock_level: i64,
    /// Where in the store the product is shelved.
    #[serde(default)]
    pub shelf: Option<String>,
}
