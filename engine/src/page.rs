//! One decoded page of search results.

use crate::Record;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default, the same as a missing field.
///
/// Use with `#[serde(default, deserialize_with = "null_as_default")]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A numeric range echoed by the server for the whole result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, deserialize_with = "null_as_default")]
    pub min: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max: f64,
}

/// Metadata block of a result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadata {
    /// Documents on this page, as reported by the server.
    ///
    /// Not guaranteed to equal the number of records actually returned.
    #[serde(rename = "docCount", deserialize_with = "null_as_default")]
    pub document_count: u64,
    /// Documents in the full result set.
    #[serde(rename = "fullAssortmentDocCount", deserialize_with = "null_as_default")]
    pub full_assortment_document_count: u64,
    /// Number of the next page. 0 or absent means there is none.
    #[serde(deserialize_with = "null_as_default")]
    pub next_page: i64,
    pub price_range: Option<Range>,
    pub volume_range: Option<Range>,
    // Misspelled by the vendor.
    #[serde(rename = "alcoholPercantageRange")]
    pub alcohol_percentage_range: Option<Range>,
    pub sugar_content_range: Option<Range>,
    #[serde(rename = "sugarContentGramPer100mlRange")]
    pub sugar_content_gram_per_100ml_range: Option<Range>,
}

impl PageMetadata {
    /// Whether the server announced another page.
    ///
    /// This is the only signal for continuation: record counts say nothing
    /// about whether more pages exist.
    pub fn has_next_page(&self) -> bool {
        self.next_page > 0
    }
}

/// A facet value that can narrow a search further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchModifier {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
    pub subtitle_text: Option<String>,
    pub friendly_url: Option<String>,
}

/// A facet returned alongside the results, describing how to narrow them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    // Misspelled by the vendor.
    #[serde(rename = "symmary")]
    pub summary: Option<String>,
    pub legal_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_multiple_choice: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_subtitle_text_visible: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub search_modifiers: Vec<SearchModifier>,
    pub child: Option<Box<Filter>>,
}

/// One server response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultPage {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: PageMetadata,
    /// Records in server order.
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<Record>,
    #[serde(deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
}

impl ResultPage {
    /// Build a page from records and a next-page number.
    pub fn new(products: Vec<Record>, next_page: i64) -> Self {
        Self {
            metadata: PageMetadata {
                document_count: products.len() as u64,
                next_page,
                ..PageMetadata::default()
            },
            products,
            filters: Vec::new(),
        }
    }

    /// Records actually present on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.products.get(index)
    }

    pub fn has_next_page(&self) -> bool {
        self.metadata.has_next_page()
    }
}
