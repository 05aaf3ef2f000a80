//! Pagination and sorting options.

use crate::params::QueryParams;
use crate::predicate::PredicateSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used when none is given. Also the server's upper bound.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// First page number. Pages are 1-based; 0 means "not yet started".
pub const FIRST_PAGE: u32 = 1;

/// Property search results can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortProperty {
    Score,
    Price,
    Name,
    Volume,
    ProductLaunchDate,
    Vintage,
}

impl SortProperty {
    /// All properties, in declaration order.
    pub const ALL: [SortProperty; 6] = [
        SortProperty::Score,
        SortProperty::Price,
        SortProperty::Name,
        SortProperty::Volume,
        SortProperty::ProductLaunchDate,
        SortProperty::Vintage,
    ];

    /// Vendor spelling of the property.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortProperty::Score => "Score",
            SortProperty::Price => "Price",
            SortProperty::Name => "Name",
            SortProperty::Volume => "Volume",
            SortProperty::ProductLaunchDate => "ProductLaunchDate",
            SortProperty::Vintage => "Vintage",
        }
    }
}

impl fmt::Display for SortProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortProperty {
    type Err = UnknownVariant;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortProperty::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = UnknownVariant;

    /// Case-insensitive; also accepts `asc` and `desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// A string did not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Pagination and sorting for a search. Independent of the predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// Results per page. 0 means [`DEFAULT_PAGE_SIZE`].
    pub page_size: u32,
    /// 1-based page number. 0 means [`FIRST_PAGE`].
    pub page: u32,
    pub sort_by: Option<SortProperty>,
    /// Sent only together with `sort_by`; ascending when unset.
    pub sort_direction: Option<SortDirection>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn sorted_by(mut self, property: SortProperty, direction: SortDirection) -> Self {
        self.sort_by = Some(property);
        self.sort_direction = Some(direction);
        self
    }

    /// Fill in unset page size and page number.
    pub fn with_defaults(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.page == 0 {
            self.page = FIRST_PAGE;
        }
        self
    }

    /// Write `size`, `page` and the sort parameters into `params`.
    ///
    /// Unset page size and page number are written as their defaults.
    pub fn apply(&self, params: &mut QueryParams) {
        let options = self.clone().with_defaults();
        params.set("size", options.page_size.to_string());
        params.set("page", options.page.to_string());

        if let Some(sort_by) = options.sort_by {
            params.set("sortBy", sort_by.as_str());
            params.set(
                "sortDirection",
                options.sort_direction.unwrap_or_default().as_str(),
            );
        }
    }
}

/// Encode options and predicates into the full query the vendor expects.
///
/// Options come first, then predicates in insertion order.
pub fn encode_query(options: &QueryOptions, predicates: &QueryParams) -> QueryParams {
    let mut params = QueryParams::new();
    options.apply(&mut params);
    params.extend_from(predicates);
    params
}

/// Convenience over [`encode_query`] for an unencoded predicate set.
pub fn encode_search(options: &QueryOptions, predicates: &PredicateSet) -> QueryParams {
    encode_query(options, &predicates.encode())
}
