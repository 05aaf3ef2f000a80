//! Search predicates.
//!
//! A [`Predicate`] is one filter dimension of a product search. Each variant
//! knows which vendor parameters it writes and whether it overwrites them
//! (range and hierarchy filters) or adds to them (multi-valued filters such as
//! origin country, which may be given several times to express an OR-set).
//!
//! Predicates are plain values: they serialize as tagged JSON objects, which is
//! how a [`PredicateSet`] is logged and loaded from configuration.

use crate::params::QueryParams;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Date format used by the product launch filter.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single search constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Products in a specific store's assortment.
    Store { id: String },
    /// Free-text query.
    Text { query: String },
    /// Body from 0 (thin) to 12 (full).
    TasteClockBody { min: i64, max: i64 },
    /// Bitterness from 0 (not bitter) to 12 (very bitter).
    TasteClockBitterness { min: i64, max: i64 },
    /// Sweetness from 0 (not sweet) to 12 (very sweet).
    TasteClockSweetness { min: i64, max: i64 },
    /// Smokiness from 0 (not smoky) to 12 (very smoky).
    TasteClockSmokiness { min: i64, max: i64 },
    /// Vintage year. Multi-valued.
    Vintage { year: i64 },
    /// Product launch date range.
    ProductLaunch { min: NaiveDate, max: NaiveDate },
    AlcoholPercentage { min: i64, max: i64 },
    /// Sugar content in grams per 100 ml.
    SugarContent { min: f32, max: f32 },
    /// Grape variety. Multi-valued.
    Grapes { name: String },
    /// Food or occasion match such as "Aperitif" or "Kött". Multi-valued.
    TasteMatch { tag: String },
    /// Assortment such as "Fast sortiment". Multi-valued.
    Assortment { tag: String },
    /// Seal such as "A-koppling". Multi-valued.
    Seal { name: String },
    /// Volume in millilitres.
    Volume { min: i64, max: i64 },
    /// Packaging such as "Flaska" + "Glasflaska".
    Packaging {
        category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subcategory: Option<String>,
    },
    /// Price in whole SEK.
    Price { min: i64, max: i64 },
    /// Country of origin. Multi-valued.
    Origin { country: String },
    /// Product category such as "Öl" + "Ljus lager" + "Internationell stil".
    ///
    /// The third level is multi-valued; repeat the predicate with the same
    /// first two levels to select several sub-subcategories.
    Category {
        category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subcategory: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subsubcategory: Option<String>,
    },
}

impl Predicate {
    pub fn store(id: impl Into<String>) -> Self {
        Predicate::Store { id: id.into() }
    }

    pub fn text(query: impl Into<String>) -> Self {
        Predicate::Text {
            query: query.into(),
        }
    }

    pub fn taste_clock_body(min: i64, max: i64) -> Self {
        Predicate::TasteClockBody { min, max }
    }

    pub fn taste_clock_bitterness(min: i64, max: i64) -> Self {
        Predicate::TasteClockBitterness { min, max }
    }

    pub fn taste_clock_sweetness(min: i64, max: i64) -> Self {
        Predicate::TasteClockSweetness { min, max }
    }

    pub fn taste_clock_smokiness(min: i64, max: i64) -> Self {
        Predicate::TasteClockSmokiness { min, max }
    }

    pub fn vintage(year: i64) -> Self {
        Predicate::Vintage { year }
    }

    pub fn product_launch(min: NaiveDate, max: NaiveDate) -> Self {
        Predicate::ProductLaunch { min, max }
    }

    pub fn alcohol_percentage(min: i64, max: i64) -> Self {
        Predicate::AlcoholPercentage { min, max }
    }

    pub fn sugar_content(min: f32, max: f32) -> Self {
        Predicate::SugarContent { min, max }
    }

    pub fn grapes(name: impl Into<String>) -> Self {
        Predicate::Grapes { name: name.into() }
    }

    pub fn taste_match(tag: impl Into<String>) -> Self {
        Predicate::TasteMatch { tag: tag.into() }
    }

    pub fn assortment(tag: impl Into<String>) -> Self {
        Predicate::Assortment { tag: tag.into() }
    }

    pub fn seal(name: impl Into<String>) -> Self {
        Predicate::Seal { name: name.into() }
    }

    pub fn volume(min: i64, max: i64) -> Self {
        Predicate::Volume { min, max }
    }

    /// Packaging filter. Pass `None` to filter by category only.
    pub fn packaging(category: impl Into<String>, subcategory: Option<&str>) -> Self {
        Predicate::Packaging {
            category: category.into(),
            subcategory: subcategory.map(str::to_string),
        }
    }

    pub fn price(min: i64, max: i64) -> Self {
        Predicate::Price { min, max }
    }

    pub fn origin(country: impl Into<String>) -> Self {
        Predicate::Origin {
            country: country.into(),
        }
    }

    /// Category filter. A sub-subcategory is ignored without a subcategory.
    pub fn category(
        category: impl Into<String>,
        subcategory: Option<&str>,
        subsubcategory: Option<&str>,
    ) -> Self {
        Predicate::Category {
            category: category.into(),
            subcategory: subcategory.map(str::to_string),
            subsubcategory: subsubcategory.map(str::to_string),
        }
    }

    /// Whether supplying this predicate again adds values instead of
    /// replacing them.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            Predicate::Vintage { .. }
                | Predicate::Grapes { .. }
                | Predicate::TasteMatch { .. }
                | Predicate::Assortment { .. }
                | Predicate::Seal { .. }
                | Predicate::Origin { .. }
        )
    }

    /// Write this predicate's parameters into `params`.
    pub fn apply(&self, params: &mut QueryParams) {
        match self {
            Predicate::Store { id } => params.set("storeId", id.as_str()),
            Predicate::Text { query } => params.set("textQuery", query.as_str()),
            Predicate::TasteClockBody { min, max } => {
                set_range(params, "tasteClockBody", min, max)
            }
            Predicate::TasteClockBitterness { min, max } => {
                set_range(params, "tasteClockBitter", min, max)
            }
            Predicate::TasteClockSweetness { min, max } => {
                set_range(params, "tasteClockSweetness", min, max)
            }
            Predicate::TasteClockSmokiness { min, max } => {
                set_range(params, "tasteClockSmokiness", min, max)
            }
            Predicate::Vintage { year } => params.append("vintage", year.to_string()),
            Predicate::ProductLaunch { min, max } => set_range(
                params,
                "productLaunch",
                min.format(DATE_FORMAT),
                max.format(DATE_FORMAT),
            ),
            Predicate::AlcoholPercentage { min, max } => {
                set_range(params, "alcoholPercentage", min, max)
            }
            Predicate::SugarContent { min, max } => {
                params.set("sugarContentGramPer100ml.min", format!("{:.2}", min));
                params.set("sugarContentGramPer100ml.max", format!("{:.2}", max));
            }
            Predicate::Grapes { name } => params.append("grapes", name.as_str()),
            Predicate::TasteMatch { tag } => params.append("tasteSymbols", tag.as_str()),
            Predicate::Assortment { tag } => params.append("assortmentText", tag.as_str()),
            Predicate::Seal { name } => params.append("seal", name.as_str()),
            Predicate::Volume { min, max } => set_range(params, "volume", min, max),
            Predicate::Packaging {
                category,
                subcategory,
            } => {
                params.set("packagingLevel1", category.as_str());
                if let Some(subcategory) = subcategory {
                    params.set("packagingLevel2", subcategory.as_str());
                }
            }
            Predicate::Price { min, max } => set_range(params, "price", min, max),
            Predicate::Origin { country } => params.append("country", country.as_str()),
            Predicate::Category {
                category,
                subcategory,
                subsubcategory,
            } => {
                params.set("categoryLevel1", category.as_str());
                if let Some(subcategory) = subcategory {
                    params.set("categoryLevel2", subcategory.as_str());
                    if let Some(subsubcategory) = subsubcategory {
                        params.append("categoryLevel3", subsubcategory.as_str());
                    }
                }
            }
        }
    }
}

fn set_range(params: &mut QueryParams, field: &str, min: impl Display, max: impl Display) {
    params.set(&format!("{field}.min"), min.to_string());
    params.set(&format!("{field}.max"), max.to_string());
}

/// An ordered collection of predicates forming one search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Create an empty set, which matches the full assortment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate (builder style).
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Apply every predicate to `params`, in insertion order.
    pub fn apply(&self, params: &mut QueryParams) {
        for predicate in &self.predicates {
            predicate.apply(params);
        }
    }

    /// Encode the set into a fresh parameter map.
    pub fn encode(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.apply(&mut params);
        params
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl Extend<Predicate> for PredicateSet {
    fn extend<I: IntoIterator<Item = Predicate>>(&mut self, iter: I) {
        self.predicates.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}
