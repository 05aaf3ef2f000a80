//! The boundary to whatever performs the actual search request.

use crate::error::Result;
use crate::{QueryOptions, QueryParams, ResultPage};
use async_trait::async_trait;
use std::sync::Arc;

/// Performs one authenticated search request and decodes the response.
///
/// Implementations assemble the URL (see [`encode_query`](crate::encode_query)),
/// inject credentials and map every failure into [`Error`](crate::Error).
/// They must not retry and must be safe to share between cursors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the page described by `options` for the encoded predicates.
    async fn search(&self, options: &QueryOptions, predicates: &QueryParams) -> Result<ResultPage>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn search(&self, options: &QueryOptions, predicates: &QueryParams) -> Result<ResultPage> {
        (**self).search(options, predicates).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn search(&self, options: &QueryOptions, predicates: &QueryParams) -> Result<ResultPage> {
        (**self).search(options, predicates).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn search(&self, options: &QueryOptions, predicates: &QueryParams) -> Result<ResultPage> {
        (**self).search(options, predicates).await
    }
}
