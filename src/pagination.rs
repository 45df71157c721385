// src/pagination.rs
//! Cursor pagination over list endpoints.
//!
//! A [`ResultPage`] is one immutable response; the next page is requested
//! with the [`Pagination`] it hands out. [`paginate`] and [`collect_all`]
//! drive that loop for callers who want every item.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::ClientError;
use crate::types::ValidationError;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::{Map, Value};
use std::future::Future;

/// Page size and start cursor for one request. Both default to "let the API
/// decide" and are left off the wire when unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    page_size: Option<u32>,
    start_cursor: Option<String>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size, which the API caps at 100.
    pub fn with_page_size(mut self, size: u32) -> Result<Self, ValidationError> {
        if !(1..=NOTION_API_PAGE_SIZE).contains(&size) {
            return Err(ValidationError::OutOfBounds {
                value: size,
                min: 1,
                max: NOTION_API_PAGE_SIZE,
            });
        }
        self.page_size = Some(size);
        Ok(self)
    }

    pub fn starting_at(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn start_cursor(&self) -> Option<&str> {
        self.start_cursor.as_deref()
    }

    /// Query-string form, for GET endpoints.
    pub(crate) fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(cursor) = &self.start_cursor {
            params.push(("start_cursor".to_string(), cursor.clone()));
        }
        if let Some(size) = self.page_size {
            params.push(("page_size".to_string(), size.to_string()));
        }
        params
    }

    /// Body form, for POST endpoints such as database queries.
    pub(crate) fn write_body(&self, body: &mut Map<String, Value>) {
        if let Some(cursor) = &self.start_cursor {
            body.insert("start_cursor".to_string(), Value::from(cursor.as_str()));
        }
        if let Some(size) = self.page_size {
            body.insert("page_size".to_string(), Value::from(size));
        }
    }
}

/// One page of results from a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> ResultPage<T> {
    /// True when no further page can be requested.
    pub fn is_last(&self) -> bool {
        !self.has_more || self.next_cursor.is_none()
    }

    /// Pagination for the page after this one, keeping the page size of the
    /// request that produced it. `None` when this is the last page.
    pub fn next_pagination(&self, previous: &Pagination) -> Option<Pagination> {
        if self.is_last() {
            return None;
        }
        self.next_cursor.as_ref().map(|cursor| Pagination {
            page_size: previous.page_size,
            start_cursor: Some(cursor.clone()),
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            results: self.results.into_iter().map(f).collect(),
            has_more: self.has_more,
            next_cursor: self.next_cursor,
        }
    }
}

/// Lazily walks every page, yielding items in order.
///
/// Pages are fetched one at a time, only when the consumer gets past the
/// previous page's items. The first error ends the stream.
pub fn paginate<T, F, Fut>(
    initial: Pagination,
    fetch: F,
) -> impl Stream<Item = Result<T, ClientError>>
where
    F: FnMut(Pagination) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>, ClientError>>,
{
    stream::try_unfold(
        (Some(initial), fetch),
        |(next, mut fetch)| async move {
            let Some(pagination) = next else {
                return Ok::<_, ClientError>(None);
            };
            let page = fetch(pagination.clone()).await?;
            log::debug!(
                "Fetched page of {} results (has_more: {})",
                page.results.len(),
                page.has_more
            );
            let following = page.next_pagination(&pagination);
            Ok(Some((page.results, (following, fetch))))
        },
    )
    .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, ClientError>)))
    .try_flatten()
}

/// Fetches every page eagerly and returns all items in order.
pub async fn collect_all<T, F, Fut>(
    initial: Pagination,
    mut fetch: F,
) -> Result<Vec<T>, ClientError>
where
    F: FnMut(Pagination) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>, ClientError>>,
{
    let mut all_items = Vec::new();
    let mut pagination = initial;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch(pagination.clone()).await?;
        pages_fetched += 1;

        let next = page.next_pagination(&pagination);
        all_items.extend(page.results);

        match next {
            Some(next) => pagination = next,
            None => break,
        }
    }

    log::debug!(
        "Collected {} items over {} pages",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}
