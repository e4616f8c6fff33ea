use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use futures::Stream;
use serde_json::{Map, Value};

use super::{HttpMethod, TelerivetClient, TelerivetError};
use crate::domain::QueryOptions;
use crate::resource::{Entity, Resource};
use crate::transport::{
    decode_count_json_response, decode_page_json_response, encode_count, encode_page,
    encode_query_options,
};

/// Lazy paginated iterator over a list endpoint.
///
/// Pages of `page_size` items are fetched on demand, starting at `offset`. Fetching stops
/// once the server reports the result is no longer truncated or returns an empty page.
/// A cursor is not rewindable; build a new one to restart.
pub struct Cursor<T> {
    client: TelerivetClient,
    path: String,
    options: QueryOptions,
    offset: u64,
    limit: Option<u64>,
    returned: u64,
    buffer: VecDeque<Map<String, Value>>,
    exhausted: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("path", &self.path)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("returned", &self.returned)
            .field("buffered", &self.buffer.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl<T: Resource> Cursor<T> {
    pub(crate) fn new(client: TelerivetClient, path: String, options: QueryOptions) -> Self {
        Self {
            client,
            path,
            offset: options.offset_value(),
            options,
            limit: None,
            returned: 0,
            buffer: VecDeque::new(),
            exhausted: false,
            _marker: PhantomData,
        }
    }

    /// Stop after `limit` items in total.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Next item, fetching the next page when the buffered one is used up.
    pub async fn next(&mut self) -> Result<Option<T>, TelerivetError> {
        if self.limit.is_some_and(|limit| self.returned >= limit) {
            return Ok(None);
        }
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page().await?;
        }
        let Some(fields) = self.buffer.pop_front() else {
            return Ok(None);
        };
        self.returned += 1;
        let entity = Entity::from_fields::<T>(self.client.clone(), fields, true)?;
        Ok(Some(T::from_entity(entity)))
    }

    /// Drain the cursor into a vector.
    pub async fn all(mut self) -> Result<Vec<T>, TelerivetError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Total number of matching items, as counted by the server.
    pub async fn count(&self) -> Result<u64, TelerivetError> {
        let mut query = encode_query_options(&self.options);
        query.extend(encode_count());
        let body = self
            .client
            .execute(HttpMethod::Get, &self.path, &query, None)
            .await?;
        decode_count_json_response(&body).map_err(|err| TelerivetError::Parse(Box::new(err)))
    }

    /// Adapt the cursor into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<T, TelerivetError>> {
        futures::stream::try_unfold(self, |mut cursor| async move {
            let item = cursor.next().await?;
            Ok::<_, TelerivetError>(item.map(|item| (item, cursor)))
        })
    }

    async fn fetch_page(&mut self) -> Result<(), TelerivetError> {
        let page_size = self.options.page_size_value();
        let mut query = encode_query_options(&self.options);
        query.extend(encode_page(page_size, self.offset));

        tracing::debug!(
            path = %self.path,
            offset = self.offset,
            page_size = page_size.value(),
            "fetching page"
        );
        let body = self
            .client
            .execute(HttpMethod::Get, &self.path, &query, None)
            .await?;
        let page =
            decode_page_json_response(&body).map_err(|err| TelerivetError::Parse(Box::new(err)))?;

        let received = page.items.len() as u64;
        self.offset += received;
        if !page.truncated || received == 0 {
            self.exhausted = true;
        }
        self.buffer.extend(page.items);
        Ok(())
    }
}
