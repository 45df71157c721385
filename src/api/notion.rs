// src/api/notion.rs
//! Typed Notion operations over a [`Transport`].
//!
//! Each operation encodes its request with the codec, executes it, and
//! decodes the response. Errors from any stage propagate unchanged.

use super::{ApiRequest, NotionHttpClient, Transport};
use crate::codec::{Decode, Encode};
use crate::config::ClientConfiguration;
use crate::constants::BLOCK_MAX_FETCH_DEPTH;
use crate::error::ClientError;
use crate::model::{
    Block, BlockContent, BlockList, Database, DatabaseCreate, DatabaseUpdate, Page, PageCreate,
    PropertyValueList, User,
};
use crate::pagination::{collect_all, paginate, Pagination, ResultPage};
use crate::query::DatabaseQuery;
use crate::types::{BlockId, DatabaseId, PageId, UserId};
use futures::future::BoxFuture;
use futures::stream::Stream;
use serde_json::{json, Value};

/// The Notion API as typed operations.
#[derive(Clone)]
pub struct NotionClient<T: Transport> {
    transport: T,
}

impl NotionClient<NotionHttpClient> {
    /// A client over the reqwest transport.
    pub fn from_configuration(config: ClientConfiguration) -> Result<Self, ClientError> {
        Ok(Self::new(NotionHttpClient::new(config)?))
    }
}

impl<T: Transport> NotionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: Decode>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let raw = self.transport.execute(request).await?;
        Ok(R::decode(&raw)?)
    }

    // --- Users ---

    pub async fn get_user(&self, id: &UserId) -> Result<User, ClientError> {
        self.call(ApiRequest::get(format!("users/{}", id.to_dashed())))
            .await
    }

    pub async fn list_users(&self, pagination: &Pagination) -> Result<ResultPage<User>, ClientError> {
        self.call(ApiRequest::get("users").with_query(pagination.query_params()))
            .await
    }

    // --- Databases ---

    pub async fn get_database(&self, id: &DatabaseId) -> Result<Database, ClientError> {
        self.call(ApiRequest::get(format!("databases/{}", id.to_dashed())))
            .await
    }

    /// One page of rows matching `query`. The query's own pagination selects
    /// which page.
    pub async fn query_database(
        &self,
        id: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<ResultPage<Page>, ClientError> {
        log::debug!("Querying database {} with {}", id, query.encode());
        self.call(ApiRequest::post(
            format!("databases/{}/query", id.to_dashed()),
            query.encode(),
        ))
        .await
    }

    /// Every row matching `query`, fetched page by page as the stream is
    /// consumed. Starts from the query's own pagination.
    pub fn query_database_stream<'a>(
        &'a self,
        id: &'a DatabaseId,
        query: &'a DatabaseQuery,
    ) -> impl Stream<Item = Result<Page, ClientError>> + 'a {
        paginate(query.page().clone(), move |pagination| {
            let request = query.with_pagination(pagination);
            async move { self.query_database(id, &request).await }
        })
    }

    pub async fn create_database(&self, database: &DatabaseCreate) -> Result<Database, ClientError> {
        self.call(ApiRequest::post("databases", database.encode()))
            .await
    }

    pub async fn update_database(
        &self,
        id: &DatabaseId,
        update: &DatabaseUpdate,
    ) -> Result<Database, ClientError> {
        self.call(ApiRequest::patch(
            format!("databases/{}", id.to_dashed()),
            update.encode(),
        ))
        .await
    }

    // --- Pages ---

    pub async fn get_page(&self, id: &PageId) -> Result<Page, ClientError> {
        self.call(ApiRequest::get(format!("pages/{}", id.to_dashed())))
            .await
    }

    pub async fn create_page(&self, page: &PageCreate) -> Result<Page, ClientError> {
        self.call(ApiRequest::post("pages", page.encode())).await
    }

    /// Writes the writable entries of `properties`; others are untouched.
    pub async fn update_page(
        &self,
        id: &PageId,
        properties: &PropertyValueList,
    ) -> Result<Page, ClientError> {
        self.call(ApiRequest::patch(
            format!("pages/{}", id.to_dashed()),
            json!({ "properties": properties.encode() }),
        ))
        .await
    }

    pub async fn archive_page(&self, id: &PageId) -> Result<Page, ClientError> {
        self.call(ApiRequest::patch(
            format!("pages/{}", id.to_dashed()),
            json!({ "archived": true }),
        ))
        .await
    }

    // --- Blocks ---

    pub async fn get_block(&self, id: &BlockId) -> Result<Block, ClientError> {
        self.call(ApiRequest::get(format!("blocks/{}", id.to_dashed())))
            .await
    }

    /// One page of the direct children of a block or page. Children of the
    /// returned blocks are not fetched.
    pub async fn get_block_children(
        &self,
        id: &BlockId,
        pagination: &Pagination,
    ) -> Result<ResultPage<Block>, ClientError> {
        self.call(
            ApiRequest::get(format!("blocks/{}/children", id.to_dashed()))
                .with_query(pagination.query_params()),
        )
        .await
    }

    /// Every child of a block or page, with nested children filled in.
    ///
    /// Child pages and child databases are separate objects and are not
    /// descended into. Nesting deeper than `BLOCK_MAX_FETCH_DEPTH` is left
    /// unfetched.
    pub async fn get_all_block_children(&self, id: &BlockId) -> Result<Vec<Block>, ClientError> {
        self.fetch_tree(id.clone(), 0).await
    }

    fn fetch_tree(&self, id: BlockId, depth: usize) -> BoxFuture<'_, Result<Vec<Block>, ClientError>> {
        Box::pin(async move {
            let mut blocks = collect_all(Pagination::new(), |pagination| {
                let id = &id;
                async move { self.get_block_children(id, &pagination).await }
            })
            .await?;

            if depth + 1 >= BLOCK_MAX_FETCH_DEPTH {
                log::warn!(
                    "Block {} is nested deeper than {} levels; not descending further",
                    id,
                    BLOCK_MAX_FETCH_DEPTH
                );
                return Ok(blocks);
            }

            for block in blocks.iter_mut() {
                if !block.has_children || !descends_into(&block.content) {
                    continue;
                }
                if let Some(child_id) = block.id.clone() {
                    block.children = self.fetch_tree(child_id, depth + 1).await?;
                }
            }
            Ok(blocks)
        })
    }

    /// Appends `blocks` after the last child of `id`.
    pub async fn append_block_children(
        &self,
        id: &BlockId,
        blocks: &BlockList,
    ) -> Result<ResultPage<Block>, ClientError> {
        self.call(ApiRequest::patch(
            format!("blocks/{}/children", id.to_dashed()),
            blocks.encode(),
        ))
        .await
    }

    /// Raw access for endpoints without a typed operation.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.transport.execute(request).await
    }
}

fn descends_into(content: &BlockContent) -> bool {
    !matches!(
        content,
        BlockContent::ChildPage { .. } | BlockContent::ChildDatabase { .. }
    )
}
