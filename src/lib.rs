// src/lib.rs
//! notionkit: a typed model, JSON codec and query builder for the Notion API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `ClientError`, `DecodeError`, `HttpError`, `ValidationError`
//! - **Configuration**: `ClientConfiguration`
//! - **Domain model**: `Page`, `Database`, `Block`, `User`, `PropertyValueList`, `RichTextList`
//! - **Domain types**: `PageId`, `DatabaseId`, `Color`, `DateOrDateRange`, etc.
//! - **Queries**: `DatabaseQuery`, `PropertyFilter`, `PropertySort`
//! - **Codec**: `Decode`, `Encode`, `decode`, `decode_object`, `encode`
//! - **Pagination**: `Pagination`, `ResultPage`, `paginate`, `collect_all`
//! - **API client**: `NotionClient`, `Transport`, `NotionHttpClient`

pub mod api;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod pagination;
pub mod query;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ClientError, DecodeError, HttpError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ClientConfiguration;

// --- Domain Model ---
pub use crate::model::{
    Annotations, Block, BlockContent, BlockList, Database, DatabaseCreate, DatabaseUpdate,
    FileRef, FormulaValue, Icon, Mention, NumberFormat, Page, PageCreate, Parent, PropertySpec,
    PropertySpecKind, PropertySpecList, PropertyTypeValue, PropertyValue, PropertyValueList,
    RichText, RichTextContent, RichTextList, RollupValue, SelectOption, TextBlock, User, UserKind,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, Color, DatabaseId, DateOrDateRange, DateOrDateTime, Id, Number, PageId,
    UserId, ValidatedUrl,
};

// --- Queries ---
pub use crate::query::{
    CheckboxPredicate, DatabaseQuery, DatabaseQueryPredicate, DatePredicate, Direction,
    FilesPredicate, Filter, FilterCategory, FormulaPredicate, MultiSelectPredicate,
    NumberPredicate, PeoplePredicate, PropertyFilter, PropertySort, RelationPredicate,
    SelectPredicate, SortKey, SortTerm, TextPredicate, TimestampKey,
};

// --- Codec ---
pub use crate::codec::{decode, decode_object, encode, Decode, Encode, Entity, EntityKind};

// --- Pagination ---
pub use crate::pagination::{collect_all, paginate, Pagination, ResultPage};

// --- API Client ---
pub use crate::api::{ApiRequest, Method, NotionClient, NotionHttpClient, Transport};
