//! Typed entities and the builders that produce request payloads.
//!
//! Everything here is a plain value: decoded entities carry no link back to
//! the client that fetched them, and builders are consumed by value so the
//! finished payload reflects exactly the calls made on it, in order.

mod block;
mod common;
mod database;
mod page;
mod property_value;
mod rich_text;
mod user;

pub use block::{Block, BlockContent, BlockList, TextBlock};
pub use common::{Icon, Parent};
pub(crate) use common::HostedFile;
pub use database::{
    Database, DatabaseCreate, DatabaseUpdate, NumberFormat, PropertySpec, PropertySpecKind,
    PropertySpecList,
};
pub use page::{Page, PageCreate};
pub use property_value::{
    FileRef, FormulaValue, PropertyTypeValue, PropertyValue, PropertyValueList, RollupValue,
    SelectOption,
};
pub use rich_text::{Annotations, Mention, RichText, RichTextContent, RichTextList};
pub use user::{User, UserKind};
