//! Mapping between the typed model and the API's JSON.
//!
//! Every API object is a tagged union: `object` names the resource and `type`
//! names the variant, whose payload sits under a key of the same name.
//! Decoding dispatches on those tags. Tags this client does not know decode
//! into `Unknown` variants that keep the raw JSON, so new API features never
//! make a response unreadable; only a malformed *known* shape is an error.
//!
//! Encoding produces request-shaped JSON: server-maintained fields
//! (timestamps, `plain_text`, computed property values) are left out.

mod block;
mod entity;
mod property;
mod query;
mod reader;
mod rich_text;

use crate::error::DecodeError;
use crate::model::{
    Annotations, Block, Database, FileRef, Page, PropertyValue, RichText, SelectOption, User,
};
use crate::pagination::ResultPage;
use crate::types::DateOrDateRange;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

pub(crate) use reader::Fields;

/// Types that can be read from API JSON.
pub trait Decode: Sized {
    fn decode(raw: &Value) -> Result<Self, DecodeError>;
}

/// Types that can be written as request JSON.
pub trait Encode {
    fn encode(&self) -> Value;
}

/// The resources and sub-objects the codec can be asked to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Database,
    Page,
    Block,
    PropertyValue,
    RichText,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    User(User),
    Database(Database),
    Page(Page),
    Block(Block),
    PropertyValue(PropertyValue),
    RichText(RichText),
    /// An `object` tag this client does not model.
    Unknown { object: String, raw: Value },
}

impl Entity {
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Entity::User(_) => Some(EntityKind::User),
            Entity::Database(_) => Some(EntityKind::Database),
            Entity::Page(_) => Some(EntityKind::Page),
            Entity::Block(_) => Some(EntityKind::Block),
            Entity::PropertyValue(_) => Some(EntityKind::PropertyValue),
            Entity::RichText(_) => Some(EntityKind::RichText),
            Entity::Unknown { .. } => None,
        }
    }
}

/// Decodes `raw` as the given kind. All-or-nothing: no partial entity is
/// returned when a required field is malformed.
pub fn decode(kind: EntityKind, raw: &Value) -> Result<Entity, DecodeError> {
    Ok(match kind {
        EntityKind::User => Entity::User(User::decode(raw)?),
        EntityKind::Database => Entity::Database(Database::decode(raw)?),
        EntityKind::Page => Entity::Page(Page::decode(raw)?),
        EntityKind::Block => Entity::Block(Block::decode(raw)?),
        EntityKind::PropertyValue => Entity::PropertyValue(PropertyValue::decode(raw)?),
        EntityKind::RichText => Entity::RichText(RichText::decode(raw)?),
    })
}

/// Decodes a top-level resource, choosing the kind from its `object` tag.
pub fn decode_object(raw: &Value) -> Result<Entity, DecodeError> {
    let fields = Fields::of("object", raw)?;
    match fields.str("object")? {
        "user" => decode(EntityKind::User, raw),
        "database" => decode(EntityKind::Database, raw),
        "page" => decode(EntityKind::Page, raw),
        "block" => decode(EntityKind::Block, raw),
        other => {
            log::warn!("Unknown object type '{}', keeping raw JSON", other);
            Ok(Entity::Unknown {
                object: other.to_string(),
                raw: raw.clone(),
            })
        }
    }
}

pub fn encode(entity: &Entity) -> Value {
    match entity {
        Entity::User(user) => user.encode(),
        Entity::Database(database) => database.encode(),
        Entity::Page(page) => page.encode(),
        Entity::Block(block) => block.encode(),
        Entity::PropertyValue(value) => value.encode(),
        Entity::RichText(span) => span.encode(),
        Entity::Unknown { raw, .. } => raw.clone(),
    }
}

pub(crate) fn decode_all<T: Decode>(values: &[Value]) -> Result<Vec<T>, DecodeError> {
    values.iter().map(T::decode).collect()
}

pub(crate) fn encode_all<'a, T: Encode + 'a>(items: impl IntoIterator<Item = &'a T>) -> Value {
    Value::Array(items.into_iter().map(Encode::encode).collect())
}

/// Reads a whole object through its serde impl.
pub(crate) fn from_wire<T: DeserializeOwned>(
    kind: &'static str,
    raw: &Value,
) -> Result<T, DecodeError> {
    T::deserialize(raw).map_err(|e| DecodeError::new(kind, "<root>", e.to_string(), raw))
}

/// `Decode` and `Encode` for types whose serde impls are the wire form.
macro_rules! serde_codec {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(raw: &Value) -> Result<Self, DecodeError> {
                    from_wire($kind, raw)
                }
            }

            impl Encode for $ty {
                fn encode(&self) -> Value {
                    json!(self)
                }
            }
        )*
    };
}

serde_codec! {
    Annotations => "annotations",
    DateOrDateRange => "date",
    FileRef => "file",
    SelectOption => "select option",
    User => "user",
}

/// Logs and wraps a tag this client does not model.
pub(crate) fn unknown_tag(kind: &str, type_name: &str) -> String {
    log::warn!("Unknown {} type '{}', keeping raw JSON", kind, type_name);
    type_name.to_string()
}

/// Wire shape of a list response; items are decoded separately so errors
/// name the entity rather than the envelope.
#[derive(Deserialize)]
struct ListEnvelope {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

impl<T: Decode> Decode for ResultPage<T> {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let envelope: ListEnvelope = from_wire("list", raw)?;
        Ok(ResultPage {
            results: decode_all(&envelope.results)?,
            has_more: envelope.has_more,
            next_cursor: envelope.next_cursor,
        })
    }
}
