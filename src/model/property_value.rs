//! Page property values and the builder for page create/update payloads.

use super::common::HostedFile;
use super::{RichTextList, User};
use crate::types::{Color, DateOrDateRange, Number, PageId, UserId};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An option of a select, multi-select or status property.
///
/// When written, the option is referenced by name when one is set, by id
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A file attached to a files property, hosted by Notion or external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FileWire", into = "FileWire")]
pub struct FileRef {
    pub name: Option<String>,
    pub url: String,
    /// Set only for Notion-hosted files, whose URLs expire.
    pub expiry_time: Option<DateTime<FixedOffset>>,
}

/// `{name?, type, file | external}`; other hosting kinds keep their URL.
#[derive(Serialize, Deserialize)]
struct FileWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<HostedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external: Option<HostedFile>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl TryFrom<FileWire> for FileRef {
    type Error = String;

    fn try_from(wire: FileWire) -> Result<Self, Self::Error> {
        let hosted = match (wire.file, wire.external) {
            (Some(hosted), _) | (None, Some(hosted)) => hosted,
            (None, None) => {
                let type_name = wire.type_name.unwrap_or_default();
                let payload = wire
                    .other
                    .get(&type_name)
                    .ok_or_else(|| format!("file of type '{}' has no payload", type_name))?;
                crate::codec::unknown_tag("file", &type_name);
                HostedFile::deserialize(payload).map_err(|e| e.to_string())?
            }
        };
        Ok(FileRef {
            name: wire.name,
            url: hosted.url,
            expiry_time: hosted.expiry_time,
        })
    }
}

impl From<FileRef> for FileWire {
    fn from(file: FileRef) -> Self {
        let notion_hosted = file.expiry_time.is_some();
        let hosted = HostedFile {
            url: file.url,
            expiry_time: file.expiry_time,
        };
        let (file_payload, external) = if notion_hosted {
            (Some(hosted), None)
        } else {
            (None, Some(hosted))
        };
        FileWire {
            name: file.name,
            type_name: Some(if notion_hosted { "file" } else { "external" }.to_string()),
            file: file_payload,
            external,
            other: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<Number>),
    Boolean(Option<bool>),
    Date(Option<DateOrDateRange>),
    Unknown { type_name: String, raw: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<Number>),
    Date(Option<DateOrDateRange>),
    Array(Vec<PropertyTypeValue>),
    Unknown { type_name: String, raw: Value },
}

/// The typed payload of a property value, one variant per property type.
///
/// `None` payloads mean the property is empty on the page; on the wire they
/// are sent as an explicit `null`, which clears the value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeValue {
    Title(RichTextList),
    RichText(RichTextList),
    Number(Option<Number>),
    Select(Option<SelectOption>),
    Status(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateOrDateRange>),
    People(Vec<User>),
    Relation(Vec<PageId>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Files(Vec<FileRef>),
    Formula(FormulaValue),
    Rollup(RollupValue),
    CreatedTime(DateTime<FixedOffset>),
    CreatedBy(User),
    LastEditedTime(DateTime<FixedOffset>),
    LastEditedBy(User),
    UniqueId {
        prefix: Option<String>,
        number: Option<Number>,
    },
    Unknown {
        type_name: String,
        raw: Value,
    },
}

impl PropertyTypeValue {
    /// The wire name of the property type.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Title(_) => "title",
            Self::RichText(_) => "rich_text",
            Self::Number(_) => "number",
            Self::Select(_) => "select",
            Self::Status(_) => "status",
            Self::MultiSelect(_) => "multi_select",
            Self::Date(_) => "date",
            Self::People(_) => "people",
            Self::Relation(_) => "relation",
            Self::Checkbox(_) => "checkbox",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::Files(_) => "files",
            Self::Formula(_) => "formula",
            Self::Rollup(_) => "rollup",
            Self::CreatedTime(_) => "created_time",
            Self::CreatedBy(_) => "created_by",
            Self::LastEditedTime(_) => "last_edited_time",
            Self::LastEditedBy(_) => "last_edited_by",
            Self::UniqueId { .. } => "unique_id",
            Self::Unknown { type_name, .. } => type_name,
        }
    }

    /// Computed or server-maintained values, which are never sent in a
    /// create or update request.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::Formula(_)
                | Self::Rollup(_)
                | Self::Files(_)
                | Self::CreatedTime(_)
                | Self::CreatedBy(_)
                | Self::LastEditedTime(_)
                | Self::LastEditedBy(_)
                | Self::UniqueId { .. }
                | Self::Unknown { .. }
        )
    }
}

/// A property value as it appears on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// The property's short id, present on decoded values only.
    pub id: Option<String>,
    pub value: PropertyTypeValue,
}

impl PropertyValue {
    pub fn new(value: PropertyTypeValue) -> Self {
        Self { id: None, value }
    }
}

impl From<PropertyTypeValue> for PropertyValue {
    fn from(value: PropertyTypeValue) -> Self {
        Self::new(value)
    }
}

/// Property values keyed by property name, in insertion order.
///
/// Doubles as the builder for page payloads. Setting a name twice keeps the
/// first position and the last value.
///
/// ```
/// use notionkit::PropertyValueList;
///
/// let props = PropertyValueList::new()
///     .title("Name", "Groceries")
///     .number("Budget", 40)
///     .checkbox("Done", false);
/// assert_eq!(props.names().collect::<Vec<_>>(), ["Name", "Budget", "Done"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyValueList {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(name.into(), value.into());
    }

    fn with(self, name: impl Into<String>, value: PropertyTypeValue) -> Self {
        self.set(name, PropertyValue::new(value))
    }

    pub fn number(self, name: impl Into<String>, number: impl Into<Number>) -> Self {
        self.with(name, PropertyTypeValue::Number(Some(number.into())))
    }

    pub fn clear_number(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Number(None))
    }

    /// Plain rich-text value made of a single unstyled span.
    pub fn text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.rich_text(name, RichTextList::new().text(text))
    }

    pub fn rich_text(self, name: impl Into<String>, text: RichTextList) -> Self {
        self.with(name, PropertyTypeValue::RichText(text))
    }

    pub fn title(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.title_rich_text(name, RichTextList::new().text(text))
    }

    pub fn title_rich_text(self, name: impl Into<String>, text: RichTextList) -> Self {
        self.with(name, PropertyTypeValue::Title(text))
    }

    pub fn select_by_name(self, name: impl Into<String>, option: impl Into<String>) -> Self {
        self.with(
            name,
            PropertyTypeValue::Select(Some(SelectOption::named(option))),
        )
    }

    pub fn clear_select(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Select(None))
    }

    pub fn status_by_name(self, name: impl Into<String>, option: impl Into<String>) -> Self {
        self.with(
            name,
            PropertyTypeValue::Status(Some(SelectOption::named(option))),
        )
    }

    pub fn multi_select_by_names<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(SelectOption::named).collect();
        self.with(name, PropertyTypeValue::MultiSelect(options))
    }

    pub fn date(self, name: impl Into<String>, date: DateOrDateRange) -> Self {
        self.with(name, PropertyTypeValue::Date(Some(date)))
    }

    pub fn clear_date(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Date(None))
    }

    pub fn relation(self, name: impl Into<String>, pages: impl IntoIterator<Item = PageId>) -> Self {
        self.with(name, PropertyTypeValue::Relation(pages.into_iter().collect()))
    }

    pub fn people(self, name: impl Into<String>, users: impl IntoIterator<Item = UserId>) -> Self {
        let users = users.into_iter().map(User::reference).collect();
        self.with(name, PropertyTypeValue::People(users))
    }

    pub fn checkbox(self, name: impl Into<String>, checked: bool) -> Self {
        self.with(name, PropertyTypeValue::Checkbox(checked))
    }

    pub fn url(self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Url(Some(url.into())))
    }

    pub fn clear_url(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Url(None))
    }

    pub fn email(self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Email(Some(email.into())))
    }

    pub fn clear_email(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::Email(None))
    }

    pub fn phone_number(self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::PhoneNumber(Some(phone.into())))
    }

    pub fn clear_phone_number(self, name: impl Into<String>) -> Self {
        self.with(name, PropertyTypeValue::PhoneNumber(None))
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Entries that can be sent in a create or update request.
    pub fn writable(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.iter().filter(|(_, value)| !value.value.is_read_only())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The page title, whichever property holds it.
    pub fn title_text(&self) -> Option<&RichTextList> {
        self.entries.values().find_map(|value| match &value.value {
            PropertyTypeValue::Title(text) => Some(text),
            _ => None,
        })
    }
}
