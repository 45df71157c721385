//! Databases, their property schema, and the schema builder.

use super::{Icon, Parent, RichTextList, SelectOption};
use crate::types::{DatabaseId, PageId};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde_json::Value;

macro_rules! number_formats {
    ($($variant:ident => $wire:literal),* $(,)?) => {
        /// Display format of a number property.
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub enum NumberFormat {
            #[default]
            $($variant,)*
            Unknown(String),
        }

        impl NumberFormat {
            pub fn from_api(s: &str) -> Self {
                match s {
                    $($wire => Self::$variant,)*
                    other => Self::Unknown(other.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)*
                    Self::Unknown(other) => other,
                }
            }
        }
    };
}

number_formats! {
    Number => "number",
    NumberWithCommas => "number_with_commas",
    Percent => "percent",
    Dollar => "dollar",
    CanadianDollar => "canadian_dollar",
    Euro => "euro",
    Pound => "pound",
    Yen => "yen",
    Ruble => "ruble",
    Rupee => "rupee",
    Won => "won",
    Yuan => "yuan",
    Real => "real",
    Lira => "lira",
    Rupiah => "rupiah",
    Franc => "franc",
    HongKongDollar => "hong_kong_dollar",
    NewZealandDollar => "new_zealand_dollar",
    Krona => "krona",
    NorwegianKrone => "norwegian_krone",
    MexicanPeso => "mexican_peso",
    Rand => "rand",
    NewTaiwanDollar => "new_taiwan_dollar",
    DanishKrone => "danish_krone",
    Zloty => "zloty",
    Baht => "baht",
    Forint => "forint",
    Koruna => "koruna",
    Shekel => "shekel",
    ChileanPeso => "chilean_peso",
    PhilippinePeso => "philippine_peso",
    Dirham => "dirham",
    ColombianPeso => "colombian_peso",
    Riyal => "riyal",
    Ringgit => "ringgit",
    Leu => "leu",
    ArgentinePeso => "argentine_peso",
    UruguayanPeso => "uruguayan_peso",
}

/// The type, and type configuration, of one database column.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySpecKind {
    Title,
    RichText,
    Number {
        format: NumberFormat,
    },
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    Status {
        options: Vec<SelectOption>,
    },
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula {
        expression: String,
    },
    Relation {
        database_id: DatabaseId,
    },
    Rollup {
        relation_property_name: String,
        rollup_property_name: String,
        function: String,
    },
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    Unknown {
        type_name: String,
        raw: Value,
    },
}

impl PropertySpecKind {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multi_select",
            Self::Status { .. } => "status",
            Self::Date => "date",
            Self::People => "people",
            Self::Files => "files",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Formula { .. } => "formula",
            Self::Relation { .. } => "relation",
            Self::Rollup { .. } => "rollup",
            Self::CreatedTime => "created_time",
            Self::CreatedBy => "created_by",
            Self::LastEditedTime => "last_edited_time",
            Self::LastEditedBy => "last_edited_by",
            Self::Unknown { type_name, .. } => type_name,
        }
    }
}

/// One column of a database schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub id: Option<String>,
    pub name: String,
    pub kind: PropertySpecKind,
}

/// Database schema keyed by property name, and the builder for one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySpecList {
    entries: IndexMap<String, PropertySpec>,
}

impl PropertySpecList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<String>, kind: PropertySpecKind) -> Self {
        let name = name.into();
        self.entries.insert(
            name.clone(),
            PropertySpec {
                id: None,
                name,
                kind,
            },
        );
        self
    }

    pub(crate) fn insert(&mut self, spec: PropertySpec) {
        self.entries.insert(spec.name.clone(), spec);
    }

    pub fn title(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Title)
    }

    pub fn rich_text(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::RichText)
    }

    pub fn number(self, name: impl Into<String>, format: NumberFormat) -> Self {
        self.add(name, PropertySpecKind::Number { format })
    }

    pub fn select(
        self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        let options = options.into_iter().collect();
        self.add(name, PropertySpecKind::Select { options })
    }

    pub fn multi_select(
        self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        let options = options.into_iter().collect();
        self.add(name, PropertySpecKind::MultiSelect { options })
    }

    pub fn date(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Date)
    }

    pub fn people(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::People)
    }

    pub fn files(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Files)
    }

    pub fn checkbox(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Checkbox)
    }

    pub fn url(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Url)
    }

    pub fn email(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Email)
    }

    pub fn phone_number(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::PhoneNumber)
    }

    pub fn formula(self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        self.add(name, PropertySpecKind::Formula { expression })
    }

    pub fn relation(self, name: impl Into<String>, database_id: DatabaseId) -> Self {
        self.add(name, PropertySpecKind::Relation { database_id })
    }

    pub fn rollup(
        self,
        name: impl Into<String>,
        relation_property_name: impl Into<String>,
        rollup_property_name: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        self.add(
            name,
            PropertySpecKind::Rollup {
                relation_property_name: relation_property_name.into(),
                rollup_property_name: rollup_property_name.into(),
                function: function.into(),
            },
        )
    }

    pub fn created_time(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::CreatedTime)
    }

    pub fn created_by(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::CreatedBy)
    }

    pub fn last_edited_time(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::LastEditedTime)
    }

    pub fn last_edited_by(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::LastEditedBy)
    }

    pub fn get(&self, name: &str) -> Option<&PropertySpec> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertySpec> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A Notion database
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub title: RichTextList,
    pub description: RichTextList,
    pub icon: Option<Icon>,
    pub parent: Parent,
    pub url: Option<String>,
    pub properties: PropertySpecList,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub last_edited_time: Option<DateTime<FixedOffset>>,
    pub archived: bool,
    pub is_inline: bool,
}

impl Database {
    pub fn title(&self) -> String {
        self.title.plain_text()
    }
}

/// Payload for creating a database under a page.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseCreate {
    pub parent: PageId,
    pub title: RichTextList,
    pub properties: PropertySpecList,
    pub icon: Option<Icon>,
    pub is_inline: bool,
}

impl DatabaseCreate {
    pub fn new(
        parent: PageId,
        title: impl Into<RichTextList>,
        properties: PropertySpecList,
    ) -> Self {
        Self {
            parent,
            title: title.into(),
            properties,
            icon: None,
            is_inline: false,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn inline(mut self) -> Self {
        self.is_inline = true;
        self
    }
}

/// Partial update of a database; unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseUpdate {
    pub title: Option<RichTextList>,
    pub description: Option<RichTextList>,
    pub properties: Option<PropertySpecList>,
}

impl DatabaseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<RichTextList>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<RichTextList>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn properties(mut self, properties: PropertySpecList) -> Self {
        self.properties = Some(properties);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_format_round_trips_through_wire_names() {
        assert_eq!(NumberFormat::from_api("euro"), NumberFormat::Euro);
        assert_eq!(NumberFormat::HongKongDollar.as_str(), "hong_kong_dollar");
        assert_eq!(
            NumberFormat::from_api("bitcoin"),
            NumberFormat::Unknown("bitcoin".to_string())
        );
        assert_eq!(NumberFormat::default(), NumberFormat::Number);
    }

    #[test]
    fn schema_keeps_insertion_order() {
        let schema = PropertySpecList::new()
            .title("Name")
            .number("Price", NumberFormat::Dollar)
            .checkbox("In stock");
        let names: Vec<_> = schema.iter().map(|spec| spec.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "Price", "In stock"]);
        assert_eq!(
            schema.get("Price").map(|spec| spec.kind.type_name()),
            Some("number")
        );
    }
}
