//! Users, pages, databases and the small objects they share.

use super::{decode_all, encode_all, unknown_tag, Decode, Encode, Fields};
use crate::error::DecodeError;
use crate::model::{
    BlockList, Database, DatabaseCreate, DatabaseUpdate, HostedFile, Icon, NumberFormat, Page,
    PageCreate, Parent, PropertySpec, PropertySpecKind, PropertySpecList, PropertyValueList,
    RichTextList, SelectOption,
};
use crate::types::{DatabaseId, PageId};
use serde::Deserialize;
use serde_json::{json, Map, Value};

const PARENT_TYPES: &[&str] = &["database_id", "page_id", "block_id", "workspace"];
const ICON_TYPES: &[&str] = &["emoji", "external", "file"];
const SPEC_TYPES: &[&str] = &[
    "title",
    "rich_text",
    "number",
    "select",
    "multi_select",
    "status",
    "date",
    "people",
    "files",
    "checkbox",
    "url",
    "email",
    "phone_number",
    "formula",
    "relation",
    "rollup",
    "created_time",
    "created_by",
    "last_edited_time",
    "last_edited_by",
];

#[derive(Deserialize)]
struct NumberConfig {
    format: Option<String>,
}

#[derive(Deserialize)]
struct OptionsConfig {
    options: Option<Vec<SelectOption>>,
}

#[derive(Deserialize)]
struct FormulaConfig {
    expression: String,
}

#[derive(Deserialize)]
struct RelationConfig {
    database_id: DatabaseId,
}

#[derive(Deserialize)]
struct RollupConfig {
    relation_property_name: String,
    rollup_property_name: String,
    function: String,
}

#[derive(Deserialize)]
struct ParentPage {
    page_id: PageId,
}

impl Decode for Parent {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("parent", raw)?;
        Ok(match fields.discriminator(PARENT_TYPES)? {
            "database_id" => Parent::Database(fields.parse("database_id")?),
            "page_id" => Parent::Page(fields.parse("page_id")?),
            "block_id" => Parent::Block(fields.parse("block_id")?),
            "workspace" => Parent::Workspace,
            other => Parent::Unknown {
                type_name: unknown_tag("parent", other),
                raw: raw.clone(),
            },
        })
    }
}

impl Encode for Parent {
    fn encode(&self) -> Value {
        match self {
            Parent::Database(id) => json!({"type": "database_id", "database_id": id.to_dashed()}),
            Parent::Page(id) => json!({"type": "page_id", "page_id": id.to_dashed()}),
            Parent::Block(id) => json!({"type": "block_id", "block_id": id.to_dashed()}),
            Parent::Workspace => json!({"type": "workspace", "workspace": true}),
            Parent::Unknown { raw, .. } => raw.clone(),
        }
    }
}

impl Decode for Icon {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("icon", raw)?;
        Ok(match fields.discriminator(ICON_TYPES)? {
            "emoji" => Icon::Emoji(fields.parse("emoji")?),
            "external" => Icon::External {
                url: fields.parse::<HostedFile>("external")?.url,
            },
            "file" => {
                let HostedFile { url, expiry_time } = fields.parse("file")?;
                Icon::File { url, expiry_time }
            }
            other => Icon::Unknown {
                type_name: unknown_tag("icon", other),
                raw: raw.clone(),
            },
        })
    }
}

impl Encode for Icon {
    fn encode(&self) -> Value {
        match self {
            Icon::Emoji(emoji) => json!({"type": "emoji", "emoji": emoji}),
            Icon::External { url } => json!({"type": "external", "external": {"url": url}}),
            Icon::File { url, expiry_time } => {
                let file = HostedFile {
                    url: url.clone(),
                    expiry_time: *expiry_time,
                };
                json!({"type": "file", "file": file})
            }
            Icon::Unknown { raw, .. } => raw.clone(),
        }
    }
}

/// Icons a request may carry; Notion-hosted files are response-only.
fn request_icon(icon: &Option<Icon>) -> Option<Value> {
    match icon {
        Some(icon @ (Icon::Emoji(_) | Icon::External { .. })) => Some(icon.encode()),
        _ => None,
    }
}

fn opt_icon(fields: &Fields<'_>) -> Result<Option<Icon>, DecodeError> {
    fields.get("icon").map(Icon::decode).transpose()
}

impl Decode for Page {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("page", raw)?;
        Ok(Page {
            id: fields.parse("id")?,
            parent: Parent::decode(fields.required("parent")?)?,
            properties: match fields.get("properties") {
                Some(properties) => PropertyValueList::decode(properties)?,
                None => PropertyValueList::new(),
            },
            url: fields.opt_string("url")?,
            icon: opt_icon(&fields)?,
            created_time: fields.opt_parse("created_time")?,
            last_edited_time: fields.opt_parse("last_edited_time")?,
            archived: fields.bool_or("archived", false)?,
        })
    }
}

impl Encode for Page {
    /// Update form: writable properties, icon and archive flag.
    fn encode(&self) -> Value {
        let mut page = Map::new();
        page.insert("properties".into(), self.properties.encode());
        if let Some(icon) = request_icon(&self.icon) {
            page.insert("icon".into(), icon);
        }
        page.insert("archived".into(), Value::from(self.archived));
        Value::Object(page)
    }
}

impl Decode for PageCreate {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("page", raw)?;
        Ok(PageCreate {
            parent: Parent::decode(fields.required("parent")?)?,
            properties: PropertyValueList::decode(fields.required("properties")?)?,
            children: BlockList::from(decode_all(fields.array_or_empty("children")?)?),
            icon: opt_icon(&fields)?,
        })
    }
}

impl Encode for PageCreate {
    fn encode(&self) -> Value {
        let mut page = Map::new();
        page.insert("parent".into(), self.parent.encode());
        page.insert("properties".into(), self.properties.encode());
        if !self.children.is_empty() {
            page.insert("children".into(), encode_all(self.children.blocks()));
        }
        if let Some(icon) = request_icon(&self.icon) {
            page.insert("icon".into(), icon);
        }
        Value::Object(page)
    }
}

fn decode_spec(name: &str, raw: &Value) -> Result<PropertySpec, DecodeError> {
    let fields = Fields::of("property spec", raw)?;
    let type_name = fields.discriminator(SPEC_TYPES)?;
    let options = |field: &str| -> Result<Vec<SelectOption>, DecodeError> {
        let config: Option<OptionsConfig> = fields.opt_parse(field)?;
        Ok(config.and_then(|config| config.options).unwrap_or_default())
    };
    let kind = match type_name {
        "title" => PropertySpecKind::Title,
        "rich_text" => PropertySpecKind::RichText,
        "number" => PropertySpecKind::Number {
            format: fields
                .opt_parse::<NumberConfig>("number")?
                .and_then(|config| config.format)
                .map(|format| NumberFormat::from_api(&format))
                .unwrap_or_default(),
        },
        "select" => PropertySpecKind::Select {
            options: options("select")?,
        },
        "multi_select" => PropertySpecKind::MultiSelect {
            options: options("multi_select")?,
        },
        "status" => PropertySpecKind::Status {
            options: options("status")?,
        },
        "date" => PropertySpecKind::Date,
        "people" => PropertySpecKind::People,
        "files" => PropertySpecKind::Files,
        "checkbox" => PropertySpecKind::Checkbox,
        "url" => PropertySpecKind::Url,
        "email" => PropertySpecKind::Email,
        "phone_number" => PropertySpecKind::PhoneNumber,
        "formula" => PropertySpecKind::Formula {
            expression: fields.parse::<FormulaConfig>("formula")?.expression,
        },
        "relation" => PropertySpecKind::Relation {
            database_id: fields.parse::<RelationConfig>("relation")?.database_id,
        },
        "rollup" => {
            let rollup: RollupConfig = fields.parse("rollup")?;
            PropertySpecKind::Rollup {
                relation_property_name: rollup.relation_property_name,
                rollup_property_name: rollup.rollup_property_name,
                function: rollup.function,
            }
        }
        "created_time" => PropertySpecKind::CreatedTime,
        "created_by" => PropertySpecKind::CreatedBy,
        "last_edited_time" => PropertySpecKind::LastEditedTime,
        "last_edited_by" => PropertySpecKind::LastEditedBy,
        other => PropertySpecKind::Unknown {
            type_name: unknown_tag("property spec", other),
            raw: raw.clone(),
        },
    };
    Ok(PropertySpec {
        id: fields.opt_string("id")?,
        name: fields
            .opt_string("name")?
            .unwrap_or_else(|| name.to_string()),
        kind,
    })
}

fn encode_spec(spec: &PropertySpec) -> Value {
    let options = |options: &[SelectOption]| {
        json!({ "options": options.iter().map(Encode::encode).collect::<Vec<_>>() })
    };
    let config = match &spec.kind {
        PropertySpecKind::Number { format } => json!({ "format": format.as_str() }),
        PropertySpecKind::Select { options: list }
        | PropertySpecKind::MultiSelect { options: list }
        | PropertySpecKind::Status { options: list } => options(list.as_slice()),
        PropertySpecKind::Formula { expression } => json!({ "expression": expression }),
        PropertySpecKind::Relation { database_id } => {
            json!({ "database_id": database_id.to_dashed() })
        }
        PropertySpecKind::Rollup {
            relation_property_name,
            rollup_property_name,
            function,
        } => json!({
            "relation_property_name": relation_property_name,
            "rollup_property_name": rollup_property_name,
            "function": function,
        }),
        PropertySpecKind::Unknown { raw, .. } => return raw.clone(),
        _ => json!({}),
    };
    let mut object = Map::new();
    object.insert(spec.kind.type_name().to_string(), config);
    Value::Object(object)
}

impl Decode for PropertySpecList {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let Some(specs) = raw.as_object() else {
            return Err(DecodeError::new("property spec", "<root>", "is not an object", raw));
        };
        let mut list = PropertySpecList::new();
        for (name, spec) in specs {
            let spec = decode_spec(name, spec).map_err(|e| DecodeError {
                field: format!("{}.{}", name, e.field),
                ..e
            })?;
            list.insert(spec);
        }
        Ok(list)
    }
}

impl Encode for PropertySpecList {
    fn encode(&self) -> Value {
        let specs: Map<String, Value> = self
            .iter()
            .map(|spec| (spec.name.clone(), encode_spec(spec)))
            .collect();
        Value::Object(specs)
    }
}

impl Decode for Database {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("database", raw)?;
        Ok(Database {
            id: fields.parse("id")?,
            title: RichTextList::decode(fields.get("title").unwrap_or(&Value::Null))?,
            description: RichTextList::decode(fields.get("description").unwrap_or(&Value::Null))?,
            icon: opt_icon(&fields)?,
            parent: Parent::decode(fields.required("parent")?)?,
            url: fields.opt_string("url")?,
            properties: match fields.get("properties") {
                Some(properties) => PropertySpecList::decode(properties)?,
                None => PropertySpecList::new(),
            },
            created_time: fields.opt_parse("created_time")?,
            last_edited_time: fields.opt_parse("last_edited_time")?,
            archived: fields.bool_or("archived", false)?,
            is_inline: fields.bool_or("is_inline", false)?,
        })
    }
}

impl Encode for Database {
    /// Update form: title, description and schema.
    fn encode(&self) -> Value {
        let mut database = Map::new();
        database.insert("title".into(), self.title.encode());
        database.insert("description".into(), self.description.encode());
        database.insert("properties".into(), self.properties.encode());
        if let Some(icon) = request_icon(&self.icon) {
            database.insert("icon".into(), icon);
        }
        Value::Object(database)
    }
}

impl Decode for DatabaseCreate {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("database", raw)?;
        let parent: ParentPage = fields.parse("parent")?;
        Ok(DatabaseCreate {
            parent: parent.page_id,
            title: RichTextList::decode(fields.get("title").unwrap_or(&Value::Null))?,
            properties: PropertySpecList::decode(fields.required("properties")?)?,
            icon: opt_icon(&fields)?,
            is_inline: fields.bool_or("is_inline", false)?,
        })
    }
}

impl Encode for DatabaseCreate {
    fn encode(&self) -> Value {
        let mut database = Map::new();
        database.insert(
            "parent".into(),
            Parent::Page(self.parent.clone()).encode(),
        );
        database.insert("title".into(), self.title.encode());
        database.insert("properties".into(), self.properties.encode());
        if let Some(icon) = request_icon(&self.icon) {
            database.insert("icon".into(), icon);
        }
        if self.is_inline {
            database.insert("is_inline".into(), Value::from(true));
        }
        Value::Object(database)
    }
}

impl Encode for DatabaseUpdate {
    /// Only the fields that were set.
    fn encode(&self) -> Value {
        let mut update = Map::new();
        if let Some(title) = &self.title {
            update.insert("title".into(), title.encode());
        }
        if let Some(description) = &self.description {
            update.insert("description".into(), description.encode());
        }
        if let Some(properties) = &self.properties {
            update.insert("properties".into(), properties.encode());
        }
        Value::Object(update)
    }
}
