use super::{encode_all, unknown_tag, Decode, Encode, Fields};
use crate::error::DecodeError;
use crate::model::{
    FormulaValue, PropertyTypeValue, PropertyValue, PropertyValueList, RichTextList, RollupValue,
    SelectOption,
};
use crate::types::{Number, PageId};
use serde::Deserialize;
use serde_json::{json, Map, Value};

const PROPERTY_TYPES: &[&str] = &[
    "title",
    "rich_text",
    "text",
    "number",
    "select",
    "status",
    "multi_select",
    "date",
    "people",
    "relation",
    "checkbox",
    "url",
    "email",
    "phone_number",
    "files",
    "formula",
    "rollup",
    "created_time",
    "created_by",
    "last_edited_time",
    "last_edited_by",
    "unique_id",
];

#[derive(Deserialize)]
struct PageReference {
    id: PageId,
}

#[derive(Deserialize)]
struct UniqueId {
    prefix: Option<String>,
    number: Option<Number>,
}

/// Reference form, used in property values: by name when there is one, so
/// the API can resolve it or create the option, otherwise by id.
fn option_reference(option: &SelectOption) -> Value {
    match (&option.id, option.name.is_empty()) {
        (Some(id), true) => json!({ "id": id }),
        _ => json!({ "name": option.name }),
    }
}

fn optional_reference(option: &Option<SelectOption>) -> Value {
    option.as_ref().map(option_reference).unwrap_or(Value::Null)
}

impl Decode for FormulaValue {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("formula", raw)?;
        Ok(match fields.discriminator(&["string", "number", "boolean", "date"])? {
            "string" => FormulaValue::String(fields.opt_parse("string")?),
            "number" => FormulaValue::Number(fields.opt_parse("number")?),
            "boolean" => FormulaValue::Boolean(fields.opt_parse("boolean")?),
            "date" => FormulaValue::Date(fields.opt_parse("date")?),
            other => FormulaValue::Unknown {
                type_name: unknown_tag("formula", other),
                raw: raw.clone(),
            },
        })
    }
}

impl Encode for FormulaValue {
    fn encode(&self) -> Value {
        match self {
            FormulaValue::String(text) => json!({"type": "string", "string": text}),
            FormulaValue::Number(number) => json!({"type": "number", "number": number}),
            FormulaValue::Boolean(flag) => json!({"type": "boolean", "boolean": flag}),
            FormulaValue::Date(date) => json!({"type": "date", "date": date}),
            FormulaValue::Unknown { raw, .. } => raw.clone(),
        }
    }
}

impl Decode for RollupValue {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("rollup", raw)?;
        Ok(match fields.discriminator(&["number", "date", "array"])? {
            "number" => RollupValue::Number(fields.opt_parse("number")?),
            "date" => RollupValue::Date(fields.opt_parse("date")?),
            "array" => {
                let items = fields
                    .array("array")?
                    .iter()
                    .map(|item| PropertyValue::decode(item).map(|value| value.value))
                    .collect::<Result<_, _>>()?;
                RollupValue::Array(items)
            }
            other => RollupValue::Unknown {
                type_name: unknown_tag("rollup", other),
                raw: raw.clone(),
            },
        })
    }
}

impl Encode for RollupValue {
    fn encode(&self) -> Value {
        match self {
            RollupValue::Number(number) => json!({"type": "number", "number": number}),
            RollupValue::Date(date) => json!({"type": "date", "date": date}),
            RollupValue::Array(items) => {
                let items: Vec<Value> = items
                    .iter()
                    .map(|item| {
                        let mut value = encode_type_value(item);
                        if let Value::Object(map) = &mut value {
                            map.insert("type".into(), Value::from(item.type_name()));
                        }
                        value
                    })
                    .collect();
                json!({"type": "array", "array": items})
            }
            RollupValue::Unknown { raw, .. } => raw.clone(),
        }
    }
}

impl Decode for PropertyValue {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("property value", raw)?;
        let type_name = fields.discriminator(PROPERTY_TYPES)?;
        let value = match type_name {
            "title" => PropertyTypeValue::Title(RichTextList::decode(fields.required("title")?)?),
            "rich_text" | "text" => PropertyTypeValue::RichText(RichTextList::decode(
                fields.get(type_name).unwrap_or(&Value::Null),
            )?),
            "number" => PropertyTypeValue::Number(fields.opt_parse("number")?),
            "select" => PropertyTypeValue::Select(fields.opt_parse("select")?),
            "status" => PropertyTypeValue::Status(fields.opt_parse("status")?),
            "multi_select" => {
                PropertyTypeValue::MultiSelect(fields.opt_parse("multi_select")?.unwrap_or_default())
            }
            "date" => PropertyTypeValue::Date(fields.opt_parse("date")?),
            "people" => PropertyTypeValue::People(fields.opt_parse("people")?.unwrap_or_default()),
            "relation" => {
                let pages: Option<Vec<PageReference>> = fields.opt_parse("relation")?;
                PropertyTypeValue::Relation(
                    pages.unwrap_or_default().into_iter().map(|page| page.id).collect(),
                )
            }
            "checkbox" => PropertyTypeValue::Checkbox(fields.bool_or("checkbox", false)?),
            "url" => PropertyTypeValue::Url(fields.opt_string("url")?),
            "email" => PropertyTypeValue::Email(fields.opt_string("email")?),
            "phone_number" => PropertyTypeValue::PhoneNumber(fields.opt_string("phone_number")?),
            "files" => PropertyTypeValue::Files(fields.opt_parse("files")?.unwrap_or_default()),
            "formula" => PropertyTypeValue::Formula(FormulaValue::decode(fields.required("formula")?)?),
            "rollup" => PropertyTypeValue::Rollup(RollupValue::decode(fields.required("rollup")?)?),
            "created_time" => PropertyTypeValue::CreatedTime(fields.parse("created_time")?),
            "created_by" => PropertyTypeValue::CreatedBy(fields.parse("created_by")?),
            "last_edited_time" => PropertyTypeValue::LastEditedTime(fields.parse("last_edited_time")?),
            "last_edited_by" => PropertyTypeValue::LastEditedBy(fields.parse("last_edited_by")?),
            "unique_id" => {
                let UniqueId { prefix, number } = fields.parse("unique_id")?;
                PropertyTypeValue::UniqueId { prefix, number }
            }
            other => PropertyTypeValue::Unknown {
                type_name: unknown_tag("property", other),
                raw: raw.clone(),
            },
        };
        Ok(PropertyValue {
            id: fields.opt_string("id")?,
            value,
        })
    }
}

/// The `{"<type>": payload}` object for one value, without `type` or `id`.
fn encode_type_value(value: &PropertyTypeValue) -> Value {
    let payload = match value {
        PropertyTypeValue::Title(text) | PropertyTypeValue::RichText(text) => text.encode(),
        PropertyTypeValue::Number(number) => json!(number),
        PropertyTypeValue::Select(option) | PropertyTypeValue::Status(option) => {
            optional_reference(option)
        }
        PropertyTypeValue::MultiSelect(options) => {
            Value::Array(options.iter().map(option_reference).collect())
        }
        PropertyTypeValue::Date(date) => json!(date),
        PropertyTypeValue::People(users) => encode_all(users),
        PropertyTypeValue::Relation(pages) => {
            Value::Array(pages.iter().map(|page| json!({ "id": page })).collect())
        }
        PropertyTypeValue::Checkbox(checked) => Value::from(*checked),
        PropertyTypeValue::Url(text)
        | PropertyTypeValue::Email(text)
        | PropertyTypeValue::PhoneNumber(text) => json!(text),
        PropertyTypeValue::Files(files) => encode_all(files),
        PropertyTypeValue::Formula(formula) => formula.encode(),
        PropertyTypeValue::Rollup(rollup) => rollup.encode(),
        PropertyTypeValue::CreatedTime(at) | PropertyTypeValue::LastEditedTime(at) => {
            Value::from(at.to_rfc3339())
        }
        PropertyTypeValue::CreatedBy(user) | PropertyTypeValue::LastEditedBy(user) => user.encode(),
        PropertyTypeValue::UniqueId { prefix, number } => {
            json!({ "prefix": prefix, "number": number })
        }
        PropertyTypeValue::Unknown { raw, .. } => return raw.clone(),
    };
    let mut object = Map::new();
    object.insert(value.type_name().to_string(), payload);
    Value::Object(object)
}

impl Encode for PropertyValue {
    fn encode(&self) -> Value {
        encode_type_value(&self.value)
    }
}

impl Decode for PropertyValueList {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let Some(properties) = raw.as_object() else {
            return Err(DecodeError::new("properties", "<root>", "is not an object", raw));
        };
        let mut list = PropertyValueList::new();
        for (name, value) in properties {
            let decoded = PropertyValue::decode(value).map_err(|e| DecodeError {
                field: format!("{}.{}", name, e.field),
                ..e
            })?;
            list.insert(name.as_str(), decoded);
        }
        Ok(list)
    }
}

impl Encode for PropertyValueList {
    /// Request form: read-only values are left out.
    fn encode(&self) -> Value {
        let properties: Map<String, Value> = self
            .writable()
            .map(|(name, value)| (name.to_string(), value.encode()))
            .collect();
        Value::Object(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateOrDateRange, DateOrDateTime, UserId};
    use pretty_assertions::assert_eq;

    const PAGE_A: &str = "b55c9c91384d452b81dbd1ef79372b75";
    const PAGE_B: &str = "c55c9c91-384d-452b-81db-d1ef79372b76";
    const USER: &str = "6d6e4e1f-2a9b-4c3c-9d6e-000000000001";

    fn day(s: &str) -> DateOrDateTime {
        DateOrDateTime::parse(s).unwrap()
    }

    #[test]
    fn builder_values_survive_a_round_trip() {
        let props = PropertyValueList::new()
            .number("Legs", 4)
            .number("Weight", Number::float(12.5).unwrap())
            .clear_number("Unknown weight")
            .text("Famous quote", "imp")
            .rich_text(
                "Notes",
                RichTextList::new().text("see ").page_mention(PAGE_A).unwrap(),
            )
            .title("Name", "Cat")
            .select_by_name("Species", "Feline")
            .clear_select("Owner group")
            .status_by_name("Stage", "Adopted")
            .multi_select_by_names("Traits", ["Fluffy", "Loud"])
            .date("Birthday", DateOrDateRange::single(day("2020-02-01")))
            .date(
                "Stay",
                DateOrDateRange::range(day("2021-01-01"), day("2021-01-31"))
                    .with_time_zone("Europe/Paris"),
            )
            .clear_date("Vet visit")
            .relation(
                "Siblings",
                [PageId::parse(PAGE_A).unwrap(), PageId::parse(PAGE_B).unwrap()],
            )
            .people("Carers", [UserId::parse(USER).unwrap()])
            .checkbox("Vaccinated", true)
            .email("Contact", "cat@example.com")
            .clear_email("Backup contact")
            .phone_number("Phone", "+33 1 23 45 67 89")
            .url("Website", "https://cats.example.com")
            .clear_url("Old website");

        let encoded = props.encode();
        assert_eq!(PropertyValueList::decode(&encoded).unwrap(), props);
    }

    #[test]
    fn wire_shapes_follow_the_api() {
        let props = PropertyValueList::new()
            .number("Legs", 4)
            .clear_select("Species")
            .date("Start", DateOrDateRange::single(day("2021-05-13")))
            .relation("Friends", [PageId::parse(PAGE_A).unwrap()]);

        assert_eq!(
            props.encode(),
            json!({
                "Legs": {"number": 4},
                "Species": {"select": null},
                "Start": {"date": {"start": "2021-05-13"}},
                "Friends": {"relation": [{"id": "b55c9c91-384d-452b-81db-d1ef79372b75"}]}
            })
        );
    }

    #[test]
    fn date_range_keeps_both_ends() {
        let range = DateOrDateRange::range(day("2021-01-01"), day("2020-01-01"));
        assert_eq!(
            range.encode(),
            json!({"start": "2021-01-01", "end": "2020-01-01"})
        );
    }

    #[test]
    fn select_option_without_name_is_sent_by_id() {
        let option = SelectOption {
            id: Some("abc".into()),
            name: String::new(),
            color: None,
        };
        assert_eq!(option_reference(&option), json!({"id": "abc"}));
        assert_eq!(
            option_reference(&SelectOption::named("New")),
            json!({"name": "New"})
        );
    }

    #[test]
    fn read_only_values_decode_but_are_not_resent() {
        let raw = json!({
            "Name": {"id": "title", "type": "title", "title": []},
            "Score": {"id": "a%3Db", "type": "formula", "formula": {"type": "number", "number": 7}},
            "Total": {"id": "c", "type": "rollup", "rollup": {"type": "number", "number": 1.5, "function": "sum"}},
            "Created": {"id": "d", "type": "created_time", "created_time": "2021-05-13T10:00:00.000Z"},
            "Attachments": {"id": "e", "type": "files", "files": [
                {"name": "a.png", "type": "external", "external": {"url": "https://x.y/a.png"}}
            ]}
        });
        let props = PropertyValueList::decode(&raw).unwrap();
        assert_eq!(props.len(), 5);
        assert_eq!(
            props.get("Score").map(|v| &v.value),
            Some(&PropertyTypeValue::Formula(FormulaValue::Number(Some(Number::int(7)))))
        );
        assert_eq!(props.get("Score").and_then(|v| v.id.as_deref()), Some("a%3Db"));
        assert_eq!(props.encode(), json!({"Name": {"title": []}}));
    }

    #[test]
    fn unknown_property_type_is_kept_raw() {
        let raw = json!({"id": "x", "type": "verification", "verification": {"state": "verified"}});
        let value = PropertyValue::decode(&raw).unwrap();
        assert_eq!(
            value.value,
            PropertyTypeValue::Unknown {
                type_name: "verification".into(),
                raw: raw.clone()
            }
        );
        assert_eq!(value.encode(), raw);
    }

    #[test]
    fn decode_error_names_the_property() {
        let raw = json!({"Legs": {"type": "number", "number": "four"}});
        let err = PropertyValueList::decode(&raw).unwrap_err();
        assert_eq!(err.field, "Legs.number");
        assert!(err.fragment.contains("four"));
    }

    #[test]
    fn rollup_array_holds_typed_values() {
        let raw = json!({
            "type": "rollup",
            "rollup": {
                "type": "array",
                "array": [{"type": "number", "number": 3}, {"type": "checkbox", "checkbox": true}],
                "function": "show_original"
            }
        });
        let value = PropertyValue::decode(&raw).unwrap().value;
        assert_eq!(
            value,
            PropertyTypeValue::Rollup(RollupValue::Array(vec![
                PropertyTypeValue::Number(Some(Number::int(3))),
                PropertyTypeValue::Checkbox(true),
            ]))
        );
    }

    #[test]
    fn legacy_text_key_reads_as_rich_text() {
        let raw = json!({"text": [{"type": "text", "text": {"content": "hi"}}]});
        match PropertyValue::decode(&raw).unwrap().value {
            PropertyTypeValue::RichText(text) => assert_eq!(text.plain_text(), "hi"),
            other => panic!("expected rich text, got {:?}", other),
        }
    }

    #[test]
    fn files_keep_url_whatever_the_hosting() {
        let raw = json!({"type": "files", "files": [
            {"name": "a.png", "type": "file", "file": {
                "url": "https://s3.example.com/a.png",
                "expiry_time": "2024-03-01T10:00:00.000Z"
            }},
            {"name": "b.png", "type": "external", "external": {"url": "https://x.y/b.png"}},
            {"name": "c.png", "type": "drive", "drive": {"url": "https://drive.example.com/c.png"}}
        ]});
        let files = match PropertyValue::decode(&raw).unwrap().value {
            PropertyTypeValue::Files(files) => files,
            other => panic!("expected files, got {:?}", other),
        };

        let urls: Vec<&str> = files.iter().map(|file| file.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://s3.example.com/a.png",
                "https://x.y/b.png",
                "https://drive.example.com/c.png"
            ]
        );
        assert!(files[0].expiry_time.is_some());
        assert_eq!(
            files[1].encode(),
            json!({"name": "b.png", "type": "external", "external": {"url": "https://x.y/b.png"}})
        );
    }

    #[test]
    fn file_without_payload_names_the_property_field() {
        let raw = json!({"type": "files", "files": [{"name": "x", "type": "drive"}]});
        let err = PropertyValue::decode(&raw).unwrap_err();
        assert_eq!(err.field, "files");
        assert!(err.reason.contains("'drive' has no payload"));
    }

    #[test]
    fn people_and_relations_read_references() {
        let raw = json!({
            "Carers": {"type": "people", "people": [{"object": "user", "id": USER}]},
            "Siblings": {"type": "relation", "relation": [{"id": PAGE_B}], "has_more": false},
            "Nobody": {"type": "people", "people": null}
        });
        let props = PropertyValueList::decode(&raw).unwrap();
        match &props.get("Carers").unwrap().value {
            PropertyTypeValue::People(users) => {
                assert_eq!(users[0].id, UserId::parse(USER).unwrap());
                assert_eq!(users[0].kind, None);
            }
            other => panic!("expected people, got {:?}", other),
        }
        assert_eq!(
            props.get("Siblings").unwrap().value,
            PropertyTypeValue::Relation(vec![PageId::parse(PAGE_B).unwrap()])
        );
        assert_eq!(
            props.get("Nobody").unwrap().value,
            PropertyTypeValue::People(Vec::new())
        );
    }
}
