use super::{decode_all, encode_all, unknown_tag, Decode, Encode, Fields};
use crate::error::DecodeError;
use crate::model::{Mention, RichText, RichTextContent, RichTextList};
use serde::Deserialize;
use serde_json::{json, Map, Value};

const SPAN_TYPES: &[&str] = &["text", "mention", "equation"];
const MENTION_TYPES: &[&str] = &["user", "page", "database", "date"];

#[derive(Deserialize)]
struct Link {
    url: String,
}

impl Decode for Mention {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("mention", raw)?;
        Ok(match fields.discriminator(MENTION_TYPES)? {
            "user" => Mention::User(fields.parse("user")?),
            "page" => Mention::Page(fields.object("page")?.parse("id")?),
            "database" => Mention::Database(fields.object("database")?.parse("id")?),
            "date" => Mention::Date(fields.parse("date")?),
            other => Mention::Unknown {
                type_name: unknown_tag("mention", other),
                raw: raw.clone(),
            },
        })
    }
}

impl Encode for Mention {
    fn encode(&self) -> Value {
        match self {
            Mention::User(user) => json!({"type": "user", "user": user.encode()}),
            Mention::Page(id) => json!({"type": "page", "page": {"id": id.to_dashed()}}),
            Mention::Database(id) => {
                json!({"type": "database", "database": {"id": id.to_dashed()}})
            }
            Mention::Date(date) => json!({"type": "date", "date": date.encode()}),
            Mention::Unknown { raw, .. } => raw.clone(),
        }
    }
}

impl Decode for RichText {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("rich text", raw)?;
        let content = match fields.discriminator(SPAN_TYPES)? {
            "text" => {
                let text = fields.object("text")?;
                RichTextContent::Text {
                    content: text.str("content")?.to_string(),
                    link: text.opt_parse::<Link>("link")?.map(|link| link.url),
                }
            }
            "mention" => RichTextContent::Mention(Mention::decode(fields.required("mention")?)?),
            "equation" => RichTextContent::Equation {
                expression: fields.object("equation")?.str("expression")?.to_string(),
            },
            other => RichTextContent::Unknown {
                type_name: unknown_tag("rich text", other),
                raw: raw.clone(),
            },
        };

        let annotations = fields.opt_parse("annotations")?.unwrap_or_default();

        // Request-shaped spans carry no plain_text; derive what the API would
        let plain_text = match fields.opt_string("plain_text")? {
            Some(text) => text,
            None => match &content {
                RichTextContent::Text { content, .. } => content.clone(),
                RichTextContent::Equation { expression } => expression.clone(),
                _ => String::new(),
            },
        };

        Ok(RichText {
            content,
            annotations,
            plain_text,
            href: fields.opt_string("href")?,
        })
    }
}

impl Encode for RichText {
    fn encode(&self) -> Value {
        let mut span = Map::new();
        span.insert("type".into(), Value::from(self.content.type_name()));
        match &self.content {
            RichTextContent::Text { content, link } => {
                let mut text = Map::new();
                text.insert("content".into(), Value::from(content.as_str()));
                if let Some(url) = link {
                    text.insert("link".into(), json!({ "url": url }));
                }
                span.insert("text".into(), Value::Object(text));
            }
            RichTextContent::Mention(mention) => {
                span.insert("mention".into(), mention.encode());
            }
            RichTextContent::Equation { expression } => {
                span.insert("equation".into(), json!({ "expression": expression }));
            }
            RichTextContent::Unknown { raw, .. } => return raw.clone(),
        }
        if !self.annotations.is_default() {
            span.insert("annotations".into(), self.annotations.encode());
        }
        Value::Object(span)
    }
}

impl Decode for RichTextList {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Array(spans) => Ok(RichTextList::from_spans(decode_all(spans)?)),
            Value::Null => Ok(RichTextList::new()),
            other => Err(DecodeError::new("rich text", "<root>", "is not an array", other)),
        }
    }
}

impl Encode for RichTextList {
    fn encode(&self) -> Value {
        encode_all(self.spans())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Annotations;
    use crate::types::{Color, DateOrDateRange, DateOrDateTime};
    use pretty_assertions::assert_eq;

    const PAGE: &str = "b55c9c91-384d-452b-81db-d1ef79372b75";

    #[test]
    fn decodes_api_text_span() {
        let raw = json!({
            "type": "text",
            "text": {"content": "Famous", "link": {"url": "https://example.com"}},
            "annotations": {
                "bold": true, "italic": false, "strikethrough": false,
                "underline": false, "code": false, "color": "blue_background"
            },
            "plain_text": "Famous",
            "href": "https://example.com"
        });
        let span = RichText::decode(&raw).unwrap();
        assert_eq!(
            span.content,
            RichTextContent::Text {
                content: "Famous".into(),
                link: Some("https://example.com".into())
            }
        );
        assert!(span.annotations.bold);
        assert_eq!(span.annotations.color, Color::BlueBackground);
        assert_eq!(span.href.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn default_annotations_are_not_sent() {
        let list = RichTextList::new().text("plain");
        assert_eq!(
            list.encode(),
            json!([{"type": "text", "text": {"content": "plain"}}])
        );
    }

    #[test]
    fn every_span_kind_survives_a_round_trip() {
        let list = RichTextList::new()
            .text("Hello ")
            .text_with("bold", Annotations::BOLD.with_color(Color::Red))
            .link("site", "https://example.com")
            .page_mention(PAGE)
            .unwrap()
            .database_mention(PAGE)
            .unwrap()
            .user_mention(PAGE)
            .unwrap()
            .date_mention(DateOrDateRange::single(
                DateOrDateTime::parse("2021-05-13").unwrap(),
            ))
            .equation("x^2")
            .unwrap();

        assert_eq!(RichTextList::decode(&list.encode()).unwrap(), list);
    }

    #[test]
    fn unknown_mention_is_kept() {
        let raw = json!({
            "type": "mention",
            "mention": {"type": "link_preview", "link_preview": {"url": "https://x.y"}},
            "plain_text": "https://x.y"
        });
        let span = RichText::decode(&raw).unwrap();
        match &span.content {
            RichTextContent::Mention(Mention::Unknown { type_name, raw }) => {
                assert_eq!(type_name, "link_preview");
                assert_eq!(raw["link_preview"]["url"], "https://x.y");
            }
            other => panic!("expected unknown mention, got {:?}", other),
        }
    }

    #[test]
    fn malformed_known_span_fails_with_field() {
        let raw = json!({"type": "text", "text": {"link": null}});
        let err = RichText::decode(&raw).unwrap_err();
        assert_eq!(err.field, "text.content");
    }

    #[test]
    fn partial_annotations_fill_in_defaults() {
        let raw = json!({
            "type": "text",
            "text": {"content": "x"},
            "annotations": {"italic": true}
        });
        let span = RichText::decode(&raw).unwrap();
        assert_eq!(span.annotations, Annotations::ITALIC);
        assert_eq!(span.annotations.color, Color::Default);
    }
}
