use super::{decode_all, encode_all, unknown_tag, Decode, Encode, Fields};
use crate::error::DecodeError;
use crate::model::{Block, BlockContent, BlockList, RichTextList, TextBlock};
use crate::types::Color;
use serde_json::{json, Map, Value};

const BLOCK_TYPES: &[&str] = &[
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "to_do",
    "toggle",
    "quote",
    "code",
    "equation",
    "divider",
    "child_page",
    "child_database",
    "bookmark",
    "embed",
];

/// Rich text under `rich_text`, or the older `text` key.
fn rich_text(payload: &Fields<'_>) -> Result<RichTextList, DecodeError> {
    let spans = match payload.get("rich_text") {
        Some(spans) => spans,
        None => payload.get("text").unwrap_or(&Value::Null),
    };
    RichTextList::decode(spans)
}

fn text_block(payload: &Fields<'_>) -> Result<TextBlock, DecodeError> {
    Ok(TextBlock {
        rich_text: rich_text(payload)?,
        color: payload.opt_parse("color")?.unwrap_or_default(),
    })
}

fn caption(payload: &Fields<'_>) -> Result<RichTextList, DecodeError> {
    RichTextList::decode(payload.get("caption").unwrap_or(&Value::Null))
}

impl Decode for Block {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("block", raw)?;
        let type_name = fields.discriminator(BLOCK_TYPES)?;

        let (content, children) = if BLOCK_TYPES.contains(&type_name) {
            let payload = fields.object(type_name)?;
            let content = match type_name {
                "paragraph" => BlockContent::Paragraph(text_block(&payload)?),
                "heading_1" => BlockContent::Heading1(text_block(&payload)?),
                "heading_2" => BlockContent::Heading2(text_block(&payload)?),
                "heading_3" => BlockContent::Heading3(text_block(&payload)?),
                "bulleted_list_item" => BlockContent::BulletedListItem(text_block(&payload)?),
                "numbered_list_item" => BlockContent::NumberedListItem(text_block(&payload)?),
                "to_do" => BlockContent::ToDo {
                    text: text_block(&payload)?,
                    checked: payload.bool_or("checked", false)?,
                },
                "toggle" => BlockContent::Toggle(text_block(&payload)?),
                "quote" => BlockContent::Quote(text_block(&payload)?),
                "code" => BlockContent::Code {
                    rich_text: rich_text(&payload)?,
                    language: payload.opt_string("language")?.unwrap_or_default(),
                    caption: caption(&payload)?,
                },
                "equation" => BlockContent::Equation {
                    expression: payload.str("expression")?.to_string(),
                },
                "divider" => BlockContent::Divider,
                "child_page" => BlockContent::ChildPage {
                    title: payload.opt_string("title")?.unwrap_or_default(),
                },
                "child_database" => BlockContent::ChildDatabase {
                    title: payload.opt_string("title")?.unwrap_or_default(),
                },
                "bookmark" => BlockContent::Bookmark {
                    url: payload.str("url")?.to_string(),
                    caption: caption(&payload)?,
                },
                _ => BlockContent::Embed {
                    url: payload.str("url")?.to_string(),
                },
            };
            let children: Vec<Block> = decode_all(payload.array_or_empty("children")?)?;
            (content, children)
        } else {
            let content = BlockContent::Unknown {
                type_name: unknown_tag("block", type_name),
                raw: raw.clone(),
            };
            (content, Vec::new())
        };

        Ok(Block {
            id: fields.opt_parse("id")?,
            created_time: fields.opt_parse("created_time")?,
            last_edited_time: fields.opt_parse("last_edited_time")?,
            has_children: fields.bool_or("has_children", !children.is_empty())?,
            archived: fields.bool_or("archived", false)?,
            content,
            children,
        })
    }
}

fn encode_text(text: &TextBlock) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("rich_text".into(), text.rich_text.encode());
    if text.color != Color::Default {
        payload.insert("color".into(), Value::from(text.color.as_str()));
    }
    payload
}

impl Encode for Block {
    /// Append form: type and payload, with nested children inside the
    /// payload. Ids and timestamps are left out.
    fn encode(&self) -> Value {
        let mut payload = match &self.content {
            BlockContent::Paragraph(text)
            | BlockContent::Heading1(text)
            | BlockContent::Heading2(text)
            | BlockContent::Heading3(text)
            | BlockContent::BulletedListItem(text)
            | BlockContent::NumberedListItem(text)
            | BlockContent::Toggle(text)
            | BlockContent::Quote(text) => encode_text(text),
            BlockContent::ToDo { text, checked } => {
                let mut payload = encode_text(text);
                payload.insert("checked".into(), Value::from(*checked));
                payload
            }
            BlockContent::Code {
                rich_text,
                language,
                caption,
            } => {
                let mut payload = Map::new();
                payload.insert("rich_text".into(), rich_text.encode());
                payload.insert("language".into(), Value::from(language.as_str()));
                if !caption.is_empty() {
                    payload.insert("caption".into(), caption.encode());
                }
                payload
            }
            BlockContent::Equation { expression } => {
                json_object(json!({ "expression": expression }))
            }
            BlockContent::Divider => Map::new(),
            BlockContent::ChildPage { title } | BlockContent::ChildDatabase { title } => {
                json_object(json!({ "title": title }))
            }
            BlockContent::Bookmark { url, caption } => {
                let mut payload = json_object(json!({ "url": url }));
                if !caption.is_empty() {
                    payload.insert("caption".into(), caption.encode());
                }
                payload
            }
            BlockContent::Embed { url } => json_object(json!({ "url": url })),
            BlockContent::Unknown { raw, .. } => return raw.clone(),
        };
        if !self.children.is_empty() {
            payload.insert("children".into(), encode_all(&self.children));
        }

        let type_name = self.content.type_name();
        let mut block = Map::new();
        block.insert("object".into(), Value::from("block"));
        block.insert("type".into(), Value::from(type_name));
        block.insert(type_name.to_string(), Value::Object(payload));
        Value::Object(block)
    }
}

fn json_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl Decode for BlockList {
    /// Reads the `{"children": [...]}` body of an append request.
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of("block list", raw)?;
        Ok(BlockList::from(decode_all::<Block>(fields.array("children")?)?))
    }
}

impl Encode for BlockList {
    fn encode(&self) -> Value {
        json!({ "children": encode_all(self.blocks()) })
    }
}
