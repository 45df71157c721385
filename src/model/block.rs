//! Page content blocks and the builder used to append them.

use super::RichTextList;
use crate::types::{BlockId, Color, ValidationError};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Rich text plus color: the shared payload of paragraph-like blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub rich_text: RichTextList,
    pub color: Color,
}

impl TextBlock {
    pub fn new(rich_text: impl Into<RichTextList>) -> Self {
        Self {
            rich_text: rich_text.into(),
            color: Color::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo {
        text: TextBlock,
        checked: bool,
    },
    Toggle(TextBlock),
    Quote(TextBlock),
    Code {
        rich_text: RichTextList,
        language: String,
        caption: RichTextList,
    },
    Equation {
        expression: String,
    },
    Divider,
    ChildPage {
        title: String,
    },
    ChildDatabase {
        title: String,
    },
    Bookmark {
        url: String,
        caption: RichTextList,
    },
    Embed {
        url: String,
    },
    Unknown {
        type_name: String,
        raw: Value,
    },
}

/// Macro to reduce boilerplate over the paragraph-like variants
macro_rules! text_blocks {
    ($self:expr, $text:ident => $result:expr, _ => $fallback:expr) => {
        match $self {
            BlockContent::Paragraph($text)
            | BlockContent::Heading1($text)
            | BlockContent::Heading2($text)
            | BlockContent::Heading3($text)
            | BlockContent::BulletedListItem($text)
            | BlockContent::NumberedListItem($text)
            | BlockContent::Toggle($text)
            | BlockContent::Quote($text)
            | BlockContent::ToDo { text: $text, .. } => $result,
            _ => $fallback,
        }
    };
}

impl BlockContent {
    pub fn type_name(&self) -> &str {
        match self {
            BlockContent::Paragraph(_) => "paragraph",
            BlockContent::Heading1(_) => "heading_1",
            BlockContent::Heading2(_) => "heading_2",
            BlockContent::Heading3(_) => "heading_3",
            BlockContent::BulletedListItem(_) => "bulleted_list_item",
            BlockContent::NumberedListItem(_) => "numbered_list_item",
            BlockContent::ToDo { .. } => "to_do",
            BlockContent::Toggle(_) => "toggle",
            BlockContent::Quote(_) => "quote",
            BlockContent::Code { .. } => "code",
            BlockContent::Equation { .. } => "equation",
            BlockContent::Divider => "divider",
            BlockContent::ChildPage { .. } => "child_page",
            BlockContent::ChildDatabase { .. } => "child_database",
            BlockContent::Bookmark { .. } => "bookmark",
            BlockContent::Embed { .. } => "embed",
            BlockContent::Unknown { type_name, .. } => type_name,
        }
    }

    pub fn text(&self) -> Option<&TextBlock> {
        text_blocks!(self, text => Some(text), _ => None)
    }

    /// Whether the block can carry nested children in an append request.
    pub fn accepts_children(&self) -> bool {
        text_blocks!(self, _text => !matches!(
            self,
            BlockContent::Heading1(_) | BlockContent::Heading2(_) | BlockContent::Heading3(_)
        ), _ => false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Absent on blocks built locally for an append request.
    pub id: Option<BlockId>,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub last_edited_time: Option<DateTime<FixedOffset>>,
    pub has_children: bool,
    pub archived: bool,
    pub content: BlockContent,
    /// Filled only when children were fetched or built; `has_children` says
    /// whether any exist remotely.
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(content: BlockContent) -> Self {
        Self {
            id: None,
            created_time: None,
            last_edited_time: None,
            has_children: false,
            archived: false,
            content,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }

    pub fn plain_text(&self) -> String {
        match &self.content {
            BlockContent::Code { rich_text, .. } => rich_text.plain_text(),
            BlockContent::Equation { expression } => expression.clone(),
            BlockContent::ChildPage { title } | BlockContent::ChildDatabase { title } => {
                title.clone()
            }
            content => content
                .text()
                .map(|text| text.rich_text.plain_text())
                .unwrap_or_default(),
        }
    }
}

/// Builder for the children of an append request.
///
/// ```
/// use notionkit::BlockList;
///
/// let blocks = BlockList::new()
///     .heading_1("Shopping")
///     .to_do("Milk", false)
///     .toggle("Details")
///     .nest(BlockList::new().paragraph("Whole, not skimmed"))?;
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks.blocks()[2].children.len(), 1);
/// # Ok::<(), notionkit::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockList(Vec<Block>);

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, block: Block) -> Self {
        self.0.push(block);
        self
    }

    fn content(self, content: BlockContent) -> Self {
        self.push(Block::new(content))
    }

    pub fn paragraph(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Paragraph(TextBlock::new(text)))
    }

    pub fn heading_1(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Heading1(TextBlock::new(text)))
    }

    pub fn heading_2(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Heading2(TextBlock::new(text)))
    }

    pub fn heading_3(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Heading3(TextBlock::new(text)))
    }

    pub fn bulleted_list_item(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::BulletedListItem(TextBlock::new(text)))
    }

    pub fn numbered_list_item(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::NumberedListItem(TextBlock::new(text)))
    }

    pub fn to_do(self, text: impl Into<RichTextList>, checked: bool) -> Self {
        self.content(BlockContent::ToDo {
            text: TextBlock::new(text),
            checked,
        })
    }

    pub fn toggle(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Toggle(TextBlock::new(text)))
    }

    pub fn quote(self, text: impl Into<RichTextList>) -> Self {
        self.content(BlockContent::Quote(TextBlock::new(text)))
    }

    pub fn code(self, code: impl Into<String>, language: impl Into<String>) -> Self {
        self.content(BlockContent::Code {
            rich_text: RichTextList::new().text(code),
            language: language.into(),
            caption: RichTextList::new(),
        })
    }

    pub fn equation(self, expression: impl Into<String>) -> Result<Self, ValidationError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(ValidationError::EmptyField("equation expression"));
        }
        Ok(self.content(BlockContent::Equation { expression }))
    }

    pub fn divider(self) -> Self {
        self.content(BlockContent::Divider)
    }

    pub fn bookmark(self, url: impl Into<String>) -> Self {
        self.content(BlockContent::Bookmark {
            url: url.into(),
            caption: RichTextList::new(),
        })
    }

    pub fn embed(self, url: impl Into<String>) -> Self {
        self.content(BlockContent::Embed { url: url.into() })
    }

    /// Attaches `children` to the most recently appended block, which must
    /// accept children.
    pub fn nest(mut self, children: BlockList) -> Result<Self, ValidationError> {
        let last = self
            .0
            .pop()
            .ok_or(ValidationError::EmptyField("block to nest under"))?;
        if !last.content.accepts_children() {
            return Err(ValidationError::ChildrenNotAccepted(
                last.content.type_name().to_string(),
            ));
        }
        self.0.push(last.with_children(children.0));
        Ok(self)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Block> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Block>> for BlockList {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nest_attaches_to_last_block() {
        let blocks = BlockList::new()
            .paragraph("first")
            .bulleted_list_item("second")
            .nest(BlockList::new().paragraph("inner").divider())
            .unwrap();

        assert!(blocks.blocks()[0].children.is_empty());
        let second = &blocks.blocks()[1];
        assert!(second.has_children);
        assert_eq!(second.children.len(), 2);
        assert_eq!(second.children[0].plain_text(), "inner");
    }

    #[test]
    fn nest_needs_a_preceding_block() {
        assert_eq!(
            BlockList::new()
                .nest(BlockList::new().paragraph("orphan"))
                .unwrap_err(),
            ValidationError::EmptyField("block to nest under")
        );
    }

    #[test]
    fn nest_under_childless_block_is_rejected() {
        let err = BlockList::new()
            .heading_2("Notes")
            .nest(BlockList::new().paragraph("inner"))
            .unwrap_err();
        assert_eq!(err, ValidationError::ChildrenNotAccepted("heading_2".to_string()));

        let err = BlockList::new()
            .divider()
            .nest(BlockList::new().paragraph("inner"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Block type 'divider' cannot carry nested children");
    }

    #[test]
    fn headings_do_not_accept_children() {
        assert!(!BlockContent::Heading2(TextBlock::new("h")).accepts_children());
        assert!(BlockContent::Toggle(TextBlock::new("t")).accepts_children());
        assert!(!BlockContent::Divider.accepts_children());
    }

    #[test]
    fn empty_equation_block_is_rejected() {
        assert_eq!(
            BlockList::new().equation(" ").unwrap_err(),
            ValidationError::EmptyField("equation expression")
        );
    }
}
