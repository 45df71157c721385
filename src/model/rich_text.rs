//! Formatted text: ordered spans of plain text, mentions and equations.

use super::User;
use crate::types::{Color, DatabaseId, DateOrDateRange, Id, PageId, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Style flags applied to a span. Missing flags read as unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub const DEFAULT: Annotations = Annotations::flags(false, false, false, false, false);
    pub const BOLD: Annotations = Annotations::flags(true, false, false, false, false);
    pub const ITALIC: Annotations = Annotations::flags(false, true, false, false, false);
    pub const STRIKETHROUGH: Annotations = Annotations::flags(false, false, true, false, false);
    pub const UNDERLINE: Annotations = Annotations::flags(false, false, false, true, false);
    pub const CODE: Annotations = Annotations::flags(false, false, false, false, true);

    const fn flags(
        bold: bool,
        italic: bool,
        strikethrough: bool,
        underline: bool,
        code: bool,
    ) -> Self {
        Self {
            bold,
            italic,
            strikethrough,
            underline,
            code,
            color: Color::Default,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

/// What a mention points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    User(User),
    Page(PageId),
    Database(DatabaseId),
    Date(DateOrDateRange),
    /// A mention type this client does not model (link previews, templates, ...).
    Unknown { type_name: String, raw: Value },
}

impl Mention {
    pub fn type_name(&self) -> &str {
        match self {
            Mention::User(_) => "user",
            Mention::Page(_) => "page",
            Mention::Database(_) => "database",
            Mention::Date(_) => "date",
            Mention::Unknown { type_name, .. } => type_name,
        }
    }
}

/// The kind of a span, each variant carrying its own payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextContent {
    Text {
        content: String,
        link: Option<String>,
    },
    Mention(Mention),
    Equation {
        expression: String,
    },
    Unknown {
        type_name: String,
        raw: Value,
    },
}

impl RichTextContent {
    pub fn type_name(&self) -> &str {
        match self {
            RichTextContent::Text { .. } => "text",
            RichTextContent::Mention(_) => "mention",
            RichTextContent::Equation { .. } => "equation",
            RichTextContent::Unknown { type_name, .. } => type_name,
        }
    }
}

/// One span of formatted text.
///
/// `plain_text` and `href` are filled in by the API and never sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub content: RichTextContent,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichText {
    /// Create a plain text span with default annotations.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            plain_text: text.clone(),
            content: RichTextContent::Text {
                content: text,
                link: None,
            },
            annotations: Annotations::DEFAULT,
            href: None,
        }
    }

    fn of(content: RichTextContent) -> Self {
        Self {
            content,
            annotations: Annotations::DEFAULT,
            plain_text: String::new(),
            href: None,
        }
    }
}

/// An ordered sequence of spans, and the fluent builder for one.
///
/// ```
/// use notionkit::{Annotations, RichTextList};
///
/// let text = RichTextList::new()
///     .text("Hello ")
///     .text_with("world", Annotations::BOLD)
///     .equation("e^{i\\pi} + 1 = 0")
///     .unwrap();
/// assert_eq!(text.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichTextList(Vec<RichText>);

impl RichTextList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_spans(spans: Vec<RichText>) -> Self {
        Self(spans)
    }

    fn push(mut self, span: RichText) -> Self {
        self.0.push(span);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(RichText::plain(text))
    }

    pub fn text_with(self, text: impl Into<String>, annotations: Annotations) -> Self {
        let mut span = RichText::plain(text);
        span.annotations = annotations;
        self.push(span)
    }

    pub fn link(self, text: impl Into<String>, url: impl Into<String>) -> Self {
        let text = text.into();
        self.push(RichText {
            plain_text: text.clone(),
            content: RichTextContent::Text {
                content: text,
                link: Some(url.into()),
            },
            annotations: Annotations::DEFAULT,
            href: None,
        })
    }

    pub fn user_mention(self, user_id: &str) -> Result<Self, ValidationError> {
        let id: UserId = mention_target(user_id)?;
        Ok(self.push(RichText::of(RichTextContent::Mention(Mention::User(
            User::reference(id),
        )))))
    }

    pub fn page_mention(self, page_id: &str) -> Result<Self, ValidationError> {
        let id: PageId = mention_target(page_id)?;
        Ok(self.push(RichText::of(RichTextContent::Mention(Mention::Page(id)))))
    }

    pub fn database_mention(self, database_id: &str) -> Result<Self, ValidationError> {
        let id: DatabaseId = mention_target(database_id)?;
        Ok(self.push(RichText::of(RichTextContent::Mention(Mention::Database(
            id,
        )))))
    }

    pub fn date_mention(self, date: DateOrDateRange) -> Self {
        self.push(RichText::of(RichTextContent::Mention(Mention::Date(date))))
    }

    pub fn equation(self, expression: impl Into<String>) -> Result<Self, ValidationError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(ValidationError::EmptyField("equation expression"));
        }
        let mut span = RichText::of(RichTextContent::Equation {
            expression: expression.clone(),
        });
        span.plain_text = expression;
        Ok(self.push(span))
    }

    /// Replaces the annotations of the most recently appended span.
    pub fn annotate_last(mut self, annotations: Annotations) -> Self {
        if let Some(last) = self.0.last_mut() {
            last.annotations = annotations;
        }
        self
    }

    pub fn spans(&self) -> &[RichText] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RichText> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All spans' plain text, concatenated in order.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|span| span.plain_text.as_str()).collect()
    }
}

fn mention_target<T>(raw: &str) -> Result<Id<T>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyField("mention target id"));
    }
    Id::parse(raw)
}

impl From<&str> for RichTextList {
    fn from(text: &str) -> Self {
        RichTextList::new().text(text)
    }
}

impl From<String> for RichTextList {
    fn from(text: String) -> Self {
        RichTextList::new().text(text)
    }
}

impl<'a> IntoIterator for &'a RichTextList {
    type Item = &'a RichText;
    type IntoIter = std::slice::Iter<'a, RichText>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
