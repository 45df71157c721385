use super::{BlockList, Icon, Parent, PropertyValueList, RichTextList};
use crate::types::{DatabaseId, PageId};
use chrono::{DateTime, FixedOffset};

/// A Notion page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub parent: Parent,
    pub properties: PropertyValueList,
    pub url: Option<String>,
    pub icon: Option<Icon>,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub last_edited_time: Option<DateTime<FixedOffset>>,
    pub archived: bool,
}

impl Page {
    /// Get the page title
    pub fn title(&self) -> String {
        self.properties
            .title_text()
            .map(RichTextList::plain_text)
            .unwrap_or_default()
    }
}

/// Payload for creating a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCreate {
    pub parent: Parent,
    pub properties: PropertyValueList,
    pub children: BlockList,
    pub icon: Option<Icon>,
}

impl PageCreate {
    /// A new row in a database; `properties` must match the database schema.
    pub fn in_database(database: DatabaseId, properties: PropertyValueList) -> Self {
        Self {
            parent: Parent::Database(database),
            properties,
            children: BlockList::new(),
            icon: None,
        }
    }

    /// A sub-page, whose only property is its title.
    pub fn under_page(page: PageId, title: impl Into<RichTextList>) -> Self {
        Self {
            parent: Parent::Page(page),
            properties: PropertyValueList::new().title_rich_text("title", title.into()),
            children: BlockList::new(),
            icon: None,
        }
    }

    pub fn with_children(mut self, children: BlockList) -> Self {
        self.children = children;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}
