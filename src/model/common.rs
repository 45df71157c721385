use crate::types::{BlockId, DatabaseId, PageId};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a page, database or block lives, with typed IDs.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    Database(DatabaseId),
    Page(PageId),
    Block(BlockId),
    Workspace,
    Unknown { type_name: String, raw: Value },
}

impl Parent {
    pub fn type_name(&self) -> &str {
        match self {
            Parent::Database(_) => "database_id",
            Parent::Page(_) => "page_id",
            Parent::Block(_) => "block_id",
            Parent::Workspace => "workspace",
            Parent::Unknown { type_name, .. } => type_name,
        }
    }
}

/// Page or database icon.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(String),
    External {
        url: String,
    },
    /// Notion-hosted; the URL expires and is not accepted in requests.
    File {
        url: String,
        expiry_time: Option<DateTime<FixedOffset>>,
    },
    Unknown {
        type_name: String,
        raw: Value,
    },
}

impl Icon {
    pub fn type_name(&self) -> &str {
        match self {
            Icon::Emoji(_) => "emoji",
            Icon::External { .. } => "external",
            Icon::File { .. } => "file",
            Icon::Unknown { type_name, .. } => type_name,
        }
    }
}

/// The `{url, expiry_time?}` payload shared by icons and files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<FixedOffset>>,
}
