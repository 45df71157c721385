// src/constants.rs
//! Constants that define the operational boundaries of the client.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Largest page the Notion API will return for a paginated endpoint.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// The `Notion-Version` header value this model is written against.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default API root.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable overriding the API root (proxies, test servers).
pub const API_BASE_URL_ENV: &str = "NOTION_API_BASE_URL";

/// Maximum nesting followed by `get_all_block_children`.
pub const BLOCK_MAX_FETCH_DEPTH: usize = 50;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies and JSON
/// fragments in errors.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
