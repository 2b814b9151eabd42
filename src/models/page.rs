//! Pagination metadata for embedded-collection responses

use serde::{Deserialize, Serialize};

/// `page` object attached to paginated catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Items per page
    pub size: i64,
    /// Total number of items
    pub total_elements: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Current page number (zero-based)
    pub number: i64,
}
