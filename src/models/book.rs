//! Book (catalog entry) model.
//!
//! Field names follow the backend entity; the wire format is camelCase
//! (`copiesAvailable`), so the struct carries a blanket rename.

use serde::{Deserialize, Serialize};

/// Full book record as served by `/api/books/{id}`.
/// Immutable for a given page view; replaced wholesale on refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub copies: i32,
    pub copies_available: i32,
    pub category: String,
    /// Cover image reference; the presentation layer substitutes a
    /// placeholder when absent.
    pub img: Option<String>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.copies_available > 0
    }
}
