//! Review model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single user review of a book.
///
/// Served inside an `_embedded.reviews` envelope by the reviews search
/// endpoint; arrival order is preserved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub date: NaiveDate,
    pub rating: f64,
    #[serde(rename = "bookId")]
    pub book_id: i64,
    #[serde(rename = "reviewDescription")]
    pub review_description: Option<String>,
}
