//! Review endpoints

use serde::Deserialize;

use crate::{error::AppResult, models::Review};

use super::CatalogClient;

/// Embedded-collection envelope for the review search endpoint
#[derive(Deserialize)]
struct ReviewsEnvelope {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedReviews,
}

#[derive(Deserialize)]
struct EmbeddedReviews {
    reviews: Vec<Review>,
}

impl CatalogClient {
    /// Reviews for one book, in server order. Zero reviews is a success.
    pub async fn fetch_reviews_for_book(&self, book_id: i64) -> AppResult<Vec<Review>> {
        let url = self.url("/api/reviews/search/findByBookId");
        let envelope: ReviewsEnvelope = self
            .send_json(self.http().get(url).query(&[("bookId", book_id)]))
            .await?;
        Ok(envelope.embedded.reviews)
    }
}
