//! HTTP client for the PageTurner catalog backend

pub mod books;
pub mod loans;
pub mod reviews;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{Book, Review},
};

/// The three data sources consumed by the book checkout page.
///
/// [`CatalogClient`] is the production implementation; the trait exists so
/// the page controller can run against a mock in tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one book by id.
    async fn fetch_book(&self, book_id: i64) -> AppResult<Book>;

    /// Fetch all reviews for one book. An empty collection is a valid
    /// result, distinct from failure.
    async fn fetch_reviews_for_book(&self, book_id: i64) -> AppResult<Vec<Review>>;

    /// Fetch the authenticated user's active-loan count. The token parameter
    /// makes the contract explicit: anonymous visitors skip this operation
    /// instead of attempting it.
    async fn fetch_current_loan_count(&self, access_token: &str) -> AppResult<i64>;
}

/// Client for the catalog REST API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-success statuses and undecodable bodies are distinct failures;
    /// neither is allowed to surface as a panic.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> AppResult<T> {
        let request = request.build()?;
        let url = request.url().to_string();
        tracing::debug!(%url, "catalog request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BadStatus { status, url });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| AppError::MalformedResponse {
            url,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_book(&self, book_id: i64) -> AppResult<Book> {
        CatalogClient::fetch_book(self, book_id).await
    }

    async fn fetch_reviews_for_book(&self, book_id: i64) -> AppResult<Vec<Review>> {
        CatalogClient::fetch_reviews_for_book(self, book_id).await
    }

    async fn fetch_current_loan_count(&self, access_token: &str) -> AppResult<i64> {
        CatalogClient::fetch_current_loan_count(self, access_token).await
    }
}
