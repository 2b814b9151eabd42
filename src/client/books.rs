//! Book (catalog) endpoints

use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Book, PageInfo},
};

use super::CatalogClient;

/// Embedded-collection envelope for paginated book listings
#[derive(Deserialize)]
struct BooksEnvelope {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedBooks,
    page: PageInfo,
}

#[derive(Deserialize)]
struct EmbeddedBooks {
    books: Vec<Book>,
}

impl CatalogClient {
    /// Get one book by id, field-for-field from the backend record.
    pub async fn fetch_book(&self, book_id: i64) -> AppResult<Book> {
        let url = self.url(&format!("/api/books/{}", book_id));
        self.send_json(self.http().get(url)).await
    }

    /// List the catalog one page at a time.
    pub async fn list_books(&self, page: i64, size: i64) -> AppResult<(Vec<Book>, PageInfo)> {
        let url = self.url("/api/books");
        let envelope: BooksEnvelope = self
            .send_json(self.http().get(url).query(&[("page", page), ("size", size)]))
            .await?;
        Ok((envelope.embedded.books, envelope.page))
    }

    /// Search the catalog by title substring.
    pub async fn search_books_by_title(
        &self,
        title: &str,
        page: i64,
        size: i64,
    ) -> AppResult<(Vec<Book>, PageInfo)> {
        let url = self.url("/api/books/search/findByTitleContaining");
        let envelope: BooksEnvelope = self
            .send_json(
                self.http()
                    .get(url)
                    .query(&[("title", title)])
                    .query(&[("page", page), ("size", size)]),
            )
            .await?;
        Ok((envelope.embedded.books, envelope.page))
    }

    /// Check a book out for the authenticated user; returns the updated
    /// record with one fewer available copy.
    pub async fn checkout_book(&self, access_token: &str, book_id: i64) -> AppResult<Book> {
        let url = self.url("/api/books/secure/checkout");
        self.send_json(
            self.http()
                .put(url)
                .query(&[("bookId", book_id)])
                .bearer_auth(access_token),
        )
        .await
    }
}
