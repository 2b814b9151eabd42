//! API integration tests
//!
//! Require a running PageTurner backend on localhost:8080.

use pageturner_client::{client::CatalogClient, config::ApiConfig, error::AppError};
use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/api";

fn catalog_client() -> CatalogClient {
    CatalogClient::new(&ApiConfig {
        base_url: "http://localhost:8080".to_string(),
        timeout_seconds: 10,
    })
    .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_get_book() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_number());
    assert!(body["title"].is_string());
    assert!(body["copiesAvailable"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_fetch_book_maps_all_fields() {
    let client = catalog_client();

    let book = client.fetch_book(1).await.expect("Failed to fetch book");

    assert_eq!(book.id, 1);
    assert!(!book.title.is_empty());
    assert!(!book.author.is_empty());
    assert!(book.copies_available <= book.copies);
}

#[tokio::test]
#[ignore]
async fn test_find_reviews_by_book_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reviews/search/findByBookId?bookId=1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["_embedded"]["reviews"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_list_books_paginated() {
    let client = catalog_client();

    let (books, page) = client.list_books(0, 5).await.expect("Failed to list books");

    assert!(books.len() <= 5);
    assert_eq!(page.size, 5);
    assert_eq!(page.number, 0);
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = catalog_client();

    let (books, page) = client
        .search_books_by_title("the", 0, 10)
        .await
        .expect("Failed to search books");

    assert!(page.total_elements >= books.len() as i64);
}

#[tokio::test]
#[ignore]
async fn test_missing_book_is_bad_status() {
    let client = catalog_client();

    match client.fetch_book(999_999).await {
        Err(AppError::BadStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected 404, got {:?}", other.map(|b| b.id)),
    }
}

#[tokio::test]
#[ignore]
async fn test_loan_count_requires_auth() {
    let client = catalog_client();

    let result = client.fetch_current_loan_count("invalid-token").await;

    assert!(matches!(result, Err(AppError::BadStatus { .. })));
}

#[tokio::test]
#[ignore]
async fn test_checkout_requires_auth() {
    let client = catalog_client();

    let result = client.checkout_book("invalid-token", 1).await;

    assert!(matches!(result, Err(AppError::BadStatus { .. })));
}
