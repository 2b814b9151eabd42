//! PageTurner Library Catalog Client
//!
//! Client-side core of the PageTurner library catalog: typed access to the
//! catalog REST API, and the state orchestration behind the book checkout
//! page (book record, review list with aggregate rating, current loan count).

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use client::{CatalogApi, CatalogClient};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
