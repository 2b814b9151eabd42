//! Checkout page controller.
//!
//! Owns one state slot per remote data source, launches the fetches as
//! independent tasks on mount and derives the composite render state the
//! presentation layer consumes. All tasks live in a [`tokio::task::JoinSet`],
//! so dropping the page aborts whatever is still in flight and no state
//! update can land after disposal.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinSet};

use crate::{
    client::CatalogApi,
    error::FetchFailure,
    models::{Book, Identity, Review},
    services::rating,
};

/// State of one independently fetched data source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceState<T> {
    Loading,
    Ready(T),
    Failed(FetchFailure),
}

impl<T> SourceState<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SourceState::Loading)
    }

    fn failure(&self) -> Option<&FetchFailure> {
        match self {
            SourceState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Review collection with its aggregate, computed once when the fetch
/// settles rather than incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedReviews {
    pub reviews: Vec<Review>,
    /// `None` when there are no reviews yet.
    pub average_rating: Option<f64>,
}

/// Loan-count slot. Unlike the other sources this one is identity-gated:
/// anonymous visitors get `Skipped` and no request is fired.
#[derive(Debug, Clone, PartialEq)]
pub enum LoanCountState {
    Loading,
    Ready(i64),
    Skipped,
    Failed(FetchFailure),
}

/// Per-mount page state, one slot per source.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutState {
    pub book: SourceState<Book>,
    pub reviews: SourceState<LoadedReviews>,
    pub loan_count: LoanCountState,
}

impl CheckoutState {
    fn new(identity: &Identity) -> Self {
        let loan_count = if identity.is_authenticated() {
            LoanCountState::Loading
        } else {
            LoanCountState::Skipped
        };
        Self {
            book: SourceState::Loading,
            reviews: SourceState::Loading,
            loan_count,
        }
    }

    /// The two render-gating fetches (book, reviews) have both settled.
    /// The loan count never gates rendering.
    pub fn is_settled(&self) -> bool {
        self.book.is_settled() && self.reviews.is_settled()
    }

    /// Every launched fetch, loan count included, has settled.
    pub fn all_settled(&self) -> bool {
        self.is_settled() && !matches!(self.loan_count, LoanCountState::Loading)
    }

    /// Composite render decision: spinner until both gating sources settle,
    /// then the first failure (book wins the tie), then the loaded layout.
    pub fn view(&self) -> CheckoutView {
        if !self.is_settled() {
            return CheckoutView::Loading;
        }

        if let Some(failure) = self.book.failure().or_else(|| self.reviews.failure()) {
            return CheckoutView::Failed {
                message: failure.message.clone(),
            };
        }

        match (&self.book, &self.reviews) {
            (SourceState::Ready(book), SourceState::Ready(loaded)) => CheckoutView::Ready {
                book: book.clone(),
                reviews: loaded.reviews.clone(),
                average_rating: loaded.average_rating,
                loan_count: self.loan_count.clone(),
            },
            // settled without a failure implies both slots are ready
            _ => CheckoutView::Loading,
        }
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutView {
    Loading,
    Failed {
        message: String,
    },
    Ready {
        book: Book,
        /// Server order, for the latest-reviews list.
        reviews: Vec<Review>,
        /// `None` renders as "no ratings yet".
        average_rating: Option<f64>,
        loan_count: LoanCountState,
    },
}

/// Book checkout page controller.
pub struct CheckoutPage {
    api: Arc<dyn CatalogApi>,
    book_id: i64,
    state: Arc<watch::Sender<CheckoutState>>,
    rx: watch::Receiver<CheckoutState>,
    tasks: JoinSet<()>,
    loan_task: Option<AbortHandle>,
}

impl CheckoutPage {
    /// Mount the page for one book: launch the book and review fetches, and
    /// the loan-count fetch when the visitor is authenticated. Must be called
    /// from within a Tokio runtime.
    pub fn mount(api: Arc<dyn CatalogApi>, book_id: i64, identity: &Identity) -> Self {
        let (tx, rx) = watch::channel(CheckoutState::new(identity));
        let state = Arc::new(tx);
        let mut tasks = JoinSet::new();

        {
            let api = Arc::clone(&api);
            let state = Arc::clone(&state);
            tasks.spawn(async move {
                let result = api.fetch_book(book_id).await;
                state.send_modify(|s| {
                    s.book = match result {
                        Ok(book) => SourceState::Ready(book),
                        Err(err) => {
                            tracing::warn!(book_id, error = %err, "book fetch failed");
                            SourceState::Failed(FetchFailure::from(&err))
                        }
                    };
                });
            });
        }

        {
            let api = Arc::clone(&api);
            let state = Arc::clone(&state);
            tasks.spawn(async move {
                let result = api.fetch_reviews_for_book(book_id).await;
                state.send_modify(|s| {
                    s.reviews = match result {
                        Ok(reviews) => {
                            let ratings: Vec<f64> = reviews.iter().map(|r| r.rating).collect();
                            SourceState::Ready(LoadedReviews {
                                average_rating: rating::half_star_average(&ratings),
                                reviews,
                            })
                        }
                        Err(err) => {
                            tracing::warn!(book_id, error = %err, "review fetch failed");
                            SourceState::Failed(FetchFailure::from(&err))
                        }
                    };
                });
            });
        }

        let mut page = Self {
            api,
            book_id,
            state,
            rx,
            tasks,
            loan_task: None,
        };
        page.spawn_loan_fetch(identity);
        page
    }

    /// Re-run the identity-gated loan-count fetch. Book and review fetches
    /// are one-shot per mount and unaffected.
    pub fn identity_changed(&mut self, identity: &Identity) {
        if let Some(handle) = self.loan_task.take() {
            handle.abort();
        }
        self.state.send_modify(|s| {
            s.loan_count = if identity.is_authenticated() {
                LoanCountState::Loading
            } else {
                LoanCountState::Skipped
            };
        });
        self.spawn_loan_fetch(identity);
    }

    fn spawn_loan_fetch(&mut self, identity: &Identity) {
        let Some(token) = identity.access_token() else {
            tracing::debug!(book_id = self.book_id, "anonymous visitor, loan count skipped");
            return;
        };
        let token = token.to_string();
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);

        let handle = self.tasks.spawn(async move {
            let result = api.fetch_current_loan_count(&token).await;
            state.send_modify(|s| {
                s.loan_count = match result {
                    Ok(count) => LoanCountState::Ready(count),
                    Err(err) => {
                        tracing::warn!(error = %err, "loan count fetch failed");
                        LoanCountState::Failed(FetchFailure::from(&err))
                    }
                };
            });
        });
        self.loan_task = Some(handle);
    }

    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// Current snapshot of the composite render state.
    pub fn view(&self) -> CheckoutView {
        self.rx.borrow().view()
    }

    /// Current per-source state, for callers that render partial failures.
    pub fn state(&self) -> CheckoutState {
        self.rx.borrow().clone()
    }

    /// Wait until the book and review fetches settle, then return the view.
    pub async fn settled(&self) -> CheckoutView {
        self.wait_for(CheckoutState::is_settled).await
    }

    /// Wait until every launched fetch settles, loan count included.
    pub async fn fully_settled(&self) -> CheckoutView {
        self.wait_for(CheckoutState::all_settled).await
    }

    async fn wait_for(&self, predicate: fn(&CheckoutState) -> bool) -> CheckoutView {
        let mut rx = self.rx.clone();
        let view = match rx.wait_for(predicate).await {
            Ok(state) => state.view(),
            // the sender lives in self, so this arm is only reachable
            // mid-teardown
            Err(_) => self.view(),
        };
        view
    }
}

/// Book id from a checkout navigation path (`/checkout/{bookId}`).
///
/// The path is an explicit input; the routing layer owns where it comes from.
pub fn book_id_from_path(path: &str) -> Option<i64> {
    path.split('/').nth(2)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppResult, ErrorKind};

    #[test]
    fn parses_book_id_from_checkout_path() {
        assert_eq!(book_id_from_path("/checkout/5"), Some(5));
        assert_eq!(book_id_from_path("/checkout/42?x=1"), None);
        assert_eq!(book_id_from_path("/checkout/"), None);
        assert_eq!(book_id_from_path("/home"), None);
        assert_eq!(book_id_from_path(""), None);
    }

    fn failure(kind: ErrorKind, message: &str) -> FetchFailure {
        FetchFailure {
            kind,
            message: message.to_string(),
        }
    }

    fn sample_book() -> Book {
        Book {
            id: 1,
            title: "The Rust Programming Language".to_string(),
            author: "Steve Klabnik".to_string(),
            description: "The book".to_string(),
            copies: 4,
            copies_available: 2,
            category: "Programming".to_string(),
            img: None,
        }
    }

    #[test]
    fn view_is_loading_while_any_gating_source_is_pending() {
        let mut state = CheckoutState::new(&Identity::Anonymous);
        assert_eq!(state.view(), CheckoutView::Loading);

        state.book = SourceState::Ready(sample_book());
        assert_eq!(state.view(), CheckoutView::Loading);
    }

    #[test]
    fn book_failure_wins_the_tie_over_review_failure() {
        let mut state = CheckoutState::new(&Identity::Anonymous);
        state.book = SourceState::Failed(failure(ErrorKind::BadStatus, "book down"));
        state.reviews = SourceState::Failed(failure(ErrorKind::NetworkFailure, "reviews down"));

        assert_eq!(
            state.view(),
            CheckoutView::Failed {
                message: "book down".to_string()
            }
        );
    }

    #[test]
    fn loan_count_state_never_gates_the_render() {
        let mut state = CheckoutState::new(&Identity::authenticated("token"));
        state.book = SourceState::Ready(sample_book());
        state.reviews = SourceState::Ready(LoadedReviews {
            reviews: vec![],
            average_rating: None,
        });
        // loan count still loading
        assert!(matches!(state.view(), CheckoutView::Ready { .. }));
    }

    struct PendingCatalog;

    #[async_trait]
    impl CatalogApi for PendingCatalog {
        async fn fetch_book(&self, _book_id: i64) -> AppResult<Book> {
            std::future::pending().await
        }

        async fn fetch_reviews_for_book(&self, _book_id: i64) -> AppResult<Vec<Review>> {
            std::future::pending().await
        }

        async fn fetch_current_loan_count(&self, _access_token: &str) -> AppResult<i64> {
            std::future::pending().await
        }
    }

    #[test]
    fn freshly_mounted_page_renders_the_spinner() {
        tokio_test::block_on(async {
            let page = CheckoutPage::mount(Arc::new(PendingCatalog), 7, &Identity::Anonymous);
            assert_eq!(page.book_id(), 7);
            assert_eq!(page.view(), CheckoutView::Loading);
            // dropping the page aborts both in-flight fetches
        });
    }
}
