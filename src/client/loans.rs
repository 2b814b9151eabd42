//! Loan endpoints

use crate::error::AppResult;

use super::CatalogClient;

impl CatalogClient {
    /// Count of the authenticated user's active loans.
    ///
    /// Requires a bearer token; callers without one skip the operation
    /// entirely rather than firing an unauthenticated request.
    pub async fn fetch_current_loan_count(&self, access_token: &str) -> AppResult<i64> {
        let url = self.url("/api/books/secure/currentloans/count");
        self.send_json(self.http().get(url).bearer_auth(access_token))
            .await
    }
}
