//! Pagination types
//!
//! The vendor's entity endpoints return the full selection in one response
//! body, so the default paginator yields a single page. The trait seam is
//! kept so a stream can override token computation if an endpoint grows a
//! limited-by marker.

use crate::http::ApiResponse;
use crate::types::PageToken;

/// Computes the token for the next page from the previous response
pub trait Paginator: Send + Sync {
    /// Return the next page token, or `None` when the stream is exhausted
    fn next_page_token(
        &self,
        response: &ApiResponse,
        previous_token: Option<&PageToken>,
    ) -> Option<PageToken>;
}

/// Paginator for endpoints that return everything in one response
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePage;

impl Paginator for SinglePage {
    fn next_page_token(
        &self,
        _response: &ApiResponse,
        _previous_token: Option<&PageToken>,
    ) -> Option<PageToken> {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> ApiResponse {
        ApiResponse {
            status: 200,
            headers: reqwest::header::HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_single_page_always_done() {
        let paginator = SinglePage;
        let resp = response(r#"{"result":{"Campaigns":[{"Id":1}]}}"#);

        assert!(paginator.next_page_token(&resp, None).is_none());
        assert!(paginator
            .next_page_token(&resp, Some(&"1".to_string()))
            .is_none());
    }
}
