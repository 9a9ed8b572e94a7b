//! CompletionClient trait definition

use async_trait::async_trait;

use super::CompletionError;

/// Stateless text-generation client - each call is independent
///
/// The credential is supplied per call by whoever owns the configuration, so
/// a client never reads secrets on its own. Implementations fail fast: one
/// classified error per call, no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Provider name for logs and display
    fn provider(&self) -> &str;

    /// Send one prompt and return the generated text
    ///
    /// Fails with `MissingCredential` before any network call when `api_key`
    /// is blank, and with `EmptyResponse` when the service returns no text.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock completion client for unit tests
    ///
    /// Replies are consumed in order; every prompt is recorded.
    pub struct MockCompletionClient {
        replies: Mutex<Vec<Result<String, CompletionError>>>,
        prompts: Mutex<Vec<String>>,
        call_count: AtomicUsize,
    }

    impl MockCompletionClient {
        pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
            debug!(reply_count = %replies.len(), "MockCompletionClient::new: called");
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for MockCompletionClient {
        fn provider(&self) -> &str {
            "mock"
        }

        async fn generate(&self, _api_key: &str, prompt: &str) -> Result<String, CompletionError> {
            debug!("MockCompletionClient::generate: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(CompletionError::EmptyResponse))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockCompletionClient::replying(&["Response 1", "Response 2"]);

            assert_eq!(client.generate("key", "p1").await.unwrap(), "Response 1");
            assert_eq!(client.generate("key", "p2").await.unwrap(), "Response 2");
            assert_eq!(client.call_count(), 2);
            assert_eq!(client.prompts(), vec!["p1".to_string(), "p2".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockCompletionClient::new(vec![]);
            assert!(client.generate("key", "p").await.is_err());
        }
    }
}
