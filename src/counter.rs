use crate::client::PlayCountClient;
use crate::Result;
use async_trait::async_trait;

/// Network-facing operations the aggregator needs.
///
/// [`PlayCountClient`] is the real implementation. The trait exists so the
/// aggregation logic can be exercised without any HTTP traffic.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockPlayCounter`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait PlayCounter {
    /// Fetch the raw text of a set page.
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Mixcloud play count for a cloudcast URL, 0 on any failure.
    async fn mixcloud_plays(&self, url: &str) -> u64;

    /// SoundCloud playback count via the fallback chain, 0 if every step fails.
    async fn soundcloud_plays(&self, url: &str) -> u64;

    /// YouTube view count, 0 without an API key or on any failure.
    async fn youtube_plays(&self, url: &str) -> u64;
}

#[async_trait(?Send)]
impl PlayCounter for PlayCountClient {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.fetch_page_text(url).await
    }

    async fn mixcloud_plays(&self, url: &str) -> u64 {
        self.resolve_mixcloud(url).await
    }

    async fn soundcloud_plays(&self, url: &str) -> u64 {
        self.resolve_soundcloud(url).await
    }

    async fn youtube_plays(&self, url: &str) -> u64 {
        self.resolve_youtube(url).await
    }
}
