use crate::client::{expect_status, read_json, PlayCountClient};
use crate::config::YOUTUBE_API_KEY;
use crate::{PlaysError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

// https://www.youtube.com/watch?v=ID or https://www.youtube.com/live/ID
static WATCH_OR_LIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/(?:watch\?v=|live/)([a-zA-Z0-9_-]+)").unwrap()
});
// https://youtu.be/ID
static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([a-zA-Z0-9_-]+)").unwrap());

#[derive(Debug, Deserialize)]
struct VideoList {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
struct Statistics {
    #[serde(default, rename = "viewCount")]
    view_count: String,
}

/// Extract the video id from a watch, live or short link.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    [&*WATCH_OR_LIVE, &*SHORT_LINK]
        .into_iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The API reports view counts as strings; anything non-numeric counts as 0.
pub fn parse_view_count(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

impl PlayCountClient {
    /// YouTube view count, 0 without an API key or on any failure.
    pub async fn resolve_youtube(&self, url: &str) -> u64 {
        match self.youtube_view_count(url).await {
            Ok(views) => {
                log::debug!("YouTube viewCount: {views}");
                views
            }
            Err(PlaysError::MissingCredential(name)) => {
                log::warn!("{name} not set, skipping YouTube lookup for {url}");
                0
            }
            Err(e) => {
                log::debug!("YouTube lookup failed for {url}: {e}");
                0
            }
        }
    }

    async fn youtube_view_count(&self, url: &str) -> Result<u64> {
        let api_key = self
            .credentials()
            .youtube_api_key
            .ok_or(PlaysError::MissingCredential(YOUTUBE_API_KEY))?;
        let video_id = youtube_video_id(url)
            .ok_or_else(|| PlaysError::InvalidUrl(format!("no YouTube video id in {url}")))?;

        let api_url = format!(
            "{}/videos?part=statistics&id={}&key={}",
            self.endpoints().youtube_api,
            video_id,
            urlencoding::encode(&api_key)
        );
        let mut response = self.get(&api_url, None).await?;
        expect_status(&response, 200)?;

        let videos: VideoList = read_json(&mut response).await?;
        match videos.items.first() {
            Some(video) => Ok(parse_view_count(&video.statistics.view_count)),
            None => {
                log::debug!("No items found for video ID: {video_id}");
                Ok(0)
            }
        }
    }
}
