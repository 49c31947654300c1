//! SoundCloud playback counts.
//!
//! SoundCloud offers several ways in, depending on which credentials are
//! configured. They are tried as an ordered chain of [`SoundCloudStrategy`]
//! steps; the first one that yields a count ends the chain.

use crate::client::{expect_status, read_json, redirect_target, status_code, PlayCountClient};
use crate::config::{
    Credentials, SOUNDCLOUD_CLIENT_ID, SOUNDCLOUD_CLIENT_SECRET, SOUNDCLOUD_OAUTH_TOKEN,
};
use crate::{PlaysError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static QUOTED_PLAYBACK_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""playback_count"\s*:\s*([0-9]+)"#).unwrap());
static BARE_PLAYBACK_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playback_count\s*:\s*([0-9]+)").unwrap());

// A missing or null count decodes as 0 and still ends the chain.
#[derive(Debug, Deserialize)]
struct Track {
    #[serde(default)]
    playback_count: Option<u64>,
}

impl Track {
    fn plays(&self) -> u64 {
        self.playback_count.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    #[serde(default)]
    access_token: String,
}

/// One way of obtaining a SoundCloud playback count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCloudStrategy {
    /// Resolve API with a pre-issued OAuth token.
    Token,
    /// Exchange client id and secret for a token, then resolve with it.
    ClientCredentials,
    /// Resolve API with a bare `client_id` query parameter.
    LegacyClientId,
    /// Scrape `playback_count` out of the public track page.
    HtmlScrape,
}

impl SoundCloudStrategy {
    /// Strategies in the order they are attempted.
    pub const CHAIN: [SoundCloudStrategy; 4] = [
        SoundCloudStrategy::Token,
        SoundCloudStrategy::ClientCredentials,
        SoundCloudStrategy::LegacyClientId,
        SoundCloudStrategy::HtmlScrape,
    ];
}

/// Find a `playback_count` value in raw page text.
///
/// The quoted JSON form is preferred; an unquoted key is accepted as a fallback.
pub fn scrape_playback_count(page: &str) -> Option<u64> {
    [&*QUOTED_PLAYBACK_COUNT, &*BARE_PLAYBACK_COUNT]
        .into_iter()
        .filter_map(|pattern| pattern.captures(page))
        .find_map(|caps| caps[1].parse::<u64>().ok())
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or(PlaysError::MissingCredential(name))
}

impl PlayCountClient {
    /// SoundCloud playback count, walking [`SoundCloudStrategy::CHAIN`].
    ///
    /// Steps whose credentials are missing are skipped, failing steps fall
    /// through to the next one, and 0 is returned if nothing succeeds.
    pub async fn resolve_soundcloud(&self, url: &str) -> u64 {
        let credentials = self.credentials();

        for strategy in SoundCloudStrategy::CHAIN {
            match self.attempt_soundcloud(strategy, url, &credentials).await {
                Ok(plays) => {
                    log::debug!("SoundCloud playback_count ({strategy:?}): {plays}");
                    return plays;
                }
                Err(PlaysError::MissingCredential(name)) => {
                    log::debug!("{name} not set, skipping SoundCloud {strategy:?} step");
                }
                Err(e) => {
                    log::warn!("SoundCloud {strategy:?} step failed for {url}: {e}");
                }
            }
        }

        log::warn!("Could not determine SoundCloud playback_count for {url}");
        0
    }

    /// Run a single step of the chain.
    pub async fn attempt_soundcloud(
        &self,
        strategy: SoundCloudStrategy,
        url: &str,
        credentials: &Credentials,
    ) -> Result<u64> {
        match strategy {
            SoundCloudStrategy::Token => {
                let token = required(&credentials.soundcloud_oauth_token, SOUNDCLOUD_OAUTH_TOKEN)?;
                self.resolve_soundcloud_with_token(url, token).await
            }
            SoundCloudStrategy::ClientCredentials => {
                let client_id = required(&credentials.soundcloud_client_id, SOUNDCLOUD_CLIENT_ID)?;
                let client_secret =
                    required(&credentials.soundcloud_client_secret, SOUNDCLOUD_CLIENT_SECRET)?;
                let token = self
                    .exchange_soundcloud_credentials(client_id, client_secret)
                    .await?;
                self.resolve_soundcloud_with_token(url, &token).await
            }
            SoundCloudStrategy::LegacyClientId => {
                let client_id = required(&credentials.soundcloud_client_id, SOUNDCLOUD_CLIENT_ID)?;
                self.resolve_soundcloud_with_client_id(url, client_id).await
            }
            SoundCloudStrategy::HtmlScrape => {
                let page = self.fetch_page_text(url).await?;
                scrape_playback_count(&page).ok_or_else(|| {
                    PlaysError::Parse("no playback_count in SoundCloud page".to_string())
                })
            }
        }
    }

    fn soundcloud_resolve_url(&self, track_url: &str) -> String {
        format!(
            "{}/resolve?url={}",
            self.endpoints().soundcloud_api,
            urlencoding::encode(track_url)
        )
    }

    async fn resolve_soundcloud_with_token(&self, url: &str, token: &str) -> Result<u64> {
        let resolve_url = self.soundcloud_resolve_url(url);
        let mut response = self.get(&resolve_url, Some(token)).await?;

        match status_code(&response) {
            200 => {
                let track: Track = read_json(&mut response).await?;
                Ok(track.plays())
            }
            302 => {
                let target = redirect_target(&response, &resolve_url)?;
                log::debug!("Token resolve redirected to: {target}");

                let mut response = self.get(&target, Some(token)).await?;
                expect_status(&response, 200)?;
                let track: Track = read_json(&mut response).await?;
                Ok(track.plays())
            }
            code => Err(PlaysError::Status(code)),
        }
    }

    async fn exchange_soundcloud_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let token_url = format!("{}/oauth2/token", self.endpoints().soundcloud_api);
        let mut response = self
            .post_form(
                &token_url,
                &[
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                    ("grant_type", "client_credentials"),
                ],
            )
            .await?;
        expect_status(&response, 200)?;

        let token: AccessToken = read_json(&mut response).await?;
        if token.access_token.is_empty() {
            return Err(PlaysError::Auth(
                "token endpoint returned an empty access_token".to_string(),
            ));
        }
        log::debug!("Obtained SoundCloud OAuth token via client credentials");
        Ok(token.access_token)
    }

    async fn resolve_soundcloud_with_client_id(&self, url: &str, client_id: &str) -> Result<u64> {
        let resolve_url = format!(
            "{}&client_id={}",
            self.soundcloud_resolve_url(url),
            urlencoding::encode(client_id)
        );
        let mut response = self.get(&resolve_url, None).await?;

        match status_code(&response) {
            200 => {
                let track: Track = read_json(&mut response).await?;
                Ok(track.plays())
            }
            302 => {
                let target = redirect_target(&response, &resolve_url)?;
                log::debug!("Redirected to: {target}");

                let target = format!("{target}?client_id={}", urlencoding::encode(client_id));
                let mut response = self.get(&target, None).await?;
                let track: Track = read_json(&mut response).await?;
                Ok(track.plays())
            }
            401 => Err(PlaysError::Auth(
                "SoundCloud rejected client_id (401)".to_string(),
            )),
            code => Err(PlaysError::Status(code)),
        }
    }
}
