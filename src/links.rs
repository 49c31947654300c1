//! Finding provider URLs in a fetched set page.
//!
//! Each provider is scanned independently; the first match wins and a match
//! runs up to (not including) the next `"`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static MIXCLOUD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https://www\.mixcloud\.com/[^"]+"#).unwrap());
static SOUNDCLOUD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https://soundcloud\.com/[^"]+"#).unwrap());
static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://(www\.)?youtube\.com/[^"]+|https://youtu\.be/[^"]+"#).unwrap()
});

/// The three hosting providers we know how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Mixcloud,
    SoundCloud,
    YouTube,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Mixcloud => "Mixcloud",
            Provider::SoundCloud => "SoundCloud",
            Provider::YouTube => "YouTube",
        };
        f.write_str(name)
    }
}

/// Provider URLs found on one set page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderLinks {
    pub mixcloud: Option<String>,
    pub soundcloud: Option<String>,
    pub youtube: Option<String>,
}

impl ProviderLinks {
    /// Present links in a fixed provider order.
    pub fn iter(&self) -> impl Iterator<Item = (Provider, &str)> {
        [
            (Provider::Mixcloud, self.mixcloud.as_deref()),
            (Provider::SoundCloud, self.soundcloud.as_deref()),
            (Provider::YouTube, self.youtube.as_deref()),
        ]
        .into_iter()
        .filter_map(|(provider, link)| link.map(|link| (provider, link)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

fn first_match(pattern: &Regex, page: &str) -> Option<String> {
    pattern.find(page).map(|m| m.as_str().to_string())
}

/// Scan page text for the first URL of each provider.
pub fn find_provider_links(page: &str) -> ProviderLinks {
    let links = ProviderLinks {
        mixcloud: first_match(&MIXCLOUD, page),
        soundcloud: first_match(&SOUNDCLOUD, page),
        youtube: first_match(&YOUTUBE, page),
    };
    log::debug!(
        "External links found - Mixcloud: {:?}, SoundCloud: {:?}, YouTube: {:?}",
        links.mixcloud,
        links.soundcloud,
        links.youtube
    );
    links
}
