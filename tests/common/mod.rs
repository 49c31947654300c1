#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use http_types::StatusCode;
use set_plays::{Config, Credentials, PlayCountClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A canned HTTP response.
#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
    location: Option<String>,
}

/// What the code under test sent.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// In-memory [`HttpClient`] that answers from a fixed route table.
///
/// Unknown URLs fail like an unreachable host. Clones share routes and the
/// request log, so a test can keep a handle after boxing one for the client.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClient {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) -> &Self {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Canned {
                status,
                body: body.to_string(),
                location: None,
            },
        );
        self
    }

    pub fn redirect(&self, url: &str, location: &str) -> &Self {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Canned {
                status: 302,
                body: String::new(),
                location: Some(location.to_string()),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    /// A [`PlayCountClient`] backed by this script.
    pub fn play_count_client(&self, credentials: Credentials) -> PlayCountClient {
        PlayCountClient::with_config(
            Box::new(self.clone()),
            Config::with_credentials(credentials),
        )
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn send(&self, mut req: Request) -> Result<Response, Error> {
        let body = req.body_string().await.unwrap_or_default();
        let url = req.url().to_string();

        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().to_string(),
            url: url.clone(),
            authorization: req
                .header("Authorization")
                .map(|values| values.last().as_str().to_string()),
            body,
        });

        let canned = self.routes.lock().unwrap().get(&url).cloned();
        let Some(canned) = canned else {
            return Err(Error::from_str(
                StatusCode::BadGateway,
                format!("no route to {url}"),
            ));
        };

        let mut response = Response::new(canned.status);
        response.set_body(canned.body);
        if let Some(location) = canned.location {
            let _ = response.insert_header("Location", location.as_str());
        }
        Ok(response)
    }
}

pub const SET_PAGE_URL: &str = "http://example.test/set";
pub const MIXCLOUD_URL: &str = "https://www.mixcloud.com/dj/sunrise-session/";
pub const MIXCLOUD_API_URL: &str = "https://api.mixcloud.com/dj/sunrise-session/";
pub const SOUNDCLOUD_URL: &str = "https://soundcloud.com/dj/sunrise-session";
pub const SOUNDCLOUD_RESOLVE_URL: &str =
    "https://api.soundcloud.com/resolve?url=https%3A%2F%2Fsoundcloud.com%2Fdj%2Fsunrise-session";
pub const SOUNDCLOUD_TOKEN_URL: &str = "https://api.soundcloud.com/oauth2/token";
pub const SOUNDCLOUD_TRACK_URL: &str = "https://api.soundcloud.com/tracks/4242";
pub const YOUTUBE_URL: &str = "https://www.youtube.com/watch?v=abc123";
pub const YOUTUBE_API_URL: &str =
    "https://www.googleapis.com/youtube/v3/videos?part=statistics&id=abc123&key=yt-key";

/// Set page linking to the given provider URLs.
pub fn set_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!("<a href=\"{link}\">listen</a>\n"))
        .collect();
    format!("<html><body><h1>Sunrise Session</h1>\n{anchors}</body></html>")
}

pub fn youtube_views(count: &str) -> String {
    format!(r#"{{"kind":"youtube#videoListResponse","items":[{{"id":"abc123","statistics":{{"viewCount":"{count}","likeCount":"12"}}}}]}}"#)
}

pub fn soundcloud_track(playback_count: u64) -> String {
    format!(r#"{{"id":4242,"kind":"track","playback_count":{playback_count}}}"#)
}
