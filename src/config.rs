//! Runtime configuration: provider credentials, API endpoints and logging.
//!
//! Credentials are looked up by name in the process environment. Nothing is
//! cached between sets; resolvers ask the [`CredentialSource`] every time they
//! run, so a missing value just skips the corresponding resolution step.

use log::LevelFilter;
use std::env;

pub const SOUNDCLOUD_OAUTH_TOKEN: &str = "SOUNDCLOUD_OAUTH_TOKEN";
pub const SOUNDCLOUD_CLIENT_ID: &str = "SOUNDCLOUD_CLIENT_ID";
pub const SOUNDCLOUD_CLIENT_SECRET: &str = "SOUNDCLOUD_CLIENT_SECRET";
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";

/// Provider credentials. Empty strings are normalised to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub soundcloud_oauth_token: Option<String>,
    pub soundcloud_client_id: Option<String>,
    pub soundcloud_client_secret: Option<String>,
    pub youtube_api_key: Option<String>,
}

impl Credentials {
    /// Read all credentials from the environment.
    pub fn from_env() -> Self {
        Self {
            soundcloud_oauth_token: env_value(SOUNDCLOUD_OAUTH_TOKEN),
            soundcloud_client_id: env_value(SOUNDCLOUD_CLIENT_ID),
            soundcloud_client_secret: env_value(SOUNDCLOUD_CLIENT_SECRET),
            youtube_api_key: env_value(YOUTUBE_API_KEY),
        }
    }

    pub fn with_soundcloud_token(mut self, token: &str) -> Self {
        self.soundcloud_oauth_token = non_empty(token);
        self
    }

    pub fn with_soundcloud_client(mut self, id: &str, secret: Option<&str>) -> Self {
        self.soundcloud_client_id = non_empty(id);
        self.soundcloud_client_secret = secret.and_then(non_empty);
        self
    }

    pub fn with_youtube_key(mut self, key: &str) -> Self {
        self.youtube_api_key = non_empty(key);
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|v| non_empty(&v))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Where credentials come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the process environment on every lookup.
    #[default]
    Environment,
    /// A fixed set, mostly useful in tests.
    Fixed(Credentials),
}

impl CredentialSource {
    pub fn current(&self) -> Credentials {
        match self {
            CredentialSource::Environment => Credentials::from_env(),
            CredentialSource::Fixed(credentials) => credentials.clone(),
        }
    }
}

/// Base URLs of the upstream statistics services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub mixcloud_api: String,
    pub soundcloud_api: String,
    pub youtube_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            mixcloud_api: "https://api.mixcloud.com".to_string(),
            soundcloud_api: "https://api.soundcloud.com".to_string(),
            youtube_api: "https://www.googleapis.com/youtube/v3".to_string(),
        }
    }
}

/// Logging configuration handed to [`LogConfig::init`] by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl LogConfig {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        }
    }

    /// Install the global logger. `RUST_LOG` still takes precedence.
    ///
    /// Calling this twice is harmless; the second call is ignored.
    pub fn init(&self) {
        let _ = env_logger::Builder::new()
            .filter_level(self.level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .try_init();
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Everything a [`PlayCountClient`](crate::PlayCountClient) needs besides its HTTP transport.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub credentials: CredentialSource,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: CredentialSource::Fixed(credentials),
            endpoints: Endpoints::default(),
        }
    }
}
