pub mod aggregate;
pub mod client;
pub mod commands;
pub mod config;
pub mod counter;
pub mod error;
pub mod headers;
pub mod links;
pub mod list;
pub mod providers;
pub mod sort;

pub use aggregate::{aggregate, format_plays, SetReport};
pub use client::PlayCountClient;
pub use config::{Config, CredentialSource, Credentials, Endpoints, LogConfig};
#[cfg(feature = "mock")]
pub use counter::MockPlayCounter;
pub use counter::PlayCounter;
pub use error::PlaysError;
pub use links::{find_provider_links, Provider, ProviderLinks};
pub use list::{parse_list, read_list, Entry};
pub use providers::SoundCloudStrategy;

pub type Result<T> = std::result::Result<T, PlaysError>;
