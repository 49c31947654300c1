//! Per-provider play count resolvers.
//!
//! Every resolver is an inherent method on [`PlayCountClient`](crate::PlayCountClient)
//! that returns a plain count. Failures are logged and reported as 0 so one
//! provider never affects another.

pub mod mixcloud;
pub mod soundcloud;
pub mod youtube;

pub use mixcloud::parse_mixcloud_url;
pub use soundcloud::{scrape_playback_count, SoundCloudStrategy};
pub use youtube::{parse_view_count, youtube_video_id};
