//! Cooking video lookup for matched recipes
//!
//! Given a dish name, finds the top matching video on the YouTube Data API.
//!
//! # Example
//!
//! ```rust,no_run
//! use cookbuddy_media::{MediaClient, MediaConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MediaClient::with_config(MediaConfig::from_env()?)?;
//!
//!     if let Some(video) = client.search_video("Masala Dosa").await? {
//!         println!("{} by {}: {}", video.title, video.channel, video.watch_url());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod video;

pub use client::MediaClient;
pub use config::{MediaConfig, RetryPolicy, DEFAULT_API_KEY_ENV};
pub use error::{MediaError, MediaResult};
pub use video::Video;
