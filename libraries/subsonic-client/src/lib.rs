//! Subsonic Client
//!
//! HTTP client library for Subsonic-compatible music servers (Subsonic,
//! Airsonic, Navidrome, Gonic, ...).
//!
//! # Features
//!
//! - **Authentication**: plain, hex-encoded or salted-token credentials
//! - **Browsing**: music folders, indexes, directories, artists, albums, genres
//! - **Annotation**: star, unstar and rate
//! - **Media**: stream, download and cover art, with server errors detected
//!   even when the server answers a media request with an error document
//!
//! Every call is a single request/response round trip; nothing is cached or
//! retried.
//!
//! # Example
//!
//! ```ignore
//! use subsonic_client::{ClientConfig, Credentials, StarTargets, StreamOptions, SubsonicClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::with_password("alice", "sesame", "my-player");
//!     let client = SubsonicClient::new(ClientConfig::new("https://music.example.com", credentials))?;
//!
//!     client.ping().await?;
//!
//!     let album = client.get_album("al-1").await?;
//!     client.star(&StarTargets::albums([album.id.clone()])).await?;
//!
//!     if let Some(song) = album.song.first() {
//!         let media = client.stream(&song.id, &StreamOptions::default()).await?;
//!         println!("{} bytes of {}", media.len(), media.content_type);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod auth;
mod client;
mod config;
mod envelope;
mod error;
mod params;
mod request;
mod transport;
pub mod types;

// Re-export main types
pub use auth::{token_for, AuthMethod, Credentials, DEFAULT_PROTOCOL_VERSION};
pub use client::SubsonicClient;
pub use config::{ClientConfig, ResponseFormat};
pub use envelope::{
    decode_envelope, decode_media, decode_response, BodyKind, RawMedia, ResponseEnvelope,
};
pub use error::{ApiError, Error, ErrorCode, Result};
pub use params::{
    ArtistInfoOptions, ArtistsOptions, CallParameters, CountOptions, CoverArtOptions,
    EncodeParams, IndexesOptions, Rating, StarTargets, StreamOptions,
};
pub use request::{HttpVerb, RequestDescriptor, RESERVED_KEYS};
pub use transport::RawResponse;
