//! Media retrieval.
//!
//! These operations answer with raw bytes. A server that rejects the request
//! answers with an error envelope instead, which surfaces as
//! [`Error::Protocol`](crate::Error::Protocol).

use crate::client::SubsonicClient;
use crate::envelope::RawMedia;
use crate::error::Result;
use crate::params::{CallParameters, CoverArtOptions, StreamOptions};

impl SubsonicClient {
    /// Stream a song or video, optionally transcoded.
    pub async fn stream(&self, id: &str, options: &StreamOptions) -> Result<RawMedia> {
        let mut params = CallParameters::new();
        params.add("id", id).encode(options);

        self.call_media("stream", params).await
    }

    /// Download the original file, never transcoded.
    pub async fn download(&self, id: &str) -> Result<RawMedia> {
        self.call_media("download", CallParameters::new().with("id", id))
            .await
    }

    /// Fetch cover art for a song, album or artist.
    pub async fn get_cover_art(&self, id: &str, options: &CoverArtOptions) -> Result<RawMedia> {
        let mut params = CallParameters::new();
        params.add("id", id).encode(options);

        self.call_media("getCoverArt", params).await
    }
}
