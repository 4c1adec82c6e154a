//! Starring and rating.

use serde::de::IgnoredAny;

use crate::client::SubsonicClient;
use crate::error::{Error, Result};
use crate::params::{CallParameters, Rating, StarTargets};

impl SubsonicClient {
    /// Star songs, albums and artists in a single call.
    pub async fn star(&self, targets: &StarTargets) -> Result<()> {
        self.annotate("star", targets).await
    }

    /// Remove the star from songs, albums and artists in a single call.
    pub async fn unstar(&self, targets: &StarTargets) -> Result<()> {
        self.annotate("unstar", targets).await
    }

    /// Rate a song, album or artist from 1 to 5; 0 removes the rating.
    ///
    /// Out-of-range values fail with [`Error::Validation`] without contacting
    /// the server.
    pub async fn set_rating(&self, id: &str, rating: i32) -> Result<()> {
        let rating = Rating::new(rating)?;
        let mut params = CallParameters::new();
        params.add("id", id).add("rating", rating);

        self.call::<IgnoredAny>("setRating", params).await?;
        Ok(())
    }

    async fn annotate(&self, operation: &str, targets: &StarTargets) -> Result<()> {
        if targets.is_empty() {
            return Err(Error::Validation(format!(
                "{} needs at least one song, album or artist id",
                operation
            )));
        }

        let mut params = CallParameters::new();
        params.encode(targets);

        self.call::<IgnoredAny>(operation, params).await?;
        Ok(())
    }
}
