//! Connection checks and server information.

use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::info;

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::CallParameters;
use crate::types::License;

#[derive(Deserialize)]
struct LicenseBody {
    license: License,
}

impl SubsonicClient {
    /// Test connectivity and credentials.
    pub async fn ping(&self) -> Result<()> {
        self.call::<IgnoredAny>("ping", CallParameters::new()).await?;
        info!(url = %self.url(), "Connected to server");
        Ok(())
    }

    /// Get details about the server license.
    pub async fn get_license(&self) -> Result<License> {
        let body: LicenseBody = self.call("getLicense", CallParameters::new()).await?;
        Ok(body.license)
    }
}
