//! [`HttpAvatarFetcher`] — the reqwest transport behind avatar provisioning.

use std::time::Duration;

use person_core::{Error, Result, avatar::AvatarFetcher};
use reqwest::Client;

/// Fetches avatar images over HTTP(S).
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpAvatarFetcher {
  client: Client,
}

impl HttpAvatarFetcher {
  /// `read_timeout` applies to each socket read and resets after progress.
  pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, reqwest::Error> {
    let client = Client::builder()
      .connect_timeout(connect_timeout)
      .read_timeout(read_timeout)
      .build()?;
    Ok(Self { client })
  }
}

impl AvatarFetcher for HttpAvatarFetcher {
  async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
    let failed = |e: reqwest::Error| Error::AvatarFetchFailed {
      url:    url.to_owned(),
      reason: e.to_string(),
    };

    let resp = self
      .client
      .get(url)
      .send()
      .await
      .map_err(failed)?
      .error_for_status()
      .map_err(failed)?;
    let bytes = resp.bytes().await.map_err(failed)?;
    Ok(bytes.to_vec())
  }
}
