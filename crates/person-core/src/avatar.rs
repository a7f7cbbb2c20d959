//! Avatar provisioning.
//!
//! Three steps, only the last of which touches the network:
//!
//! 1. [`derive_key`] — MD5 over a normalised email or name. MD5 is used for
//!    identifier stability with the avatar provider, not for security.
//! 2. [`build_avatar_url`] — the provider URL for that key.
//! 3. [`AvatarProvisioner::fetch_as_embedded`] — download the image and
//!    base64-encode it, degrading to an empty string on any failure.

use std::future::Future;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use md5::{Digest, Md5};

use crate::Result;

pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc";

/// Image edge length in pixels requested from the provider.
pub const DEFAULT_AVATAR_SIZE: u32 = 200;

/// Hex MD5 digest of the trimmed, lower-cased `email`, or of `name` when the
/// email is missing or blank.
pub fn derive_key(email: Option<&str>, name: &str) -> String {
  let source = match email.map(str::trim) {
    Some(e) if !e.is_empty() => e,
    _ => name.trim(),
  };
  hex::encode(Md5::digest(source.to_lowercase().as_bytes()))
}

pub fn build_avatar_url(key: &str, size: u32) -> String {
  format!("{AVATAR_BASE_URL}/{size}?u={key}")
}

/// Transport that retrieves raw image bytes.
///
/// Implementations report every failure (connect error, timeout, non-2xx
/// status) as [`Error::AvatarFetchFailed`](crate::Error::AvatarFetchFailed).
pub trait AvatarFetcher: Send + Sync {
  fn fetch<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Vec<u8>>> + Send + 'a;
}

/// Resolves names into embedded avatar payloads.
#[derive(Debug, Clone)]
pub struct AvatarProvisioner<F> {
  fetcher: F,
  size:    u32,
}

impl<F: AvatarFetcher> AvatarProvisioner<F> {
  pub fn new(fetcher: F) -> Self {
    Self { fetcher, size: DEFAULT_AVATAR_SIZE }
  }

  pub fn with_size(mut self, size: u32) -> Self {
    self.size = size;
    self
  }

  pub fn size(&self) -> u32 { self.size }

  /// Fetch `url` and return the base64-encoded body.
  ///
  /// Never fails: any transport error is logged and yields `""`, so avatar
  /// provisioning can never block the caller.
  pub async fn fetch_as_embedded(&self, url: &str) -> String {
    match self.fetcher.fetch(url).await {
      Ok(bytes) => {
        tracing::debug!(url, len = bytes.len(), "fetched avatar image");
        B64.encode(bytes)
      }
      Err(e) => {
        tracing::error!(url, error = %e, "avatar fetch failed, using empty avatar");
        String::new()
      }
    }
  }

  /// Derive the key, build the URL, and fetch the embedded payload.
  pub async fn provision(&self, email: Option<&str>, name: &str) -> String {
    let url = build_avatar_url(&derive_key(email, name), self.size);
    self.fetch_as_embedded(&url).await
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::Error;

  struct FixedBytes(Vec<u8>);

  impl AvatarFetcher for FixedBytes {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> { Ok(self.0.clone()) }
  }

  struct Failing;

  impl AvatarFetcher for Failing {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
      Err(Error::AvatarFetchFailed {
        url:    url.to_owned(),
        reason: "connection refused".into(),
      })
    }
  }

  #[derive(Default)]
  struct Recording(Mutex<Vec<String>>);

  impl AvatarFetcher for Recording {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
      self.0.lock().unwrap().push(url.to_owned());
      Ok(vec![1, 2, 3])
    }
  }

  #[test]
  fn key_from_email() {
    assert_eq!(
      derive_key(Some("test@example.com"), "Test User"),
      "55502f40dc8b7c769880b10874abc9d0"
    );
  }

  #[test]
  fn key_falls_back_to_name() {
    assert_eq!(derive_key(None, "Test User"), "0d432e6298384cc9b7c6d338ea89bd79");
    assert_eq!(
      derive_key(Some("   "), "Test User"),
      "0d432e6298384cc9b7c6d338ea89bd79"
    );
  }

  #[test]
  fn key_normalises_case_and_whitespace() {
    let plain = derive_key(None, "John Doe");
    assert_eq!(plain, derive_key(None, "john doe"));
    assert_eq!(plain, derive_key(None, " John Doe "));
    assert_eq!(
      derive_key(Some(" Test@Example.COM "), "ignored"),
      derive_key(Some("test@example.com"), "other")
    );
  }

  #[test]
  fn url_template() {
    assert_eq!(
      build_avatar_url("55502f40dc8b7c769880b10874abc9d0", DEFAULT_AVATAR_SIZE),
      "https://i.pravatar.cc/200?u=55502f40dc8b7c769880b10874abc9d0"
    );
    assert_eq!(build_avatar_url("abc", 64), "https://i.pravatar.cc/64?u=abc");
  }

  #[tokio::test]
  async fn fetched_bytes_are_base64_encoded() {
    let p = AvatarProvisioner::new(FixedBytes(b"hello".to_vec()));
    assert_eq!(p.fetch_as_embedded("https://example.test/a").await, "aGVsbG8=");
  }

  #[tokio::test]
  async fn fetch_failure_degrades_to_empty_string() {
    let p = AvatarProvisioner::new(Failing);
    assert_eq!(p.fetch_as_embedded("https://example.test/a").await, "");
    assert_eq!(p.provision(None, "John Doe").await, "");
  }

  #[tokio::test]
  async fn provision_requests_derived_url() {
    let p = AvatarProvisioner::new(Recording::default()).with_size(64);
    let embedded = p.provision(None, "Test User").await;
    assert_eq!(embedded, "AQID");
    let urls = p.fetcher.0.lock().unwrap().clone();
    assert_eq!(urls, vec![
      "https://i.pravatar.cc/64?u=0d432e6298384cc9b7c6d338ea89bd79".to_owned()
    ]);
  }
}
