//! Person server: configuration, avatar transport, HTML pages and router
//! composition around [`PersonService`].

pub mod avatar;
pub mod error;
pub mod seed;
pub mod web;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::Router;
use person_core::{PersonService, avatar::{AvatarFetcher, DEFAULT_AVATAR_SIZE}, store::PersonStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PERSON_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                        String,
  pub port:                        u16,
  pub store_path:                  PathBuf,
  /// Insert the demo persons when the store starts out empty.
  pub seed_demo_data:              bool,
  pub avatar_size:                 u32,
  pub avatar_connect_timeout_secs: u64,
  pub avatar_read_timeout_secs:    u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                        "127.0.0.1".to_string(),
      port:                        8080,
      store_path:                  PathBuf::from("person.db"),
      seed_demo_data:              true,
      avatar_size:                 DEFAULT_AVATAR_SIZE,
      avatar_connect_timeout_secs: 5,
      avatar_read_timeout_secs:    5,
    }
  }
}

impl ServerConfig {
  pub fn avatar_connect_timeout(&self) -> Duration {
    Duration::from_secs(self.avatar_connect_timeout_secs)
  }

  pub fn avatar_read_timeout(&self) -> Duration {
    Duration::from_secs(self.avatar_read_timeout_secs)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the JSON API under `/api` plus the HTML pages.
pub fn router<S, F>(service: Arc<PersonService<S, F>>) -> Router
where
  S: PersonStore + 'static,
  F: AvatarFetcher + 'static,
{
  Router::new()
    .nest("/api", person_api::api_router(service.clone()))
    .merge(web::web_router(service))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
