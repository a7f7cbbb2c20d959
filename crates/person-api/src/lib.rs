//! JSON REST API for persons.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", person_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{Router, routing::get};
use person_core::{PersonService, avatar::AvatarFetcher, store::PersonStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, F>(service: Arc<PersonService<S, F>>) -> Router<()>
where
  S: PersonStore + 'static,
  F: AvatarFetcher + 'static,
{
  Router::new()
    .route("/persons", get(persons::list::<S, F>).post(persons::create::<S, F>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S, F>)
        .put(persons::update_one::<S, F>)
        .delete(persons::delete_one::<S, F>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
