//! Handlers for `/persons` endpoints.
//!
//! Malformed bodies and non-numeric ids are answered with 400 and an
//! `{"error": ...}` body.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/persons`      | All persons |
//! | `POST`   | `/persons`      | Body: [`Person`]; 201 + stored person, 409 on duplicate name |
//! | `GET`    | `/persons/{id}` | 404 if not found |
//! | `PUT`    | `/persons/{id}` | Body: [`Person`]; avatar is preserved; 404 if not found, 409 if another person has the name |
//! | `DELETE` | `/persons/{id}` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use person_core::{
  Person, PersonId, PersonService, avatar::AvatarFetcher, store::PersonStore,
};

use crate::error::ApiError;

type Service<S, F> = State<Arc<PersonService<S, F>>>;
type IdParam = Result<Path<PersonId>, PathRejection>;
type PersonBody = Result<Json<Person>, JsonRejection>;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S, F>(State(service): Service<S, F>) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  tracing::info!("retrieving all persons");
  Ok(Json(service.list().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/{id}`
pub async fn get_one<S, F>(
  State(service): Service<S, F>,
  id: IdParam,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let Path(id) = id?;
  tracing::info!(id, "retrieving person");
  let person = service.get(id).await.inspect_err(|_| {
    tracing::warn!(id, "person not found");
  })?;
  Ok(Json(person))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons` — returns 201 + the stored person with its avatar.
pub async fn create<S, F>(
  State(service): Service<S, F>,
  body: PersonBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let Json(body) = body?;
  tracing::info!("creating new person");
  tracing::debug!(
    first_name = %body.first_name,
    last_name = %body.last_name,
    date_of_birth = %body.date_of_birth,
    "person details"
  );
  let person = service.create(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/{id}` — any `avatar` in the body is ignored.
pub async fn update_one<S, F>(
  State(service): Service<S, F>,
  id: IdParam,
  body: PersonBody,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let Path(id) = id?;
  tracing::info!(id, "updating person");
  let Json(body) = body?;
  Ok(Json(service.update(id, body).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/{id}` — 204 with no body.
pub async fn delete_one<S, F>(
  State(service): Service<S, F>,
  id: IdParam,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let Path(id) = id?;
  tracing::info!(id, "deleting person");
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
