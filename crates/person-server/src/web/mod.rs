//! Server-rendered HTML surface.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Person table + empty form |
//! | `GET`  | `/persons` | Same, with missing avatars backfilled; `?notice=` banner |
//! | `GET`  | `/persons/edit/{id}` | Form pre-filled; redirects to `/persons` if absent |
//! | `POST` | `/persons/save` | Create (empty `id`) or update; redirects with a notice |
//! | `GET`  | `/persons/delete/{id}` | Delete; redirects with a notice |
//!
//! Every mutation goes through [`PersonService`], so the duplicate guard and
//! avatar preservation apply here exactly as in the JSON API.

pub mod form;
pub mod page;

use std::sync::Arc;

use axum::{
  Form, Router,
  extract::{Path, Query, State},
  response::{Html, Redirect},
  routing::{get, post},
};
use person_core::{
  Error as CoreError, Person, PersonId, PersonService, avatar::AvatarFetcher,
  store::PersonStore,
};
use serde::Deserialize;

use crate::error::Error;
use form::{Notice, PersonForm};

type Service<S, F> = State<Arc<PersonService<S, F>>>;

pub fn web_router<S, F>(service: Arc<PersonService<S, F>>) -> Router<()>
where
  S: PersonStore + 'static,
  F: AvatarFetcher + 'static,
{
  Router::new()
    .route("/", get(home::<S, F>))
    .route("/persons", get(index::<S, F>))
    .route("/persons/edit/{id}", get(edit::<S, F>))
    .route("/persons/save", post(save::<S, F>))
    .route("/persons/delete/{id}", get(delete::<S, F>))
    .with_state(service)
}

/// Every stored person, with avatars provisioned for those lacking one.
async fn list_with_avatars<S, F>(service: &PersonService<S, F>) -> Result<Vec<Person>, Error>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let mut persons = Vec::new();
  for person in service.list().await? {
    persons.push(service.backfill_avatar(person).await?);
  }
  Ok(persons)
}

// ─── Pages ───────────────────────────────────────────────────────────────────

async fn home<S, F>(State(service): Service<S, F>) -> Result<Html<String>, Error>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let persons = service.list().await?;
  Ok(Html(page::index(&persons, None, None)))
}

#[derive(Debug, Deserialize)]
struct IndexParams {
  notice: Option<String>,
}

async fn index<S, F>(
  State(service): Service<S, F>,
  Query(params): Query<IndexParams>,
) -> Result<Html<String>, Error>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  tracing::info!("displaying persons index page");
  let persons = list_with_avatars(&service).await?;
  let notice = params.notice.as_deref().and_then(Notice::parse);
  Ok(Html(page::index(&persons, None, notice)))
}

async fn edit<S, F>(
  State(service): Service<S, F>,
  Path(id): Path<PersonId>,
) -> Result<axum::response::Response, Error>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  use axum::response::IntoResponse as _;

  tracing::info!(id, "editing person");
  let person = match service.get(id).await {
    Ok(p) => service.backfill_avatar(p).await?,
    Err(CoreError::NotFound(_)) => {
      tracing::warn!(id, "person not found for editing");
      return Ok(Redirect::to("/persons").into_response());
    }
    Err(e) => return Err(e.into()),
  };
  let persons = list_with_avatars(&service).await?;
  Ok(Html(page::index(&persons, Some(&person), None)).into_response())
}

// ─── Mutations ───────────────────────────────────────────────────────────────

async fn save<S, F>(State(service): Service<S, F>, Form(form): Form<PersonForm>) -> Redirect
where
  S: PersonStore,
  F: AvatarFetcher,
{
  let notice = match form.into_person() {
    Err(e) => {
      tracing::warn!(error = %e, "rejected person form");
      Notice::Invalid
    }
    Ok((None, person)) => match service.create(person).await {
      Ok(saved) => {
        tracing::info!(id = ?saved.id, "person saved from form");
        Notice::Created
      }
      Err(e) => failure_notice(e),
    },
    Ok((Some(id), person)) => match service.update(id, person).await {
      Ok(_) => Notice::Updated,
      Err(e) => failure_notice(e),
    },
  };
  Redirect::to(&notice.redirect_target())
}

async fn delete<S, F>(State(service): Service<S, F>, Path(id): Path<PersonId>) -> Redirect
where
  S: PersonStore,
  F: AvatarFetcher,
{
  tracing::info!(id, "deleting person from form");
  let notice = match service.delete(id).await {
    Ok(()) => Notice::Deleted,
    Err(e) => failure_notice(e),
  };
  Redirect::to(&notice.redirect_target())
}

fn failure_notice(e: CoreError) -> Notice {
  match e {
    CoreError::DuplicatePerson { .. } => Notice::Duplicate,
    CoreError::NotFound(id) => {
      tracing::warn!(id, "person not found");
      Notice::NotFound
    }
    other => {
      tracing::error!(error = %other, "person form operation failed");
      Notice::Error
    }
  }
}
