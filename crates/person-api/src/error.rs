//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub const DUPLICATE_PERSON_TYPE: &str = "https://api.person.com/errors/duplicate-person";
pub const DUPLICATE_PERSON_DETAIL: &str =
  "Person with the same first name and last name already exists";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("duplicate person: {first_name} {last_name}")]
  DuplicatePerson {
    first_name: String,
    last_name:  String,
  },

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Problem-details body for a 409 on a name-pair collision.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePersonProblem<'a> {
  #[serde(rename = "type")]
  pub kind:       &'static str,
  pub title:      &'static str,
  pub status:     u16,
  pub detail:     &'static str,
  pub first_name: &'a str,
  pub last_name:  &'a str,
}

impl From<person_core::Error> for ApiError {
  fn from(e: person_core::Error) -> Self {
    use person_core::Error as E;
    match e {
      E::DuplicatePerson { first_name, last_name } => {
        ApiError::DuplicatePerson { first_name, last_name }
      }
      E::NotFound(id) => ApiError::NotFound(format!("Person with id {id} not found")),
      E::StoreUnavailable(source) => ApiError::Store(source),
      other @ E::AvatarFetchFailed { .. } => ApiError::Store(Box::new(other)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::DuplicatePerson { first_name, last_name } => {
        let problem = DuplicatePersonProblem {
          kind:       DUPLICATE_PERSON_TYPE,
          title:      "Duplicate Person",
          status:     StatusCode::CONFLICT.as_u16(),
          detail:     DUPLICATE_PERSON_DETAIL,
          first_name: &first_name,
          last_name:  &last_name,
        };
        let mut res = (StatusCode::CONFLICT, Json(problem)).into_response();
        res.headers_mut().insert(
          header::CONTENT_TYPE,
          HeaderValue::from_static("application/problem+json"),
        );
        res
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response(),
      ApiError::BadRequest(m) => {
        tracing::warn!(error = %m, "rejected request");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
          .into_response()
      }
    }
  }
}
